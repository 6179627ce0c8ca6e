mod common;

use cellgrid::core::cell::UnitCell;
use cellgrid::core::models::atom::is_same_conformer;
use cellgrid::core::models::model::{AtomRef, Model};
use cellgrid::engine::config::IndexConfig;
use cellgrid::engine::error::SearchError;
use cellgrid::engine::index::{IndexState, MIN_BUCKETS_PER_AXIS, NeighborIndex};
use common::{Lcg, one_atom_per_residue, random_model};
use nalgebra::Point3;

#[test]
fn grid_always_has_at_least_three_buckets_per_axis() {
    let model = one_atom_per_residue(&[[1.0, 2.0, 3.0]]);
    let cells = [
        UnitCell::orthorhombic(4.0, 40.0, 9.0).unwrap(),
        UnitCell::new(30.0, 30.0, 30.0, 60.0, 60.0, 60.0).unwrap(),
        UnitCell::new(50.0, 60.0, 70.0, 90.0, 110.0, 90.0).unwrap(),
        UnitCell::default(),
    ];
    for cell in &cells {
        for radius in [0.5f32, 2.0, 5.0, 12.0, 40.0] {
            let index = NeighborIndex::new(&model, cell, radius).unwrap();
            let grid = index.grid();
            assert!(
                grid.nu >= MIN_BUCKETS_PER_AXIS
                    && grid.nv >= MIN_BUCKETS_PER_AXIS
                    && grid.nw >= MIN_BUCKETS_PER_AXIS,
                "{}x{}x{} for radius {}",
                grid.nu,
                grid.nv,
                grid.nw,
                radius
            );
            assert_eq!(grid.data.len(), grid.point_count());
        }
    }
}

#[test]
fn buckets_are_at_least_radius_wide_when_the_cell_allows_it() {
    let model = one_atom_per_residue(&[[1.0, 2.0, 3.0]]);
    let cell = UnitCell::new(40.0, 45.0, 50.0, 80.0, 100.0, 115.0).unwrap();
    let index = NeighborIndex::new(&model, &cell, 4.0).unwrap();
    let grid = index.grid();
    let spacings = cell.plane_spacings();
    for (width, n) in spacings.iter().zip([grid.nu, grid.nv, grid.nw]) {
        assert!(width / n as f64 >= 4.0);
    }
}

#[test]
fn lifecycle_states_are_explicit() {
    let model = one_atom_per_residue(&[[1.0, 2.0, 3.0]]);
    let cell = UnitCell::orthorhombic(10.0, 10.0, 10.0).unwrap();

    let mut index = NeighborIndex::default();
    assert_eq!(index.state(), IndexState::Uninitialized);
    assert!(matches!(
        index.for_each(&Point3::origin(), None, 1.0, |_, _| {}),
        Err(SearchError::NotInitialized(_))
    ));

    index.initialize(&model, &cell, 2.0).unwrap();
    assert_eq!(index.state(), IndexState::Sized);
    assert!(index.find_atoms(&Point3::new(1.0, 2.0, 3.0), None, 1.0).unwrap().is_empty());

    index.populate(true).unwrap();
    assert_eq!(index.state(), IndexState::Populated);
    assert_eq!(index.find_atoms(&Point3::new(1.0, 2.0, 3.0), None, 1.0).unwrap().len(), 1);
}

#[test]
fn point_queries_match_brute_force_minimum_image() {
    let mut rng = Lcg::new(99);
    let model = random_model(&mut rng, 150, [24.0, 18.0, 30.0], 2);
    let cell = UnitCell::orthorhombic(24.0, 18.0, 30.0).unwrap();
    let index = NeighborIndex::build(&model, &cell, &IndexConfig::new(4.0)).unwrap();

    for _ in 0..25 {
        let p = Point3::new(
            rng.next_f64() * 60.0 - 20.0,
            rng.next_f64() * 60.0 - 20.0,
            rng.next_f64() * 60.0 - 20.0,
        );
        let mut found: Vec<AtomRef> = index
            .find_atoms(&p, None, 4.0)
            .unwrap()
            .iter()
            .map(|r| r.aref)
            .collect();
        found.sort();

        let expected: Vec<AtomRef> = model
            .atom_refs()
            .filter(|(_, atom)| {
                let d = cell.distance_sq(&p, &atom.position).sqrt();
                assert!((d - 4.0).abs() > 1e-4, "borderline distance, change the seed");
                d < 4.0
            })
            .map(|(aref, _)| aref)
            .collect();
        assert_eq!(found, expected);
    }
}

#[test]
fn nearest_atom_on_empty_model_is_not_found() {
    let model = Model::new(1);
    let cell = UnitCell::orthorhombic(10.0, 10.0, 10.0).unwrap();
    let index = NeighborIndex::build(&model, &cell, &IndexConfig::new(3.0)).unwrap();
    assert!(index.find_nearest_atom(&Point3::new(5.0, 5.0, 5.0)).unwrap().is_none());
}

#[test]
fn nearest_atom_ties_keep_the_first_scanned_record() {
    // Both atoms share a bucket and lie exactly 0.5 Å from the query point.
    let model = one_atom_per_residue(&[[9.5, 10.0, 10.0], [10.5, 10.0, 10.0]]);
    let cell = UnitCell::orthorhombic(20.0, 20.0, 20.0).unwrap();
    let index = NeighborIndex::build(&model, &cell, &IndexConfig::new(4.0)).unwrap();
    let nearest = index
        .find_nearest_atom(&Point3::new(10.0, 10.0, 10.0))
        .unwrap()
        .unwrap();
    assert_eq!(nearest.aref, AtomRef::new(0, 0, 0));
}

#[test]
fn nearest_atom_prefers_closer_periodic_copy() {
    let model = one_atom_per_residue(&[[0.4, 5.0, 5.0], [17.0, 5.0, 5.0]]);
    let cell = UnitCell::orthorhombic(20.0, 20.0, 20.0).unwrap();
    let index = NeighborIndex::build(&model, &cell, &IndexConfig::new(4.0)).unwrap();
    // 19.0 is 2.0 Å from the second atom but only 1.4 Å from the first one's copy.
    let nearest = index
        .find_nearest_atom(&Point3::new(19.0, 5.0, 5.0))
        .unwrap()
        .unwrap();
    assert_eq!(nearest.aref, AtomRef::new(0, 0, 0));
}

#[test]
fn altloc_compatibility_is_reflexive_and_symmetric() {
    let tags = [None, Some('A'), Some('B'), Some('1')];
    for &a in &tags {
        assert!(is_same_conformer(a, a));
        assert!(is_same_conformer(a, None));
        for &b in &tags {
            assert_eq!(is_same_conformer(a, b), is_same_conformer(b, a));
            if a.is_some() && b.is_some() && a != b {
                assert!(!is_same_conformer(a, b));
            }
        }
    }
}
