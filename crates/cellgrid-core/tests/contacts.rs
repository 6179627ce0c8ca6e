mod common;

use cellgrid::core::cell::{Fractional, UnitCell};
use cellgrid::core::models::chain::Chain;
use cellgrid::core::models::element::Element;
use cellgrid::core::models::model::{AtomRef, Model};
use cellgrid::core::models::residue::Residue;
use cellgrid::engine::config::{ContactConfig, IndexConfig};
use cellgrid::engine::index::NeighborIndex;
use common::{Lcg, atom, one_atom_per_residue, random_model};
use std::collections::BTreeSet;

/// Reference answer computed by comparing every pair of atoms against every
/// image, without a grid. Triples closer than `tolerance` to the radius are
/// returned separately since single-precision storage may flip them.
fn brute_force_contacts(
    model: &Model,
    cell: &UnitCell,
    config: &ContactConfig,
    tolerance: f64,
) -> (BTreeSet<(AtomRef, AtomRef, usize)>, BTreeSet<(AtomRef, AtomRef, usize)>) {
    let radius = config.search_radius as f64;
    let mut sure = BTreeSet::new();
    let mut borderline = BTreeSet::new();
    let atoms: Vec<_> = model.atom_refs().collect();
    for &(n, a) in &atoms {
        let fa = cell.fractionalize(&a.position);
        for &(m, b) in &atoms {
            if m < n {
                continue;
            }
            let fb = cell.fractionalize(&b.position);
            let images = std::iter::once(fb).chain(cell.images().iter().map(|op| op.apply(&fb)));
            for (image, fimage) in images.enumerate() {
                if config.skip_intra_residue_links && image == 0 && m.same_residue(&n) {
                    continue;
                }
                let diff: Fractional = (fa - fimage).wrap_to_zero();
                let dist = cell.orthogonalize_difference(&diff.0).norm();
                if m == n && dist * dist < config.special_pos_cutoff_sq as f64 {
                    continue;
                }
                if (dist - radius).abs() < tolerance {
                    borderline.insert((n, m, image));
                } else if dist < radius {
                    sure.insert((n, m, image));
                }
            }
        }
    }
    (sure, borderline)
}

fn indexed_contacts(
    model: &Model,
    cell: &UnitCell,
    config: &ContactConfig,
) -> Vec<(AtomRef, AtomRef, usize)> {
    let index =
        NeighborIndex::build(model, cell, &IndexConfig::new(config.search_radius)).unwrap();
    index
        .contacts(config)
        .unwrap()
        .into_iter()
        .map(|p| (p.first, p.second, p.image))
        .collect()
}

fn assert_matches_brute_force(model: &Model, cell: &UnitCell, config: &ContactConfig) {
    let found = indexed_contacts(model, cell, config);
    let unique: BTreeSet<_> = found.iter().copied().collect();
    assert_eq!(unique.len(), found.len(), "a contact was reported twice");

    let (sure, borderline) = brute_force_contacts(model, cell, config, 1e-4);
    let filtered: BTreeSet<_> = unique.difference(&borderline).copied().collect();
    assert_eq!(filtered, sure);
}

#[test]
fn random_orthorhombic_cell_matches_brute_force() {
    let mut rng = Lcg::new(7);
    let model = random_model(&mut rng, 120, [18.0, 22.0, 15.0], 3);
    let cell = UnitCell::orthorhombic(18.0, 22.0, 15.0).unwrap();
    for radius in [2.5, 4.0, 5.0] {
        assert_matches_brute_force(&model, &cell, &ContactConfig::new(radius));
    }
}

#[test]
fn random_symmetric_cell_matches_brute_force() {
    let mut rng = Lcg::new(42);
    let model = random_model(&mut rng, 60, [20.0, 24.0, 26.0], 2);
    let mut cell = UnitCell::orthorhombic(20.0, 24.0, 26.0).unwrap();
    cell.set_space_group("P 21 21 21").unwrap();
    let mut config = ContactConfig::new(4.5);
    assert_matches_brute_force(&model, &cell, &config);

    config.skip_intra_residue_links = false;
    assert_matches_brute_force(&model, &cell, &config);
}

#[test]
fn pairs_are_independent_of_model_order() {
    let mut rng = Lcg::new(1234);
    let forward = random_model(&mut rng, 80, [16.0, 16.0, 16.0], 1);
    let mut reversed = forward.clone();
    for chain in &mut reversed.chains {
        chain.residues.reverse();
        for residue in &mut chain.residues {
            residue.atoms.reverse();
        }
    }
    let cell = UnitCell::orthorhombic(16.0, 16.0, 16.0).unwrap();
    let config = ContactConfig::new(3.5);

    let serial_pairs = |model: &Model| -> BTreeSet<(i32, i32)> {
        indexed_contacts(model, &cell, &config)
            .into_iter()
            .map(|(a, b, _)| {
                let sa = model.atom(a).unwrap().serial;
                let sb = model.atom(b).unwrap().serial;
                (sa.min(sb), sa.max(sb))
            })
            .collect()
    };
    let forward_pairs = serial_pairs(&forward);
    assert!(!forward_pairs.is_empty());
    assert_eq!(forward_pairs, serial_pairs(&reversed));
    assert_eq!(
        forward_pairs.len(),
        indexed_contacts(&forward, &cell, &config).len()
    );
}

#[test]
fn pair_across_cell_boundary_is_found_once_via_periodic_image() {
    let model = one_atom_per_residue(&[[0.5, 0.5, 0.5], [9.5, 0.5, 0.5]]);
    let cell = UnitCell::orthorhombic(10.0, 10.0, 10.0).unwrap();
    let index = NeighborIndex::build(&model, &cell, &IndexConfig::new(1.2)).unwrap();

    let pairs = index.contacts(&ContactConfig::new(1.2)).unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].first, AtomRef::new(0, 0, 0));
    assert_eq!(pairs[0].second, AtomRef::new(0, 1, 0));
    assert_eq!(pairs[0].image, 0);
    assert!((pairs[0].dist() - 1.0).abs() < 1e-4);
}

#[test]
fn non_periodic_model_reports_single_pair_without_self_images() {
    let model = one_atom_per_residue(&[[3.0, -1.0, 7.0], [5.0, -1.0, 7.0]]);
    let index = NeighborIndex::build(&model, &UnitCell::default(), &IndexConfig::new(3.0)).unwrap();

    let [a, b, c, ..] = index.unit_cell().parameters();
    assert!(a >= 2.0 + 12.0 && b >= 12.0 && c >= 12.0);

    let mut config = ContactConfig::new(3.0);
    let pairs = index.contacts(&config).unwrap();
    assert_eq!(pairs.len(), 1);
    assert!((pairs[0].dist() - 2.0).abs() < 1e-4);

    // Even with the self-exclusion cutoff disabled no atom meets a copy of itself.
    config.special_pos_cutoff_sq = 0.0;
    config.skip_intra_residue_links = true;
    assert_eq!(index.contacts(&config).unwrap().len(), 1);
}

#[test]
fn atom_on_twofold_axis_is_not_in_contact_with_itself() {
    let model = one_atom_per_residue(&[[0.05, 5.0, 0.0]]);
    let mut cell = UnitCell::orthorhombic(12.0, 12.0, 12.0).unwrap();
    cell.set_space_group("P 2").unwrap();
    let index = NeighborIndex::build(&model, &cell, &IndexConfig::new(3.0)).unwrap();
    assert_eq!(index.record_count(), 2);

    let config = ContactConfig::new(3.0);
    assert!(index.contacts(&config).unwrap().is_empty());

    let mut loose = config;
    loose.special_pos_cutoff_sq = 0.005;
    let pairs = index.contacts(&loose).unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].first, pairs[0].second);
    assert_eq!(pairs[0].image, 1);
    assert!((pairs[0].dist() - 0.1).abs() < 1e-4);
}

#[test]
fn intra_residue_pairs_follow_the_toggle() {
    let model = Model::new(1).with_chains(vec![Chain::new("A").with_residues(vec![
        Residue::new("SER", 1).with_atoms(vec![
            atom("CB", Element::C, 5.0, 5.0, 5.0),
            atom("OG", Element::O, 6.4, 5.0, 5.0),
        ]),
    ])]);
    let cell = UnitCell::orthorhombic(25.0, 25.0, 25.0).unwrap();
    let index = NeighborIndex::build(&model, &cell, &IndexConfig::new(2.0)).unwrap();

    let mut config = ContactConfig::new(2.0);
    assert!(index.contacts(&config).unwrap().is_empty());

    config.skip_intra_residue_links = false;
    let pairs = index.contacts(&config).unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(
        (pairs[0].first, pairs[0].second),
        (AtomRef::new(0, 0, 0), AtomRef::new(0, 0, 1))
    );
}

#[test]
fn altloc_conformers_do_not_contact_each_other() {
    let model = Model::new(1).with_chains(vec![Chain::new("A").with_residues(vec![
        Residue::new("LYS", 1).with_atoms(vec![
            atom("NZ", Element::N, 5.0, 5.0, 5.0).with_altloc('A'),
            atom("NZ", Element::N, 5.6, 5.0, 5.0).with_altloc('B'),
        ]),
        Residue::new("HOH", 2).with_atoms(vec![atom("O", Element::O, 5.3, 7.0, 5.0)]),
    ])]);
    let cell = UnitCell::orthorhombic(25.0, 25.0, 25.0).unwrap();
    let index = NeighborIndex::build(&model, &cell, &IndexConfig::new(3.0)).unwrap();

    let mut config = ContactConfig::new(3.0);
    config.skip_intra_residue_links = false;
    let pairs = index.contacts(&config).unwrap();
    // both conformers touch the water, but never each other
    assert_eq!(pairs.len(), 2);
    assert!(pairs.iter().all(|p| p.second == AtomRef::new(0, 1, 0)));
}

#[test]
fn annotations_can_be_applied_after_the_search() {
    let mut model = one_atom_per_residue(&[[1.0, 1.0, 1.0], [2.5, 1.0, 1.0], [8.0, 8.0, 8.0]]);
    let cell = UnitCell::orthorhombic(20.0, 20.0, 20.0).unwrap();
    let pairs = {
        let index = NeighborIndex::build(&model, &cell, &IndexConfig::new(2.0)).unwrap();
        index.contacts(&ContactConfig::new(2.0)).unwrap()
    };
    for pair in &pairs {
        model.atom_mut(pair.first).unwrap().b_iso += 1.0;
        model.atom_mut(pair.second).unwrap().b_iso += 1.0;
    }
    let b: Vec<f32> = model.atom_refs().map(|(_, a)| a.b_iso).collect();
    assert_eq!(b, vec![1.0, 1.0, 0.0]);
}
