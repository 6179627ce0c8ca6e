use cellgrid::core::io::pdb::PdbFile;
use cellgrid::core::io::report::write_contacts_csv_to_path;
use cellgrid::core::io::traits::StructureFile;
use cellgrid::engine::config::ContactConfig;
use cellgrid::engine::progress::ProgressReporter;
use cellgrid::workflows::{contacts, nearest};
use nalgebra::Point3;
use std::fs;
use tempfile::tempdir;

const GLY_WITH_WATER: &str = "\
HEADER    TEST STRUCTURE
CRYST1   20.000   20.000   20.000  90.00  90.00  90.00 P 2           2
ATOM      1  N   GLY A   1       1.000   5.000   5.000  1.00 20.00           N
ATOM      2  CA  GLY A   1       2.450   5.000   5.000  1.00 20.00           C
ATOM      3  C   GLY A   1       3.000   6.400   5.000  1.00 20.00           C
ATOM      4  O   GLY A   1       2.300   7.400   5.000  1.00 20.00           O
HETATM    5  O   HOH A 101       0.900   5.000   1.000  1.00 20.00           O
TER
END
";

#[test]
fn contact_search_on_pdb_file_finds_symmetry_mate() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gly_water.pdb");
    fs::write(&path, GLY_WITH_WATER).unwrap();

    let structure = PdbFile::read_from_path(&path).unwrap();
    assert_eq!(structure.name, "gly_water");
    assert!(structure.cell.is_crystal());
    assert_eq!(structure.cell.images().len(), 1);
    let model = &structure.models[0];
    assert_eq!(model.atom_count(), 5);
    assert_eq!(model.chains.len(), 1);
    assert_eq!(model.chains[0].residues.len(), 2);

    let config = contacts::ContactSearchConfig::new(ContactConfig::new(3.2));
    let rows = contacts::run(model, &structure.cell, &config, &ProgressReporter::new()).unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.first, "A/HOH 101/O");
    assert_eq!(row.second, "A/HOH 101/O");
    assert_eq!(row.image, 1);
    assert_eq!(row.operator, "-x,y,-z");
    assert!((row.distance - 7.24f32.sqrt()).abs() < 1e-4);

    let mut with_bonds = config;
    with_bonds.contact.skip_intra_residue_links = false;
    let rows = contacts::run(model, &structure.cell, &with_bonds, &ProgressReporter::new()).unwrap();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows.iter().filter(|r| r.first.starts_with("A/GLY 1/")).count(), 6);

    let csv_path = dir.path().join("contacts.csv");
    assert_eq!(write_contacts_csv_to_path(&rows, &csv_path).unwrap(), 7);
    let text = fs::read_to_string(&csv_path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("first,second,image,operator,distance"));
    assert_eq!(lines.count(), 7);
}

#[test]
fn nearest_atom_on_pdb_file_may_be_a_symmetry_image() {
    let structure = PdbFile::read_from(&mut GLY_WITH_WATER.as_bytes()).unwrap();
    let model = &structure.models[0];

    let hit = nearest::run(model, &structure.cell, &Point3::new(19.5, 5.0, 19.5), 3.0)
        .unwrap()
        .unwrap();
    assert_eq!(hit.label, "A/HOH 101/O");
    assert_eq!(hit.image, 1);
    assert!((hit.distance - 0.41f32.sqrt()).abs() < 1e-4);

    assert!(
        nearest::run(model, &structure.cell, &Point3::new(10.0, 15.0, 10.0), 3.0)
            .unwrap()
            .is_none()
    );
}
