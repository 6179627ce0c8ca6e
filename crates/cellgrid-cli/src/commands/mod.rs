pub mod contacts;
pub mod nearest;

use crate::error::{CliError, Result};
use cellgrid::core::io::{pdb::PdbFile, traits::StructureFile};
use cellgrid::core::models::model::{Model, Structure};
use std::path::Path;
use tracing::info;

fn load_structure(path: &Path) -> Result<Structure> {
    info!("Loading input structure from {:?}", path);
    PdbFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

/// Picks the requested model, or the first one in the file.
fn select_model(structure: &Structure, number: Option<i32>) -> Result<&Model> {
    match number {
        Some(n) => structure.find_model(n).ok_or_else(|| {
            CliError::Argument(format!("Model {} not found in '{}'.", n, structure.name))
        }),
        None => structure.models.first().ok_or_else(|| {
            CliError::Argument(format!("'{}' contains no models.", structure.name))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structure_with_models(numbers: &[i32]) -> Structure {
        let mut structure = Structure::new("test");
        structure.models = numbers.iter().map(|&n| Model::new(n)).collect();
        structure
    }

    #[test]
    fn first_model_is_the_default() {
        let structure = structure_with_models(&[3, 7]);
        assert_eq!(select_model(&structure, None).unwrap().number, 3);
        assert_eq!(select_model(&structure, Some(7)).unwrap().number, 7);
    }

    #[test]
    fn missing_model_is_an_argument_error() {
        let structure = structure_with_models(&[1]);
        assert!(matches!(
            select_model(&structure, Some(2)),
            Err(CliError::Argument(_))
        ));
        assert!(matches!(
            select_model(&Structure::new("empty"), None),
            Err(CliError::Argument(_))
        ));
    }
}
