//! Unit cell geometry and crystallographic symmetry.
//!
//! Provides fractional/orthogonal coordinate conversion, periodic distances
//! and the list of symmetry images that the neighbor index replicates atoms
//! into.

mod fractional;
mod spacegroup;
mod transform;
mod unit_cell;

pub use fractional::Fractional;
pub use spacegroup::space_group_operators;
pub use transform::FTransform;
pub use unit_cell::UnitCell;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CellError {
    #[error("Invalid unit cell parameters: {0}")]
    InvalidParameters(String),

    #[error("Unit cell matrix is not invertible")]
    SingularMatrix,

    #[error("Invalid symmetry operator '{triplet}': {reason}")]
    InvalidTriplet { triplet: String, reason: String },

    #[error("Space group '{0}' is not tabulated")]
    UnknownSpaceGroup(String),
}
