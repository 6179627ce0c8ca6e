//! Provides input/output functionality for structure files and search reports.
//!
//! Structures are read through the [`traits::StructureFile`] trait, currently
//! implemented for the PDB format. Contact search results are written as CSV.

pub mod pdb;
pub mod report;
pub mod traits;
