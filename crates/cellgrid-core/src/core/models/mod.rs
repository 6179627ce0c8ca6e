//! # Core Models Module
//!
//! This module contains the hierarchical structural model searched by the
//! neighbor index: structures hold models, models hold chains, chains hold
//! residues and residues hold atoms.
//!
//! ## Overview
//!
//! All containers are ordered vectors owned by their parent. Atoms are
//! addressed positionally with an [`model::AtomRef`] (chain, residue and atom
//! index), which is what the spatial index stores instead of references.
//! Handles remain valid as long as no container is resized or reordered.
//!
//! ## Key Components
//!
//! - [`element`] - Chemical elements and hydrogen detection
//! - [`atom`] - Atom records and altloc compatibility
//! - [`residue`] - Residues with sequence identity
//! - [`chain`] - Chains of residues
//! - [`model`] - Models, structures, positional handles and their resolution
//!
//! ## Usage
//!
//! ```ignore
//! use cellgrid::core::models::{atom::Atom, chain::Chain, element::Element,
//!     model::{AtomRef, Model}, residue::Residue};
//! use nalgebra::Point3;
//!
//! let model = Model::new(1).with_chains(vec![Chain::new("A").with_residues(vec![
//!     Residue::new("GLY", 1).with_atoms(vec![Atom::new("CA", Element::C, Point3::origin())]),
//! ])]);
//! let cra = model.cra(AtomRef::new(0, 0, 0))?;
//! ```

pub mod atom;
pub mod chain;
pub mod element;
pub mod model;
pub mod residue;
