//! # cellgrid
//!
//! A cell-linked-list spatial index for atoms of macromolecular models, with
//! periodic boundary conditions and crystallographic symmetry images.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data: the structural model
//!   (`Model`, chains, residues, atoms), unit cell geometry and symmetry
//!   operators, the periodic bucket grid, and PDB/CSV I/O.
//!
//! - **[`engine`]: The Search Core.** The stateful `NeighborIndex`: grid
//!   sizing, population with symmetry images, minimum-image proximity queries
//!   and duplicate-free contact enumeration.
//!
//! - **[`workflows`]: The Public API.** End-to-end operations (contact search,
//!   nearest-atom lookup) that build an index, run it and return result rows.

pub mod core;
pub mod engine;
pub mod workflows;
