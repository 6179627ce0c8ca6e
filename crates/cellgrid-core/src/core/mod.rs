//! # Core Module
//!
//! Stateless building blocks for the neighbor index: the structural model,
//! unit cell geometry with crystallographic symmetry, the periodic bucket grid
//! and structure file input.
//!
//! ## Architecture
//!
//! - **Structural Model** ([`models`]) - Models, chains, residues, atoms and positional handles
//! - **Crystal Geometry** ([`cell`]) - Unit cells, fractional coordinates and symmetry operators
//! - **Spatial Storage** ([`grid`]) - A dense periodic grid covering one unit cell
//! - **File I/O** ([`io`]) - Reading PDB coordinate files and writing contact reports
//!
//! Nothing in this layer holds state between calls; the stateful search lives
//! in [`crate::engine`].

pub mod cell;
pub mod grid;
pub mod io;
pub mod models;
