//! # Engine Module
//!
//! This module implements the stateful neighbor search: a cell-linked-list
//! index over the atoms of a model, answering proximity queries under the
//! periodic boundary conditions of a unit cell.
//!
//! ## Overview
//!
//! A [`index::NeighborIndex`] is built in two steps. Sizing picks a grid of
//! buckets at least as wide as the largest query radius (never fewer than
//! three per axis); population stores one [`record::Record`] per atom and per
//! symmetry image, each wrapped into the unit cell. Queries then scan the 27
//! buckets around a point with a minimum-image correction, and contact
//! enumeration drives one such scan per atom while removing duplicate pairs.
//!
//! ## Architecture
//!
//! - **Records** ([`record`]) - Compact per-image atom snapshots with positional back-references
//! - **Index Lifecycle** ([`index`]) - Grid sizing, population and the uninitialized/sized/populated states
//! - **Proximity Queries** ([`query`]) - Point/radius scans, neighbor and nearest-atom lookups
//! - **Contact Enumeration** ([`contacts`]) - Duplicate-free pair search with residue and special-position rules
//! - **Configuration** ([`config`]) - Index and contact parameters with builders
//! - **Progress Monitoring** ([`progress`]) - Optional callbacks for long-running scans
//! - **Error Handling** ([`error`]) - Search-specific error types
//!
//! ## Invalidation
//!
//! Records refer to atoms by (chain, residue, atom) position. The index
//! borrows its model immutably, so the borrow checker prevents structural
//! changes while it is alive; after modifying a model, build a new index.

pub mod config;
pub mod contacts;
pub mod error;
pub mod index;
pub mod progress;
pub mod query;
pub mod record;
