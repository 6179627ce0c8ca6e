//! # Workflows Module
//!
//! High-level entry points that take a model and a unit cell, build a
//! neighbor index and return plain result rows.
//!
//! ## Overview
//!
//! Workflows hide the two-step index lifecycle from front ends. They emit
//! [`Progress`](crate::engine::progress::Progress) events for long phases and
//! log their decisions through `tracing`.
//!
//! - **Contact Search** ([`contacts`]) - All atom pairs within a radius, including symmetry mates
//! - **Nearest Atom** ([`nearest`]) - The closest atom to an arbitrary point

pub mod contacts;
pub mod nearest;
