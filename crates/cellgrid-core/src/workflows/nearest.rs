use crate::core::cell::UnitCell;
use crate::core::models::model::{AtomRef, Model};
use crate::engine::config::IndexConfig;
use crate::engine::error::SearchError;
use crate::engine::index::NeighborIndex;
use nalgebra::Point3;
use serde::Serialize;
use tracing::{debug, instrument};

/// The atom closest to a query point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestHit {
    #[serde(skip)]
    pub atom: AtomRef,
    pub label: String,
    /// Symmetry image through which the atom was reached.
    pub image: usize,
    /// Position of the matching image, wrapped into the unit cell.
    pub position: [f64; 3],
    pub distance: f32,
}

/// Finds the atom nearest to `point` within `max_radius`.
///
/// Returns `Ok(None)` if no atom (or symmetry image of one) lies within the
/// radius, including when the radius is not positive.
#[instrument(skip(model, cell), name = "nearest_atom_workflow")]
pub fn run(
    model: &Model,
    cell: &UnitCell,
    point: &Point3<f64>,
    max_radius: f32,
) -> Result<Option<NearestHit>, SearchError> {
    if max_radius.is_nan() || max_radius <= 0.0 {
        debug!("Radius {} admits no atoms.", max_radius);
        return Ok(None);
    }
    let index = NeighborIndex::build(model, cell, &IndexConfig::new(max_radius))?;
    let Some(record) = index.find_nearest_atom(point)? else {
        debug!("No atom found within {:.2} Å.", max_radius);
        return Ok(None);
    };

    let cra = record.resolve(model)?;
    let pos = record.pos();
    let hit = NearestHit {
        atom: record.aref,
        label: cra.to_string(),
        image: record.image,
        position: [pos.x, pos.y, pos.z],
        distance: index.dist(point, &cra.atom.position) as f32,
    };
    debug!("Nearest atom: {} at {:.3} Å.", hit.label, hit.distance);
    Ok(Some(hit))
}
