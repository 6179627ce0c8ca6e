use crate::core::cell::UnitCell;
use crate::core::models::model::Model;
use crate::engine::config::{ContactConfig, IndexConfig};
use crate::engine::error::SearchError;
use crate::engine::index::NeighborIndex;
use crate::engine::progress::{Progress, ProgressReporter};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactSearchConfig {
    pub contact: ContactConfig,
    /// When false, hydrogens are neither indexed nor used as query centers.
    pub include_hydrogens: bool,
}

impl ContactSearchConfig {
    pub fn new(contact: ContactConfig) -> Self {
        Self {
            contact,
            include_hydrogens: true,
        }
    }
}

/// One reported contact, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactRecord {
    pub first: String,
    pub second: String,
    /// Symmetry image of `second`; 0 is the atom's own position.
    pub image: usize,
    /// The symmetry operator of `image` as a coordinate triplet.
    pub operator: String,
    pub distance: f32,
}

#[instrument(skip_all, name = "contact_search_workflow")]
pub fn run(
    model: &Model,
    cell: &UnitCell,
    config: &ContactSearchConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<ContactRecord>, SearchError> {
    let radius = config.contact.search_radius;
    if radius.is_nan() || radius <= 0.0 {
        debug!("Search radius {} admits no contacts.", radius);
        return Ok(Vec::new());
    }

    reporter.report(Progress::PhaseStart { name: "Indexing" });
    info!(
        "Building neighbor index for {} atom(s), search radius {:.2} Å.",
        model.atom_count(),
        radius
    );
    if !cell.is_crystal() {
        warn!("No crystal cell available; searching without periodic images.");
        if reporter.is_enabled() {
            reporter.report(Progress::Message(
                "No crystal cell; periodic images are not searched.".to_string(),
            ));
        }
    }
    let index_config = IndexConfig::new(radius).include_hydrogens(config.include_hydrogens);
    let index = NeighborIndex::build(model, cell, &index_config)?;
    let grid = index.grid();
    reporter.report(Progress::IndexBuilt {
        records: index.record_count(),
        grid: [grid.nu, grid.nv, grid.nw],
    });
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Contact search",
    });
    let images = index.unit_cell().images();
    let mut rows = Vec::new();
    index.for_each_contact_reported(&config.contact, reporter, |first, second, image, dist_sq| {
        if !config.include_hydrogens && first.atom.is_hydrogen() {
            return;
        }
        let operator = match image {
            0 => "x,y,z".to_string(),
            n => images
                .get(n - 1)
                .map_or_else(|| "?".to_string(), |op| op.to_triplet()),
        };
        rows.push(ContactRecord {
            first: first.to_string(),
            second: second.to_string(),
            image,
            operator,
            distance: dist_sq.sqrt(),
        });
    })?;
    reporter.report(Progress::PhaseFinish);

    info!("Contact search complete. Found {} contact(s).", rows.len());
    Ok(rows)
}
