use thiserror::Error;

use super::config::ConfigError;
use crate::core::cell::CellError;
use crate::core::grid::GridError;
use crate::core::models::model::ModelError;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Neighbor index is not initialized: {0} requires a model")]
    NotInitialized(&'static str),

    #[error("Search radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("Grid sizing failed: {source}")]
    Grid {
        #[from]
        source: GridError,
    },

    #[error("Unit cell error: {source}")]
    Cell {
        #[from]
        source: CellError,
    },

    #[error("Stale atom reference (was the model modified after indexing?): {source}")]
    Model {
        #[from]
        source: ModelError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}
