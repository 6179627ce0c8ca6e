use thiserror::Error;

/// Squared distance below which an atom and its own symmetry image are
/// treated as an atom on a special position rather than a contact.
pub const DEFAULT_SPECIAL_POS_CUTOFF_SQ: f32 = 0.8 * 0.8;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Parameter '{name}' must be {expected}, got {value}")]
    OutOfRange {
        name: &'static str,
        expected: &'static str,
        value: f32,
    },
}

/// Parameters for building a [`NeighborIndex`](super::index::NeighborIndex).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexConfig {
    /// The largest radius the index must answer completely. Buckets are at
    /// least this wide along every axis.
    pub max_radius: f32,
    pub include_hydrogens: bool,
}

impl IndexConfig {
    pub fn new(max_radius: f32) -> Self {
        Self {
            max_radius,
            include_hydrogens: true,
        }
    }

    pub fn include_hydrogens(mut self, include: bool) -> Self {
        self.include_hydrogens = include;
        self
    }
}

/// Parameters for contact enumeration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactConfig {
    pub search_radius: f32,
    /// Skip pairs within one residue unless one of them is a symmetry image.
    pub skip_intra_residue_links: bool,
    pub special_pos_cutoff_sq: f32,
}

impl ContactConfig {
    pub fn new(search_radius: f32) -> Self {
        Self {
            search_radius,
            skip_intra_residue_links: true,
            special_pos_cutoff_sq: DEFAULT_SPECIAL_POS_CUTOFF_SQ,
        }
    }

    pub fn builder() -> ContactConfigBuilder {
        ContactConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct ContactConfigBuilder {
    search_radius: Option<f32>,
    skip_intra_residue_links: Option<bool>,
    special_pos_cutoff_sq: Option<f32>,
}

impl ContactConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_radius(mut self, radius: f32) -> Self {
        self.search_radius = Some(radius);
        self
    }
    pub fn skip_intra_residue_links(mut self, skip: bool) -> Self {
        self.skip_intra_residue_links = Some(skip);
        self
    }
    pub fn special_pos_cutoff_sq(mut self, cutoff_sq: f32) -> Self {
        self.special_pos_cutoff_sq = Some(cutoff_sq);
        self
    }
    /// Sets the special-position cutoff as a plain distance in Angstroms.
    pub fn special_pos_cutoff(self, cutoff: f32) -> Self {
        self.special_pos_cutoff_sq(cutoff * cutoff)
    }

    pub fn build(self) -> Result<ContactConfig, ConfigError> {
        let search_radius = self
            .search_radius
            .ok_or(ConfigError::MissingParameter("search_radius"))?;
        let special_pos_cutoff_sq = self
            .special_pos_cutoff_sq
            .unwrap_or(DEFAULT_SPECIAL_POS_CUTOFF_SQ);
        if special_pos_cutoff_sq.is_nan() || special_pos_cutoff_sq < 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "special_pos_cutoff_sq",
                expected: "non-negative",
                value: special_pos_cutoff_sq,
            });
        }
        Ok(ContactConfig {
            search_radius,
            skip_intra_residue_links: self.skip_intra_residue_links.unwrap_or(true),
            special_pos_cutoff_sq,
        })
    }
}
