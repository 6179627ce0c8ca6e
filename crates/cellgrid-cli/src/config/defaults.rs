use cellgrid::engine::config::DEFAULT_SPECIAL_POS_CUTOFF_SQ;

/// Values used when neither the config file nor the command line sets them.
pub struct DefaultsConfig {
    pub search_radius: f32,
    pub nearest_radius: f32,
    pub skip_intra_residue: bool,
    pub special_position_cutoff: f32,
    pub include_hydrogens: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            search_radius: 4.0,
            nearest_radius: 5.0,
            skip_intra_residue: true,
            special_position_cutoff: DEFAULT_SPECIAL_POS_CUTOFF_SQ.sqrt(),
            include_hydrogens: true,
        }
    }
}
