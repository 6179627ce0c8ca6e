mod defaults;

pub use defaults::DefaultsConfig;

use crate::cli::{ContactsArgs, IntraResidue};
use crate::error::{CliError, Result};
use cellgrid::core::cell::{FTransform, space_group_operators};
use cellgrid::engine::config::ContactConfig;
use cellgrid::workflows::contacts::ContactSearchConfig;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialContactsConfig {
    search_radius: Option<f32>,
    skip_intra_residue: Option<bool>,
    special_position_cutoff: Option<f32>,
    include_hydrogens: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialSymmetryConfig {
    space_group: Option<String>,
    operators: Option<Vec<String>>,
}

/// Contents of a `contacts` configuration file. Every key is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialContactsConfigFile {
    contacts: Option<PartialContactsConfig>,
    symmetry: Option<PartialSymmetryConfig>,
}

/// Fully resolved settings for the `contacts` command.
#[derive(Debug)]
pub struct ContactsAppConfig {
    pub search: ContactSearchConfig,
    /// Symmetry operators replacing those of the input file, if any.
    pub images: Option<Vec<FTransform>>,
}

impl PartialContactsConfigFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file named by `--config`, or starts from an empty
    /// configuration.
    pub fn load(args: &ContactsArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_cli(self, args: &ContactsArgs) -> Result<ContactsAppConfig> {
        let defaults = DefaultsConfig::default();
        let contacts = self.contacts.unwrap_or_default();

        let search_radius = args
            .search_radius
            .or(contacts.search_radius)
            .unwrap_or(defaults.search_radius);
        let special_position_cutoff = args
            .special_position_cutoff
            .or(contacts.special_position_cutoff)
            .unwrap_or(defaults.special_position_cutoff);
        if special_position_cutoff.is_nan() || special_position_cutoff < 0.0 {
            return Err(CliError::Config(format!(
                "`contacts.special-position-cutoff` must be non-negative, got {}",
                special_position_cutoff
            )));
        }
        let skip_intra_residue = Self::merge_intra_residue(
            args.intra_residue,
            contacts.skip_intra_residue,
            defaults.skip_intra_residue,
        );
        let include_hydrogens = if args.no_hydrogens {
            false
        } else {
            contacts
                .include_hydrogens
                .unwrap_or(defaults.include_hydrogens)
        };

        let contact = ContactConfig::builder()
            .search_radius(search_radius)
            .skip_intra_residue_links(skip_intra_residue)
            .special_pos_cutoff(special_position_cutoff)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;
        let mut search = ContactSearchConfig::new(contact);
        search.include_hydrogens = include_hydrogens;

        let images = Self::merge_symmetry(args, self.symmetry)?;

        Ok(ContactsAppConfig { search, images })
    }

    fn merge_intra_residue(cli_flags: IntraResidue, file_val: Option<bool>, default: bool) -> bool {
        if cli_flags.with_intra_residue {
            false
        } else if cli_flags.no_intra_residue {
            true
        } else {
            file_val.unwrap_or(default)
        }
    }

    fn merge_symmetry(
        args: &ContactsArgs,
        file: Option<PartialSymmetryConfig>,
    ) -> Result<Option<Vec<FTransform>>> {
        if !args.operators.is_empty() {
            return parse_operators(&args.operators).map(Some);
        }
        if let Some(symbol) = &args.space_group {
            return lookup_space_group(symbol).map(Some);
        }

        let file = file.unwrap_or_default();
        match (file.space_group, file.operators) {
            (Some(_), Some(_)) => Err(CliError::Config(
                "`symmetry.space-group` and `symmetry.operators` are mutually exclusive."
                    .to_string(),
            )),
            (Some(symbol), None) => lookup_space_group(&symbol).map(Some),
            (None, Some(operators)) => parse_operators(&operators).map(Some),
            (None, None) => Ok(None),
        }
    }
}

fn lookup_space_group(symbol: &str) -> Result<Vec<FTransform>> {
    space_group_operators(symbol).map_err(|e| CliError::Config(e.to_string()))
}

fn parse_operators(triplets: &[String]) -> Result<Vec<FTransform>> {
    triplets
        .iter()
        .map(|t| FTransform::parse_triplet(t).map_err(|e| CliError::Config(e.to_string())))
        .collect()
}
