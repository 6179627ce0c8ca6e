use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "cellgrid - Periodic neighbor search and contact enumeration for macromolecular structures.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all atom pairs closer than a cutoff, including contacts with symmetry mates.
    Contacts(ContactsArgs),
    /// Find the atom (or symmetry image of an atom) nearest to a point.
    Nearest(NearestArgs),
}

/// Arguments for the `contacts` subcommand.
#[derive(Args, Debug)]
pub struct ContactsArgs {
    // --- Core Arguments ---
    /// Path to the input structure file in PDB format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the CSV report. The report is written to stdout if omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Model number to search. Defaults to the first model in the file.
    #[arg(short, long, value_name = "INT")]
    pub model: Option<i32>,

    // --- Search Overrides ---
    /// Override the contact cutoff in Angstroms.
    #[arg(short = 'r', long, value_name = "FLOAT")]
    pub search_radius: Option<f32>,

    /// Override `contacts.skip-intra-residue` from the config file.
    #[command(flatten)]
    pub intra_residue: IntraResidue,

    /// Override the distance below which an atom and its own image count as
    /// a special position, in Angstroms.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub special_position_cutoff: Option<f32>,

    /// Leave hydrogens out of the search.
    #[arg(long)]
    pub no_hydrogens: bool,

    // --- Symmetry Overrides ---
    /// Replace the space group read from the input file.
    #[arg(long, value_name = "SYMBOL", conflicts_with = "operators")]
    pub space_group: Option<String>,

    /// Replace the symmetry images with explicit operators (e.g. '-x,y+1/2,-z').
    /// Can be used multiple times.
    #[arg(long = "operator", value_name = "TRIPLET", allow_hyphen_values = true)]
    pub operators: Vec<String>,
}

/// A group to handle mutually exclusive flags for pairs within one residue.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct IntraResidue {
    /// Report contacts between atoms of the same residue.
    #[arg(long)]
    pub with_intra_residue: bool,
    /// Skip contacts between atoms of the same residue.
    #[arg(long)]
    pub no_intra_residue: bool,
}

/// Arguments for the `nearest` subcommand.
#[derive(Args, Debug)]
pub struct NearestArgs {
    /// Path to the input structure file in PDB format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Cartesian coordinates of the query point in Angstroms.
    #[arg(
        short,
        long,
        required = true,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true
    )]
    pub point: Vec<f64>,

    /// Search radius in Angstroms.
    #[arg(short = 'r', long, value_name = "FLOAT")]
    pub radius: Option<f32>,

    /// Model number to search. Defaults to the first model in the file.
    #[arg(short, long, value_name = "INT")]
    pub model: Option<i32>,
}
