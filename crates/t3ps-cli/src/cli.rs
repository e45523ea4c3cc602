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
    author = "T3PS contributors",
    version,
    about = "T3PS CLI - Measure distances, angles and dihedrals on nucleic acid structures.",
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

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Click atoms of a structure in order and report the resulting measurement.
    Measure(MeasureArgs),
    /// Name the torsion four reference atom indices correspond to.
    Identify(IdentifyArgs),
    /// List every dihedral definition in the active table.
    Table,
    /// Compute the backbone torsions of every nucleotide in a PDB file.
    Analyze(AnalyzeArgs),
}

/// Arguments for the `measure` subcommand.
#[derive(Args, Debug)]
pub struct MeasureArgs {
    /// Path to the structure file (.xyz or .pdb).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Atom serials to click, in order. Clicking a selected atom deselects it;
    /// a fifth distinct atom evicts the oldest.
    #[arg(value_name = "SERIAL", required = true, num_args = 1..)]
    pub serials: Vec<usize>,

    /// How file serials map onto the reference numbering
    /// ('identity', 'offset', 'offset:N' or 'atom-name').
    #[arg(short = 'n', long, value_name = "SCHEME")]
    pub numbering: Option<String>,

    /// Override the dihedral table with a TOML file.
    #[arg(short, long, value_name = "PATH")]
    pub table: Option<PathBuf>,

    /// Decimal places for printed values.
    #[arg(short, long, value_name = "NUM")]
    pub precision: Option<usize>,
}

/// Arguments for the `identify` subcommand.
#[derive(Args, Debug)]
pub struct IdentifyArgs {
    /// Four 0-based reference atom indices.
    #[arg(value_name = "INDEX", num_args = 4)]
    pub indices: Vec<usize>,

    /// Override the dihedral table with a TOML file.
    #[arg(short, long, value_name = "PATH")]
    pub table: Option<PathBuf>,
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the PDB file.
    #[arg(value_name = "PDB")]
    pub file: PathBuf,

    /// Also write the torsions as CSV to this path.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Decimal places for printed values.
    #[arg(short, long, value_name = "NUM")]
    pub precision: Option<usize>,
}
