use clap::Parser;
use ramaz::core::secondary::classifier::SecondaryStructureSource;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Rama-Z - Ramachandran Z-score validation of protein models, for the whole model and its helix, sheet and loop parts.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    // --- Core Arguments ---
    /// Model file to validate (PDB format). Exactly one is accepted.
    #[arg(value_name = "INPUTS")]
    pub inputs: Vec<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding `calibration.toml` and `density.csv`.
    #[arg(short, long, value_name = "PATH")]
    pub reference_dir: Option<PathBuf>,

    /// Where to get secondary structure from: auto, header or dihedral.
    #[arg(long, value_name = "SOURCE")]
    pub secondary_structure: Option<SecondaryStructureSource>,

    /// Also write the report as TOML to this file.
    #[arg(long, value_name = "PATH")]
    pub report_file: Option<PathBuf>,

    // --- Output Overrides ---
    /// Directory for partial models and plots.
    #[arg(short, long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Replace output files that already exist.
    #[arg(long)]
    pub overwrite: bool,

    /// Append `_NNN` to every output file name.
    #[arg(long, value_name = "N")]
    pub serial: Option<u32>,

    /// Resolution of the plot images.
    #[arg(long, value_name = "N")]
    pub plot_dpi: Option<u32>,

    // --- Artifact Overrides ---
    /// Write the helix, sheet and loop residues as separate PDB files.
    #[arg(long)]
    pub write_hsl_models: bool,

    /// Write Ramachandran plots of the helix, sheet and loop subsets.
    #[arg(long)]
    pub write_hsl_plot: bool,

    /// Restrict helix/sheet/loop plots to the General category.
    #[arg(long, value_name = "BOOL")]
    pub write_hsl_general_only: Option<bool>,

    /// Write Ramachandran plots of the whole model.
    #[arg(long)]
    pub write_whole_plot: bool,

    /// Restrict whole-model plots to the General category.
    #[arg(long, value_name = "BOOL")]
    pub write_whole_general_only: Option<bool>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S output.plot-dpi=150
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,

    // --- Logging ---
    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
