use clap::{Args, Parser, Subcommand};
use crate::config::Variant;

#[derive(Parser)]
#[command(name = "vulnsummary", version, about = "Summarize EPSS/CVSS vulnerability scan results")]
pub struct Cli {
    /// Defaults to `summarize` with the plain summary variant
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the markdown summary (and charts, if enabled)
    Summarize(SummarizeArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone, Default)]
pub struct SummarizeArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Preset to start from: summary, charted
    #[arg(long)]
    pub variant: Option<Variant>,

    /// Scan results (JSON array of records)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Markdown output path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Directory for generated chart images
    #[arg(long)]
    pub chart_dir: Option<String>,

    /// Render EPSS and CVSS histograms
    #[arg(long, conflicts_with = "no_charts")]
    pub charts: bool,

    /// Skip the histograms and link the configured external charts
    #[arg(long)]
    pub no_charts: bool,

    /// Average only scores above zero
    #[arg(long, conflicts_with = "mean_includes_zero")]
    pub mean_excludes_zero: bool,

    /// Average over every record, zero scores included
    #[arg(long)]
    pub mean_includes_zero: bool,

    /// Fail when the input file does not exist
    #[arg(long, conflicts_with = "missing_input_ok")]
    pub missing_input_fatal: bool,

    /// Write an empty summary when the input file does not exist
    #[arg(long)]
    pub missing_input_ok: bool,

    /// Leave out the collapsible full CVE table
    #[arg(long)]
    pub no_full_table: bool,

    /// Print summary statistics as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
