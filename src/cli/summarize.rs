use std::path::PathBuf;
use console::style;
use serde::Serialize;
use crate::cli::commands::SummarizeArgs;
use crate::config::{self, SummaryConfig, Variant};
use crate::errors::ReportError;
use crate::models::ScanSummary;
use crate::pipeline::{PipelineConfig, PipelineOrchestrator, PipelineOutcome};
use tracing::info;

pub fn handle_summarize(args: SummarizeArgs, quiet: bool) -> Result<(), ReportError> {
    let file_config = match &args.config {
        Some(path) => Some(config::parse_config(&PathBuf::from(path))?),
        None => None,
    };

    let pipeline_config = build_pipeline_config(&args, file_config.as_ref());
    let outcome = PipelineOrchestrator::new(pipeline_config)?.run()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&SummaryStats::from(&outcome))?);
    } else if !quiet {
        println!(
            "{}",
            style(format!("✅ Markdown report generated: {}", outcome.markdown_path.display())).green()
        );
        for path in &outcome.chart_paths {
            println!("{}", style(format!("📈 Chart saved: {}", path.display())).green());
        }
    }

    info!(
        total = outcome.summary.total_cves,
        defaulted_fields = outcome.diagnostics.len(),
        "Summary completed"
    );

    Ok(())
}

/// Precedence: variant preset, then config file, then command-line flags.
pub fn build_pipeline_config(args: &SummarizeArgs, file_config: Option<&SummaryConfig>) -> PipelineConfig {
    let variant = args
        .variant
        .or_else(|| file_config.and_then(|c| c.variant))
        .unwrap_or(Variant::Summary);

    let mut config = PipelineConfig::preset(variant);
    if let Some(file) = file_config {
        config.apply_file_config(file);
    }

    if let Some(input) = &args.input {
        config.input_path = PathBuf::from(input);
    }
    if let Some(output) = &args.output {
        config.markdown_path = PathBuf::from(output);
    }
    if let Some(chart_dir) = &args.chart_dir {
        config.chart_dir = PathBuf::from(chart_dir);
    }
    let options = &mut config.options;
    if let Some(on) = flag_pair(args.charts, args.no_charts) {
        options.include_charts = on;
    }
    if let Some(on) = flag_pair(args.mean_excludes_zero, args.mean_includes_zero) {
        options.mean_excludes_zero_scores = on;
    }
    if let Some(on) = flag_pair(args.missing_input_fatal, args.missing_input_ok) {
        options.missing_input_is_fatal = on;
    }
    if args.no_full_table {
        options.include_full_table = false;
    }

    config
}

/// `Some(true)` for the positive flag, `Some(false)` for its negation, `None` when
/// neither was given. clap rejects both at once.
fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Machine-readable view of a run for `--json`.
#[derive(Debug, Serialize)]
struct SummaryStats<'a> {
    input_status: crate::pipeline::InputStatus,
    markdown_path: String,
    chart_paths: Vec<String>,
    defaulted_fields: usize,
    #[serde(flatten)]
    summary: &'a ScanSummary,
}

impl<'a> From<&'a PipelineOutcome> for SummaryStats<'a> {
    fn from(outcome: &'a PipelineOutcome) -> Self {
        Self {
            input_status: outcome.input_status,
            markdown_path: outcome.markdown_path.display().to_string(),
            chart_paths: outcome.chart_paths.iter().map(|p| p.display().to_string()).collect(),
            defaulted_fields: outcome.diagnostics.len(),
            summary: &outcome.summary,
        }
    }
}
