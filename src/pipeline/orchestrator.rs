use std::path::PathBuf;
use crate::config::{validate_conflicts, ChartLink};
use crate::errors::ReportError;
use crate::reporting::charts::write_charts;
use crate::reporting::formatter::LookupLink;
use crate::reporting::markdown::{relative_link, render_markdown, MarkdownOptions};
use crate::utils::output::write_atomic;
use super::aggregator::{compute_summary, score_samples};
use super::loader::load_entries;
use super::normalizer::{normalize_entries, Normalized};
use super::state::*;
use tracing::{debug, info};

/// Runs load → normalize → aggregate → render for one configuration.
pub struct PipelineOrchestrator {
    config: PipelineConfig,
}

impl PipelineOrchestrator {
    pub fn new(config: PipelineConfig) -> Result<Self, ReportError> {
        validate_conflicts(&config)?;
        Ok(Self { config })
    }

    pub fn run(&self) -> Result<PipelineOutcome, ReportError> {
        let config = &self.config;
        let options = config.options;
        debug!(?options, input = %config.input_path.display(), "Pipeline starting");

        let loaded = load_entries(&config.input_path, options.missing_input_is_fatal)?;
        let Normalized { records, diagnostics } = normalize_entries(loaded.entries);
        if !diagnostics.is_empty() {
            info!(count = diagnostics.len(), "Defaulted record fields during normalization");
        }

        let samples = score_samples(&records, options.mean_excludes_zero_scores);
        let summary = compute_summary(&records, &samples);
        info!(
            total = summary.total_cves,
            kev = summary.kev_count,
            high = summary.high_risk.len(),
            medium = summary.medium_risk.len(),
            low = summary.low_risk.len(),
            "Summary computed"
        );

        let (chart_links, chart_paths): (Vec<ChartLink>, Vec<PathBuf>) = if options.include_charts {
            let rendered = write_charts(&samples, &config.chart_dir)?;
            let links = rendered
                .iter()
                .map(|c| ChartLink::new(c.title, &relative_link(&config.markdown_path, &c.path)))
                .collect();
            (links, rendered.into_iter().map(|c| c.path).collect())
        } else {
            (config.external_charts.clone(), Vec::new())
        };

        let markdown = render_markdown(
            &summary,
            &MarkdownOptions {
                link: LookupLink {
                    label: &config.lookup_label,
                    template: &config.lookup_url_template,
                },
                charts: &chart_links,
                full_table: options.include_full_table.then_some(records.as_slice()),
            },
        );
        write_atomic(&config.markdown_path, markdown.as_bytes())?;
        info!(path = %config.markdown_path.display(), bytes = markdown.len(), "Markdown report written");

        Ok(PipelineOutcome {
            input_status: loaded.status,
            summary,
            diagnostics,
            markdown,
            markdown_path: config.markdown_path.clone(),
            chart_paths,
        })
    }
}
