use std::path::PathBuf;
use serde::Serialize;
use crate::config::{ChartLink, SummaryConfig, Variant};
use crate::models::{DecodeDiagnostic, ScanSummary};

pub const DEFAULT_INPUT_PATH: &str = "vulnerability_report.json";
pub const DEFAULT_LOOKUP_URL_TEMPLATE: &str = "https://www.exploit-db.com/search?cve={cve}";
pub const DEFAULT_LOOKUP_LABEL: &str = "ExploitDB";

/// Behaviour switches that distinguish the two report variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipelineOptions {
    pub include_charts: bool,
    /// Average only scores strictly above zero, so defaulted fields do not drag the mean down.
    pub mean_excludes_zero_scores: bool,
    pub missing_input_is_fatal: bool,
    pub include_full_table: bool,
}

impl PipelineOptions {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Summary => Self {
                include_charts: false,
                mean_excludes_zero_scores: false,
                missing_input_is_fatal: false,
                include_full_table: true,
            },
            Variant::Charted => Self {
                include_charts: true,
                mean_excludes_zero_scores: true,
                missing_input_is_fatal: true,
                include_full_table: false,
            },
        }
    }
}

/// Fully resolved configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub markdown_path: PathBuf,
    pub chart_dir: PathBuf,
    pub options: PipelineOptions,
    pub lookup_url_template: String,
    pub lookup_label: String,
    /// Referenced in the charts section when `include_charts` is off.
    pub external_charts: Vec<ChartLink>,
}

impl PipelineConfig {
    pub fn preset(variant: Variant) -> Self {
        let (markdown_path, chart_dir) = match variant {
            Variant::Summary => (PathBuf::from("summary.md"), PathBuf::from("charts")),
            Variant::Charted => (PathBuf::from("output/summary.md"), PathBuf::from("output/charts")),
        };

        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            markdown_path,
            chart_dir,
            options: PipelineOptions::for_variant(variant),
            lookup_url_template: DEFAULT_LOOKUP_URL_TEMPLATE.to_string(),
            lookup_label: DEFAULT_LOOKUP_LABEL.to_string(),
            external_charts: vec![
                ChartLink::new("EPSS Score Distribution", "charts/epss_distribution.png"),
                ChartLink::new("KEV Coverage", "charts/kev_pie_chart.png"),
                ChartLink::new("EPSS vs. CVSS", "charts/epss_vs_cvss.png"),
            ],
        }
    }

    /// Overlay every field the config file sets. The file's `variant` is not
    /// consulted here; callers pick the preset before overlaying.
    pub fn apply_file_config(&mut self, file: &SummaryConfig) {
        if let Some(path) = file.input.as_ref().and_then(|i| i.path.as_ref()) {
            self.input_path = PathBuf::from(path);
        }

        if let Some(output) = &file.output {
            if let Some(markdown) = &output.markdown {
                self.markdown_path = PathBuf::from(markdown);
            }
            if let Some(chart_dir) = &output.chart_dir {
                self.chart_dir = PathBuf::from(chart_dir);
            }
        }

        if let Some(options) = &file.options {
            if let Some(v) = options.include_charts {
                self.options.include_charts = v;
            }
            if let Some(v) = options.mean_excludes_zero_scores {
                self.options.mean_excludes_zero_scores = v;
            }
            if let Some(v) = options.missing_input_is_fatal {
                self.options.missing_input_is_fatal = v;
            }
            if let Some(v) = options.include_full_table {
                self.options.include_full_table = v;
            }
        }

        if let Some(external) = file.charts.as_ref().and_then(|c| c.external.as_ref()) {
            self.external_charts = external.clone();
        }

        if let Some(links) = &file.links {
            if let Some(template) = &links.lookup_url_template {
                self.lookup_url_template = template.clone();
            }
            if let Some(label) = &links.lookup_label {
                self.lookup_label = label.clone();
            }
        }
    }
}

/// How the loader found the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputStatus {
    Loaded,
    /// File absent; tolerated because `missing_input_is_fatal` is off.
    Missing,
    /// File present but blank or a falsy JSON value.
    Empty,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub input_status: InputStatus,
    pub summary: ScanSummary,
    pub diagnostics: Vec<DecodeDiagnostic>,
    pub markdown: String,
    pub markdown_path: PathBuf,
    pub chart_paths: Vec<PathBuf>,
}
