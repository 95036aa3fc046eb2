use serde::{Deserialize, Serialize};

/// On-disk configuration. Every field is optional and overlays the selected variant preset.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SummaryConfig {
    pub variant: Option<Variant>,
    pub input: Option<InputConfig>,
    pub output: Option<OutputConfig>,
    pub options: Option<OptionsConfig>,
    pub charts: Option<ChartsConfig>,
    pub links: Option<LinksConfig>,
}

/// The two report flavours the tool grew: a plain summary with a full table, and a
/// charted summary written into an output directory.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Summary,
    Charted,
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summary" => Ok(Variant::Summary),
            "charted" => Ok(Variant::Charted),
            other => Err(format!("Invalid variant: {} (expected summary or charted)", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct InputConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OutputConfig {
    pub markdown: Option<String>,
    pub chart_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OptionsConfig {
    pub include_charts: Option<bool>,
    pub mean_excludes_zero_scores: Option<bool>,
    pub missing_input_is_fatal: Option<bool>,
    pub include_full_table: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ChartsConfig {
    /// Pre-rendered images referenced when charts are not generated.
    pub external: Option<Vec<ChartLink>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ChartLink {
    pub title: String,
    pub path: String,
}

impl ChartLink {
    pub fn new(title: &str, path: &str) -> Self {
        Self {
            title: title.to_string(),
            path: path.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LinksConfig {
    /// URL with a `{cve}` placeholder.
    pub lookup_url_template: Option<String>,
    /// Link text shown next to each CVE.
    pub lookup_label: Option<String>,
}
