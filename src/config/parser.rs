use std::path::Path;
use crate::errors::ReportError;
use crate::pipeline::state::PipelineConfig;
use super::types::SummaryConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

const MAX_CONFIG_BYTES: u64 = 1_048_576;

pub fn parse_config(path: &Path) -> Result<SummaryConfig, ReportError> {
    if !path.exists() {
        return Err(ReportError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = std::fs::metadata(path)?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(ReportError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = std::fs::read_to_string(path)?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<SummaryConfig, ReportError> {
    // An empty document is a valid "no overrides" config.
    if content.trim().is_empty() {
        return Ok(SummaryConfig::default());
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    // JSON Schema validation
    validate_schema(&yaml)?;

    // Parse into typed config
    let config: SummaryConfig = serde_yaml::from_value(yaml)?;

    validate_file_config(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), ReportError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| ReportError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| ReportError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only: typed parsing below is the hard gate.
        for e in errors {
            let msg = format!("{} at {}", e, e.instance_path);
            warn!(validation_error = %msg, "Config schema warning");
        }
    }

    Ok(())
}

fn validate_file_config(config: &SummaryConfig) -> Result<(), ReportError> {
    if let Some(external) = config.charts.as_ref().and_then(|c| c.external.as_ref()) {
        if let Some(link) = external.iter().find(|l| l.path.trim().is_empty()) {
            return Err(ReportError::Config(format!(
                "External chart '{}' has an empty path",
                link.title
            )));
        }
    }
    Ok(())
}

/// Detect conflicts in a fully resolved pipeline configuration.
pub fn validate_conflicts(config: &PipelineConfig) -> Result<(), ReportError> {
    if config.markdown_path.as_os_str().is_empty() {
        return Err(ReportError::Config("Markdown output path is empty".into()));
    }

    if config.input_path.as_os_str().is_empty() {
        return Err(ReportError::Config("Input path is empty".into()));
    }

    if config.options.include_charts && config.chart_dir.as_os_str().is_empty() {
        return Err(ReportError::Config(
            "Charts are enabled but no chart directory is configured".into(),
        ));
    }

    if !config.lookup_url_template.contains("{cve}") {
        warn!(
            template = %config.lookup_url_template,
            "Lookup URL template has no {{cve}} placeholder; every link will be identical"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use std::path::PathBuf;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
variant: charted
input:
  path: scans/latest.json
output:
  markdown: out/summary.md
  chart_dir: out/charts
options:
  include_charts: true
  mean_excludes_zero_scores: false
links:
  lookup_url_template: "https://nvd.nist.gov/vuln/detail/{cve}"
"#;
        let config = parse_config_str(yaml).unwrap();
        assert_eq!(config.variant, Some(Variant::Charted));
        assert_eq!(config.input.unwrap().path.as_deref(), Some("scans/latest.json"));
        let options = config.options.unwrap();
        assert_eq!(options.mean_excludes_zero_scores, Some(false));
        assert_eq!(options.missing_input_is_fatal, None);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = parse_config_str("  \n").unwrap();
        assert!(config.variant.is_none());
        assert!(config.options.is_none());
    }

    #[test]
    fn test_type_mismatch_is_error() {
        let yaml = "options:\n  include_charts: maybe\n";
        assert!(matches!(parse_config_str(yaml), Err(ReportError::Yaml(_))));
    }

    #[test]
    fn test_external_chart_empty_path_rejected() {
        let yaml = "charts:\n  external:\n    - title: EPSS\n      path: \"\"\n";
        assert!(matches!(parse_config_str(yaml), Err(ReportError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = parse_config(Path::new("/nonexistent/summary.yaml")).unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn test_conflicts_charts_without_dir() {
        let mut config = PipelineConfig::preset(Variant::Charted);
        config.chart_dir = PathBuf::new();
        assert!(validate_conflicts(&config).is_err());
    }

    #[test]
    fn test_conflicts_empty_markdown_path() {
        let mut config = PipelineConfig::preset(Variant::Summary);
        config.markdown_path = PathBuf::new();
        assert!(validate_conflicts(&config).is_err());
    }

    #[test]
    fn test_presets_have_no_conflicts() {
        assert!(validate_conflicts(&PipelineConfig::preset(Variant::Summary)).is_ok());
        assert!(validate_conflicts(&PipelineConfig::preset(Variant::Charted)).is_ok());
    }

    #[test]
    fn test_template_without_placeholder_is_only_a_warning() {
        let mut config = PipelineConfig::preset(Variant::Summary);
        config.lookup_url_template = "https://example.com/search".into();
        assert!(validate_conflicts(&config).is_ok());
    }
}
