use std::path::PathBuf;
use crate::cli::commands::{SummarizeArgs, ValidateArgs};
use crate::cli::summarize::build_pipeline_config;
use crate::config;
use crate::errors::ReportError;

/// Parse the file and check the configuration it resolves to, without running anything.
pub fn handle_validate(args: ValidateArgs) -> Result<(), ReportError> {
    let path = PathBuf::from(&args.config);
    let file_config = config::parse_config(&path)?;
    let resolved = build_pipeline_config(&SummarizeArgs::default(), Some(&file_config));
    config::validate_conflicts(&resolved)?;
    println!("Configuration is valid: {}", args.config);
    Ok(())
}
