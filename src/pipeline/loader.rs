use std::path::Path;
use console::style;
use serde_json::Value;
use tracing::{debug, info};
use crate::errors::ReportError;
use super::state::InputStatus;

/// Raw record objects read from the input file, before normalization.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub status: InputStatus,
    pub entries: Vec<Value>,
}

impl LoadOutcome {
    fn empty(status: InputStatus) -> Self {
        Self { status, entries: Vec::new() }
    }
}

const NO_VULNERABILITIES: &str = "⚠️ No vulnerabilities found. Creating a basic summary.";

// stdout is reserved for the report result (and `--json`).
fn warn_user(message: &str) {
    eprintln!("{}", style(message).for_stderr().yellow());
}

pub fn load_entries(path: &Path, missing_is_fatal: bool) -> Result<LoadOutcome, ReportError> {
    if !path.exists() {
        if missing_is_fatal {
            return Err(ReportError::MissingInput(path.to_path_buf()));
        }
        warn_user(&format!("⚠️ Warning: {} not found. Generating an empty summary.", path.display()));
        warn_user(NO_VULNERABILITIES);
        return Ok(LoadOutcome::empty(InputStatus::Missing));
    }

    let content = std::fs::read_to_string(path)?;
    let outcome = parse_entries(&content)?;

    if outcome.status == InputStatus::Empty {
        warn_user(NO_VULNERABILITIES);
    }
    info!(path = %path.display(), records = outcome.entries.len(), "Input loaded");

    Ok(outcome)
}

/// Parse file content into record objects. Blank content and falsy JSON values mean
/// "no vulnerabilities"; any other non-array document is rejected.
pub fn parse_entries(content: &str) -> Result<LoadOutcome, ReportError> {
    let content = content.trim_start_matches('\u{feff}');
    if content.trim().is_empty() {
        debug!("Input file is blank");
        return Ok(LoadOutcome::empty(InputStatus::Empty));
    }

    let value: Value = serde_json::from_str(content)?;
    if is_falsy(&value) {
        return Ok(LoadOutcome::empty(InputStatus::Empty));
    }

    let entries = match value {
        Value::Array(entries) => entries,
        other => {
            return Err(ReportError::InvalidInput(format!(
                "expected a JSON array of records, found {}",
                json_type_name(&other)
            )));
        }
    };

    if let Some((index, entry)) = entries.iter().enumerate().find(|(_, e)| !e.is_object()) {
        return Err(ReportError::InvalidInput(format!(
            "record {} is {}, expected an object",
            index,
            json_type_name(entry)
        )));
    }

    Ok(LoadOutcome {
        status: InputStatus::Loaded,
        entries,
    })
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
