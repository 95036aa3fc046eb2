use serde_json::{Map, Value};
use tracing::debug;
use crate::models::{DecodeDiagnostic, FieldIssue, RecordField, VulnerabilityRecord, UNKNOWN_CVE};
use super::loader::json_type_name;

/// Typed records plus one diagnostic for every field that fell back to its default.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub records: Vec<VulnerabilityRecord>,
    pub diagnostics: Vec<DecodeDiagnostic>,
}

pub fn normalize_entries(entries: Vec<Value>) -> Normalized {
    let mut normalized = Normalized::default();
    for (index, entry) in entries.into_iter().enumerate() {
        let empty = Map::new();
        let fields = entry.as_object().unwrap_or(&empty);
        let record = decode_record(index, fields, &mut normalized.diagnostics);
        normalized.records.push(record);
    }

    for diag in &normalized.diagnostics {
        debug!(diagnostic = %diag, "Field defaulted");
    }

    normalized
}

/// Decode one record. Scores are kept when they are JSON numbers or booleans (1.0/0.0);
/// anything else, including numeric strings, becomes 0.0.
pub fn decode_record(
    index: usize,
    fields: &Map<String, Value>,
    diagnostics: &mut Vec<DecodeDiagnostic>,
) -> VulnerabilityRecord {
    let mut issues: Vec<(RecordField, FieldIssue)> = Vec::new();

    let cve = match fields.get("CVE") {
        Some(Value::String(s)) => s.clone(),
        other => {
            issues.push((RecordField::Cve, issue_for(other)));
            UNKNOWN_CVE.to_string()
        }
    };

    let epss_score = decode_score(fields.get("EPSS_Score"), RecordField::EpssScore, &mut issues);
    let cvss_score = decode_score(fields.get("CVSS_Score"), RecordField::CvssScore, &mut issues);

    let in_kev = match fields.get("In_KEV") {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            issues.push((RecordField::InKev, issue_for(Some(other))));
            is_truthy(other)
        }
    };

    diagnostics.extend(issues.into_iter().map(|(field, issue)| DecodeDiagnostic {
        index,
        cve: cve.clone(),
        field,
        issue,
    }));

    VulnerabilityRecord {
        cve,
        epss_score,
        cvss_score,
        in_kev,
    }
}

fn decode_score(
    value: Option<&Value>,
    field: RecordField,
    issues: &mut Vec<(RecordField, FieldIssue)>,
) -> f64 {
    let score = match value {
        Some(Value::Bool(flag)) => Some(if *flag { 1.0 } else { 0.0 }),
        other => other.and_then(Value::as_f64),
    };
    match score {
        Some(score) => score,
        None => {
            issues.push((field, issue_for(value)));
            0.0
        }
    }
}

fn issue_for(value: Option<&Value>) -> FieldIssue {
    match value {
        None => FieldIssue::Missing,
        Some(Value::Null) => FieldIssue::Null,
        Some(other) => FieldIssue::WrongType(json_type_name(other).to_string()),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> (VulnerabilityRecord, Vec<DecodeDiagnostic>) {
        let mut diagnostics = Vec::new();
        let record = decode_record(0, value.as_object().unwrap(), &mut diagnostics);
        (record, diagnostics)
    }

    #[test]
    fn test_complete_record_has_no_diagnostics() {
        let (record, diags) = decode(json!({
            "CVE": "CVE-2024-3094", "EPSS_Score": 0.85, "CVSS_Score": 10.0, "In_KEV": true
        }));
        assert_eq!(record, VulnerabilityRecord::new("CVE-2024-3094", 0.85, 10.0, true));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_integer_scores_kept() {
        let (record, diags) = decode(json!({"CVE": "CVE-1", "EPSS_Score": 0, "CVSS_Score": 7}));
        assert_eq!(record.epss_score, 0.0);
        assert_eq!(record.cvss_score, 7.0);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_numeric_string_defaults_to_zero() {
        let (record, diags) = decode(json!({"CVE": "CVE-1", "EPSS_Score": "0.5", "CVSS_Score": 5.0}));
        assert_eq!(record.epss_score, 0.0);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].field, RecordField::EpssScore);
        assert_eq!(diags[0].issue, FieldIssue::WrongType("string".into()));
    }

    #[test]
    fn test_missing_and_null_scores() {
        let (record, diags) = decode(json!({"CVE": "CVE-1", "CVSS_Score": null}));
        assert_eq!(record.epss_score, 0.0);
        assert_eq!(record.cvss_score, 0.0);
        assert!(!record.in_kev);
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].issue, FieldIssue::Missing);
        assert_eq!(diags[1].issue, FieldIssue::Null);
    }

    #[test]
    fn test_boolean_scores_count_as_numbers() {
        let (record, diags) = decode(json!({"CVE": "CVE-1", "EPSS_Score": true, "CVSS_Score": false}));
        assert_eq!(record.epss_score, 1.0);
        assert_eq!(record.cvss_score, 0.0);
        assert_eq!(record.tier(), crate::models::RiskTier::High);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_out_of_range_passes_through() {
        let (record, diags) = decode(json!({"CVE": "CVE-1", "EPSS_Score": 1.5, "CVSS_Score": 12.3}));
        assert_eq!(record.epss_score, 1.5);
        assert_eq!(record.cvss_score, 12.3);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_kev_truthiness() {
        let (record, diags) = decode(json!({"CVE": "CVE-1", "EPSS_Score": 0.1, "CVSS_Score": 1.0, "In_KEV": "yes"}));
        assert!(record.in_kev);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].field, RecordField::InKev);

        let (record, _) = decode(json!({"CVE": "CVE-1", "EPSS_Score": 0.1, "CVSS_Score": 1.0, "In_KEV": 0}));
        assert!(!record.in_kev);
    }

    #[test]
    fn test_missing_cve_uses_placeholder() {
        let (record, diags) = decode(json!({"EPSS_Score": 0.2, "CVSS_Score": 3.0}));
        assert_eq!(record.cve, UNKNOWN_CVE);
        assert_eq!(diags[0].field, RecordField::Cve);
        assert_eq!(diags[0].cve, UNKNOWN_CVE);
    }

    #[test]
    fn test_normalize_keeps_order_and_duplicates() {
        let entries = vec![
            json!({"CVE": "CVE-A", "EPSS_Score": 0.1, "CVSS_Score": 1.0}),
            json!({"CVE": "CVE-A", "EPSS_Score": 0.1, "CVSS_Score": 1.0}),
            json!({"CVE": "CVE-B"}),
        ];
        let normalized = normalize_entries(entries);
        assert_eq!(normalized.records.len(), 3);
        assert_eq!(normalized.records[0].cve, "CVE-A");
        assert_eq!(normalized.records[1].cve, "CVE-A");
        assert_eq!(normalized.diagnostics.len(), 2);
        assert!(normalized.diagnostics.iter().all(|d| d.index == 2));
    }
}
