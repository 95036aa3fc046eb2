use serde::{Deserialize, Serialize};
use std::fmt;

/// Record field that can be defaulted during decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordField {
    #[serde(rename = "CVE")]
    Cve,
    #[serde(rename = "EPSS_Score")]
    EpssScore,
    #[serde(rename = "CVSS_Score")]
    CvssScore,
    #[serde(rename = "In_KEV")]
    InKev,
}

impl RecordField {
    pub fn key(&self) -> &'static str {
        match self {
            RecordField::Cve => "CVE",
            RecordField::EpssScore => "EPSS_Score",
            RecordField::CvssScore => "CVSS_Score",
            RecordField::InKev => "In_KEV",
        }
    }
}

/// Why a field was replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "found")]
pub enum FieldIssue {
    Missing,
    Null,
    /// Present with a JSON type the field does not accept.
    WrongType(String),
}

/// One defaulted field in one input record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeDiagnostic {
    /// Position of the record in the input array.
    pub index: usize,
    pub cve: String,
    pub field: RecordField,
    pub issue: FieldIssue,
}

impl fmt::Display for DecodeDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let issue = match &self.issue {
            FieldIssue::Missing => "missing".to_string(),
            FieldIssue::Null => "null".to_string(),
            FieldIssue::WrongType(found) => format!("expected {}, found {}", expected_type(self.field), found),
        };
        write!(f, "record {} ({}): {} {}", self.index, self.cve, self.field.key(), issue)
    }
}

fn expected_type(field: RecordField) -> &'static str {
    match field {
        RecordField::Cve => "string",
        RecordField::EpssScore | RecordField::CvssScore => "number",
        RecordField::InKev => "boolean",
    }
}
