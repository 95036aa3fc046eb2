use serde::{Deserialize, Serialize};
use super::tier::RiskTier;

/// CVE id used when a record carries no usable `CVE` field.
pub const UNKNOWN_CVE: &str = "UNKNOWN";

/// A single scanned vulnerability after normalization.
///
/// Field names serialize with the same keys the scanner emits so a summary can be
/// written back out as JSON without a translation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityRecord {
    #[serde(rename = "CVE")]
    pub cve: String,
    /// Exploit probability, nominally in [0, 1]. Not clamped.
    #[serde(rename = "EPSS_Score")]
    pub epss_score: f64,
    /// Severity, nominally in [0, 10]. Not clamped.
    #[serde(rename = "CVSS_Score")]
    pub cvss_score: f64,
    #[serde(rename = "In_KEV")]
    pub in_kev: bool,
}

impl VulnerabilityRecord {
    pub fn new(cve: impl Into<String>, epss_score: f64, cvss_score: f64, in_kev: bool) -> Self {
        Self {
            cve: cve.into(),
            epss_score,
            cvss_score,
            in_kev,
        }
    }

    pub fn tier(&self) -> RiskTier {
        RiskTier::classify(self.epss_score)
    }
}
