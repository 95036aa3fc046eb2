use serde::{Deserialize, Serialize};
use super::record::VulnerabilityRecord;
use super::tier::RiskTier;

/// Aggregate statistics and tier partition for one scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total_cves: usize,
    pub kev_count: usize,
    pub mean_epss: f64,
    pub mean_cvss: f64,
    pub high_risk: Vec<VulnerabilityRecord>,
    pub medium_risk: Vec<VulnerabilityRecord>,
    pub low_risk: Vec<VulnerabilityRecord>,
}

impl ScanSummary {
    pub fn tier(&self, tier: RiskTier) -> &[VulnerabilityRecord] {
        match tier {
            RiskTier::High => &self.high_risk,
            RiskTier::Medium => &self.medium_risk,
            RiskTier::Low => &self.low_risk,
        }
    }
}
