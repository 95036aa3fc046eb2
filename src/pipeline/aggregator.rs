use crate::models::{RiskTier, ScanSummary, VulnerabilityRecord};

/// Score sequences feeding the means and the histograms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSamples {
    pub epss: Vec<f64>,
    pub cvss: Vec<f64>,
}

/// With `exclude_zero` only scores strictly above zero are kept, which drops
/// every defaulted field along with genuine zeros.
pub fn score_samples(records: &[VulnerabilityRecord], exclude_zero: bool) -> ScoreSamples {
    let keep = |score: &f64| !exclude_zero || *score > 0.0;
    ScoreSamples {
        epss: records.iter().map(|r| r.epss_score).filter(keep).collect(),
        cvss: records.iter().map(|r| r.cvss_score).filter(keep).collect(),
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn compute_summary(records: &[VulnerabilityRecord], samples: &ScoreSamples) -> ScanSummary {
    let mut high_risk = Vec::new();
    let mut medium_risk = Vec::new();
    let mut low_risk = Vec::new();

    for record in records {
        match record.tier() {
            RiskTier::High => high_risk.push(record.clone()),
            RiskTier::Medium => medium_risk.push(record.clone()),
            RiskTier::Low => low_risk.push(record.clone()),
        }
    }

    ScanSummary {
        total_cves: records.len(),
        kev_count: records.iter().filter(|r| r.in_kev).count(),
        mean_epss: mean(&samples.epss),
        mean_cvss: mean(&samples.cvss),
        high_risk,
        medium_risk,
        low_risk,
    }
}
