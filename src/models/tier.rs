use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of the high-risk tier.
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;
/// Lower bound (inclusive) of the medium-risk tier.
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.3;

/// Risk tier derived from a record's EPSS score, ordered from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    High,
    Medium,
    Low,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [RiskTier::High, RiskTier::Medium, RiskTier::Low];

    /// Every score lands in exactly one tier. NaN compares false against both
    /// thresholds and therefore falls through to `Low`.
    pub fn classify(epss: f64) -> Self {
        if epss >= HIGH_RISK_THRESHOLD {
            RiskTier::High
        } else if epss >= MEDIUM_RISK_THRESHOLD {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            RiskTier::High => "🔴",
            RiskTier::Medium => "🟠",
            RiskTier::Low => "🟢",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            RiskTier::High => "🚨 High-Risk Vulnerabilities (EPSS ≥ 0.7)",
            RiskTier::Medium => "⚠️ Medium-Risk Vulnerabilities (0.3 ≤ EPSS < 0.7)",
            RiskTier::Low => "✅ Low-Risk Vulnerabilities (EPSS < 0.3)",
        }
    }
}
