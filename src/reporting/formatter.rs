use crate::models::{RiskTier, VulnerabilityRecord};
use crate::utils::formatting::{format_cvss, format_epss, kev_glyph, lookup_url};

/// External lookup link rendering shared by tier bullets and the full table.
#[derive(Debug, Clone, Copy)]
pub struct LookupLink<'a> {
    pub label: &'a str,
    pub template: &'a str,
}

impl LookupLink<'_> {
    pub fn url(&self, cve: &str) -> String {
        lookup_url(self.template, cve)
    }
}

pub fn format_tier_bullet(record: &VulnerabilityRecord, tier: RiskTier, link: LookupLink<'_>) -> String {
    format!(
        "- **{}** (EPSS: {}) {} [{}]({})",
        record.cve,
        format_epss(record.epss_score),
        tier.glyph(),
        link.label,
        link.url(&record.cve),
    )
}

pub fn format_table_row(record: &VulnerabilityRecord, link: LookupLink<'_>) -> String {
    format!(
        "| {} | {} | {} | {} | [Link]({}) |",
        record.cve,
        format_epss(record.epss_score),
        format_cvss(record.cvss_score),
        kev_glyph(record.in_kev),
        link.url(&record.cve),
    )
}
