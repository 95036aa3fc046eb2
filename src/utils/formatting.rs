/// EPSS scores are shown with two decimals everywhere in the report.
pub fn format_epss(score: f64) -> String {
    format!("{:.2}", score)
}

pub fn format_cvss(score: f64) -> String {
    format!("{:.1}", score)
}

pub fn kev_glyph(in_kev: bool) -> &'static str {
    if in_kev { "✅" } else { "❌" }
}

/// Substitute every `{cve}` placeholder in `template`.
pub fn lookup_url(template: &str, cve: &str) -> String {
    template.replace("{cve}", cve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_precision() {
        assert_eq!(format_epss(0.9), "0.90");
        assert_eq!(format_epss(0.0), "0.00");
        assert_eq!(format_epss(0.123456), "0.12");
        assert_eq!(format_cvss(9.76), "9.8");
        assert_eq!(format_cvss(0.0), "0.0");
        assert_eq!(format_cvss(10.0), "10.0");
    }

    #[test]
    fn test_lookup_url() {
        assert_eq!(
            lookup_url("https://www.exploit-db.com/search?cve={cve}", "CVE-2024-3094"),
            "https://www.exploit-db.com/search?cve=CVE-2024-3094"
        );
        assert_eq!(lookup_url("https://x/{cve}/{cve}", "A"), "https://x/A/A");
    }

    #[test]
    fn test_kev_glyph() {
        assert_eq!(kev_glyph(true), "✅");
        assert_eq!(kev_glyph(false), "❌");
    }
}
