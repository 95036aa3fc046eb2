use std::path::{Component, Path};
use crate::config::ChartLink;
use crate::models::{RiskTier, ScanSummary, VulnerabilityRecord};
use crate::utils::formatting::{format_cvss, format_epss};
use super::formatter::{format_table_row, format_tier_bullet, LookupLink};

const SECTION_RULE: &str = "\n\n---\n\n";

/// Inputs for one markdown document besides the summary itself.
#[derive(Debug, Clone)]
pub struct MarkdownOptions<'a> {
    pub link: LookupLink<'a>,
    pub charts: &'a [ChartLink],
    /// When set, every record is listed in a collapsible table.
    pub full_table: Option<&'a [VulnerabilityRecord]>,
}

/// Render the summary document. Output depends only on the arguments, so identical
/// input always yields identical bytes.
pub fn render_markdown(summary: &ScanSummary, options: &MarkdownOptions<'_>) -> String {
    let mut md = String::new();

    md.push_str("# 📊 Vulnerability Scan Summary\n\n");
    md.push_str(&format_overview(summary));

    for tier in RiskTier::ALL {
        md.push_str(SECTION_RULE);
        md.push_str(&format!("## {}\n", tier.heading()));
        md.push_str(&format_tier_list(summary.tier(tier), tier, options.link));
    }

    if !options.charts.is_empty() {
        md.push_str(SECTION_RULE);
        md.push_str("## 📈 Charts Summary\n");
        let images: Vec<String> = options
            .charts
            .iter()
            .map(|c| format!("![{}]({})", c.title, c.path))
            .collect();
        md.push_str(&images.join("\n"));
    }

    if let Some(records) = options.full_table {
        md.push_str(SECTION_RULE);
        md.push_str(&format_full_table(records, options.link));
    }

    md.push_str(SECTION_RULE.trim_end());
    md.push('\n');
    md
}

fn format_overview(summary: &ScanSummary) -> String {
    format!(
        "## 🛡️ Overview\n- 🔎 **Total CVEs Scanned: {}**\n- 🛑 **Total KEV CVEs: {}**\n- 📉 **Average EPSS Score: {}**\n- 💣 **Average CVSS Score: {}**",
        summary.total_cves,
        summary.kev_count,
        format_epss(summary.mean_epss),
        format_cvss(summary.mean_cvss),
    )
}

fn format_tier_list(records: &[VulnerabilityRecord], tier: RiskTier, link: LookupLink<'_>) -> String {
    if records.is_empty() {
        return "None".to_string();
    }
    records
        .iter()
        .map(|r| format_tier_bullet(r, tier, link))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_full_table(records: &[VulnerabilityRecord], link: LookupLink<'_>) -> String {
    let mut table = format!(
        "## 📜 Full CVE Report\n<details>\n<summary>Click to Expand Full Report</summary>\n\n\
         | CVE ID | EPSS Score | CVSS Score | In KEV? | {} |\n\
         |--------|------------|------------|---------|-----------|\n",
        link.label,
    );
    if records.is_empty() {
        table.push_str("| No vulnerabilities found | - | - | - | - |");
    } else {
        let rows: Vec<String> = records.iter().map(|r| format_table_row(r, link)).collect();
        table.push_str(&rows.join("\n"));
    }
    table.push_str("\n</details>");
    table
}

/// Path of `target` as seen from the directory holding `markdown_path`, with `/`
/// separators. Walks up with `..` when the target sits outside that directory.
/// A relative path mixed with an absolute one is resolved against the working
/// directory first.
pub fn relative_link(markdown_path: &Path, target: &Path) -> String {
    let base = markdown_path.parent().unwrap_or(Path::new(""));
    let (base, target) = if base.is_absolute() == target.is_absolute() {
        (base.to_path_buf(), target.to_path_buf())
    } else {
        match std::env::current_dir() {
            Ok(cwd) => (cwd.join(base), cwd.join(target)),
            Err(_) => return slash_path(&path_components(target)),
        }
    };

    let base = path_components(&base);
    let target = path_components(&target);
    let common = base.iter().zip(&target).take_while(|(a, b)| a == b).count();

    let mut parts = Vec::new();
    for component in &base[common..] {
        match component {
            Component::Normal(_) => parts.push("..".to_string()),
            // `..` or a root left in the base cannot be walked back
            _ => return slash_path(&target),
        }
    }
    for component in &target[common..] {
        match component {
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
            Component::ParentDir => parts.push("..".to_string()),
            _ => return slash_path(&target),
        }
    }
    parts.join("/")
}

fn path_components(path: &Path) -> Vec<Component<'_>> {
    path.components().filter(|c| !matches!(c, Component::CurDir)).collect()
}

/// Join components with `/`. A leading root yields exactly one slash.
fn slash_path(components: &[Component<'_>]) -> String {
    let mut out = String::new();
    for component in components {
        match component {
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::RootDir => out.push('/'),
            Component::CurDir => {}
            Component::ParentDir | Component::Normal(_) => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&component.as_os_str().to_string_lossy());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::aggregator::{compute_summary, score_samples};
    use std::path::PathBuf;

    const LINK: LookupLink<'static> = LookupLink {
        label: "ExploitDB",
        template: "https://www.exploit-db.com/search?cve={cve}",
    };

    fn summarize(records: &[VulnerabilityRecord]) -> ScanSummary {
        compute_summary(records, &score_samples(records, false))
    }

    fn section<'a>(md: &'a str, heading: &str) -> &'a str {
        let start = md.find(heading).unwrap() + heading.len();
        let rest = &md[start..];
        let end = rest.find("---").unwrap_or(rest.len());
        &rest[..end]
    }

    #[test]
    fn test_three_tiers_one_bullet_each() {
        let records = vec![
            VulnerabilityRecord::new("CVE-2024-0001", 0.9, 9.8, true),
            VulnerabilityRecord::new("CVE-2024-0002", 0.5, 6.5, false),
            VulnerabilityRecord::new("CVE-2024-0003", 0.1, 3.1, false),
        ];
        let summary = summarize(&records);
        let options = MarkdownOptions { link: LINK, charts: &[], full_table: None };
        let md = render_markdown(&summary, &options);

        assert!(md.contains("Total CVEs Scanned: 3"));
        assert!(md.contains("Total KEV CVEs: 1"));
        for (tier, cve) in RiskTier::ALL.iter().zip(["CVE-2024-0001", "CVE-2024-0002", "CVE-2024-0003"]) {
            let body = section(&md, tier.heading());
            let bullets: Vec<&str> = body.lines().filter(|l| l.starts_with("- ")).collect();
            assert_eq!(bullets.len(), 1, "tier {:?}", tier);
            assert!(bullets[0].contains(cve));
            assert!(bullets[0].contains(tier.glyph()));
        }
    }

    #[test]
    fn test_empty_summary_shows_none_everywhere() {
        let summary = summarize(&[]);
        let options = MarkdownOptions { link: LINK, charts: &[], full_table: Some(&[][..]) };
        let md = render_markdown(&summary, &options);

        assert!(md.contains("Total CVEs Scanned: 0"));
        assert!(md.contains("Average EPSS Score: 0.00"));
        assert!(md.contains("Average CVSS Score: 0.0"));
        for tier in RiskTier::ALL {
            assert_eq!(section(&md, tier.heading()).trim(), "None");
        }
        assert!(md.contains("| No vulnerabilities found | - | - | - | - |"));
    }

    #[test]
    fn test_full_table_rows() {
        let records = vec![
            VulnerabilityRecord::new("CVE-2024-0001", 0.9, 9.8, true),
            VulnerabilityRecord::new("CVE-2024-0001", 0.9, 9.8, true),
        ];
        let summary = summarize(&records);
        let options = MarkdownOptions { link: LINK, charts: &[], full_table: Some(records.as_slice()) };
        let md = render_markdown(&summary, &options);

        let rows = md.lines().filter(|l| l.starts_with("| CVE-2024-0001 |")).count();
        assert_eq!(rows, 2);
        assert!(md.contains("<details>"));
        assert!(md.contains("</details>"));
    }

    #[test]
    fn test_table_omitted_when_disabled() {
        let summary = summarize(&[]);
        let options = MarkdownOptions { link: LINK, charts: &[], full_table: None };
        let md = render_markdown(&summary, &options);
        assert!(!md.contains("Full CVE Report"));
        assert!(!md.contains("Charts Summary"));
    }

    #[test]
    fn test_chart_references() {
        let charts = vec![
            ChartLink::new("EPSS Score Distribution", "charts/epss_distribution.png"),
            ChartLink::new("CVSS Score Distribution", "charts/cvss_distribution.png"),
        ];
        let summary = summarize(&[]);
        let options = MarkdownOptions { link: LINK, charts: &charts, full_table: None };
        let md = render_markdown(&summary, &options);
        assert!(md.contains("![EPSS Score Distribution](charts/epss_distribution.png)\n![CVSS Score Distribution](charts/cvss_distribution.png)"));
    }

    #[test]
    fn test_section_order() {
        let charts = vec![ChartLink::new("EPSS", "charts/e.png")];
        let summary = summarize(&[]);
        let options = MarkdownOptions { link: LINK, charts: &charts, full_table: Some(&[][..]) };
        let md = render_markdown(&summary, &options);

        let positions: Vec<usize> = [
            "# 📊 Vulnerability Scan Summary",
            "## 🛡️ Overview",
            RiskTier::High.heading(),
            RiskTier::Medium.heading(),
            RiskTier::Low.heading(),
            "## 📈 Charts Summary",
            "## 📜 Full CVE Report",
        ]
        .iter()
        .map(|h| md.find(h).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(md.ends_with("---\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let records = vec![
            VulnerabilityRecord::new("CVE-2024-0001", 0.42, 5.5, false),
            VulnerabilityRecord::new("CVE-2024-0002", 0.77, 8.1, true),
        ];
        let summary = summarize(&records);
        let options = MarkdownOptions { link: LINK, charts: &[], full_table: Some(records.as_slice()) };
        assert_eq!(render_markdown(&summary, &options), render_markdown(&summary, &options));
    }

    #[test]
    fn test_relative_link() {
        assert_eq!(
            relative_link(Path::new("output/summary.md"), Path::new("output/charts/epss_distribution.png")),
            "charts/epss_distribution.png"
        );
        assert_eq!(
            relative_link(Path::new("summary.md"), Path::new("charts/cvss_distribution.png")),
            "charts/cvss_distribution.png"
        );
        assert_eq!(
            relative_link(Path::new("reports/summary.md"), &PathBuf::from("./img/epss.png")),
            "img/epss.png"
        );
    }

    #[test]
    fn test_relative_link_walks_up_to_sibling_directory() {
        assert_eq!(
            relative_link(Path::new("reports/summary.md"), Path::new("output/charts/epss_distribution.png")),
            "../output/charts/epss_distribution.png"
        );
        assert_eq!(
            relative_link(Path::new("a/b/summary.md"), Path::new("a/charts/cvss_distribution.png")),
            "../charts/cvss_distribution.png"
        );
    }

    #[test]
    fn test_relative_link_between_absolute_paths() {
        let link = relative_link(
            Path::new("/tmp/run/reports/summary.md"),
            Path::new("/tmp/run/charts/epss_distribution.png"),
        );
        assert_eq!(link, "../charts/epss_distribution.png");
        assert!(!link.starts_with("//"));
    }

    #[test]
    fn test_relative_link_mixed_absolute_and_relative() {
        let cwd = std::env::current_dir().unwrap();
        let link = relative_link(Path::new("summary.md"), &cwd.join("charts/epss_distribution.png"));
        assert_eq!(link, "charts/epss_distribution.png");
    }

    #[test]
    fn test_slash_path_single_leading_slash() {
        let path = Path::new("/tmp/run/charts/e.png");
        let components: Vec<Component<'_>> = path.components().collect();
        assert_eq!(slash_path(&components), "/tmp/run/charts/e.png");
    }
}
