//! Markdown reporter for audit results.
//!
//! Produces a report suitable for issues, pull requests and wikis. The
//! HTML/PDF rendering pipeline stays external; this is the text-only view
//! of the same data.

use crate::aggregator::AuditResult;
use crate::analyzer::{Finding, Severity};
use crate::reporter::Reporter;

pub struct MarkdownReporter;

impl MarkdownReporter {
    pub fn new() -> Self {
        Self
    }

    fn severity_emoji(&self, severity: Severity) -> &'static str {
        match severity {
            Severity::Critical => "\u{1F6A8}",    // 🚨
            Severity::High => "\u{26A0}\u{FE0F}", // ⚠️
            Severity::Medium => "\u{1F7E1}",      // 🟡
            Severity::Low => "\u{1F535}",         // 🔵
            Severity::Info => "\u{2139}\u{FE0F}", // ℹ️
        }
    }

    fn findings_section(&self, severity: Severity, findings: &[&Finding]) -> String {
        if findings.is_empty() {
            return String::new();
        }
        let mut output = format!(
            "## {} {} ({})\n\n",
            self.severity_emoji(severity),
            severity,
            findings.len()
        );
        output.push_str("| Region | Group | Category | Rule | Recommendation |\n");
        output.push_str("|--------|-------|----------|------|----------------|\n");
        for finding in findings {
            let rule = finding
                .rule
                .as_ref()
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string());
            output.push_str(&format!(
                "| {} | {} ({}) | {} | {} | {} |\n",
                finding.region,
                finding.group_id,
                finding.group_name,
                finding.category,
                rule,
                finding.recommendation
            ));
        }
        output.push('\n');
        output
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for MarkdownReporter {
    fn report(&self, result: &AuditResult) -> String {
        let mut output = String::new();
        let s = &result.summary;

        output.push_str("# AWS Security Group Audit\n\n");
        output.push_str(&format!(
            "**Account:** {} ({})  \n**Scanned:** {}  \n**Generated:** {}\n\n",
            result.account_id, result.account_alias, result.scanned_at, result.generated_at
        ));

        output.push_str("## Summary\n\n");
        output.push_str("| Severity | Count |\n|----------|-------|\n");
        output.push_str(&format!("| Critical | {} |\n", s.critical));
        output.push_str(&format!("| High | {} |\n", s.high));
        output.push_str(&format!("| Medium | {} |\n", s.medium));
        output.push_str(&format!("| Low | {} |\n", s.low));
        output.push_str(&format!("| Info | {} |\n\n", s.info));
        output.push_str(&format!(
            "{} security groups analyzed across {} region(s); {} unused.\n\n",
            s.total_groups, s.total_regions, s.unused_groups
        ));

        for severity in [
            Severity::Critical,
            Severity::High,
            Severity::Medium,
            Severity::Low,
            Severity::Info,
        ] {
            let findings: Vec<&Finding> = result
                .findings
                .iter()
                .filter(|f| f.severity == severity)
                .collect();
            output.push_str(&self.findings_section(severity, &findings));
        }

        if !result.warnings.is_empty() {
            output.push_str("## Skipped rules\n\n");
            for warning in &result.warnings {
                output.push_str(&format!("- {}\n", warning));
            }
            output.push('\n');
        }

        output
    }
}
