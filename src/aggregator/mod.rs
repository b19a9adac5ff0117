//! Aggregation of findings into summary statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analyzer::{AnalysisResult, Category, Finding, Severity};
use crate::snapshot::Snapshot;

/// Summary statistics over the full finding sequence. All counts are zero
/// for a clean account; that is a legitimate result, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditSummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
    pub total_findings: usize,
    /// BTreeMaps keep serialized output stable across runs.
    pub by_region: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
    pub total_groups: usize,
    pub unused_groups: usize,
    pub risky_rules: usize,
    pub total_regions: usize,
}

impl AuditSummary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut summary = Self::default();
        for finding in findings {
            summary.total_findings += 1;
            match finding.severity {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
                Severity::Info => summary.info += 1,
            }
            *summary.by_region.entry(finding.region.clone()).or_default() += 1;
            *summary
                .by_category
                .entry(finding.category.as_str().to_string())
                .or_default() += 1;
            if finding.category == Category::UnusedResource {
                summary.unused_groups += 1;
            }
            if finding.rule.is_some() && finding.severity >= Severity::Medium {
                summary.risky_rules += 1;
            }
        }
        summary
    }

    /// Attach snapshot-level totals not derivable from findings alone.
    pub fn with_totals(mut self, total_groups: usize, total_regions: usize) -> Self {
        self.total_groups = total_groups;
        self.total_regions = total_regions;
        self
    }
}

/// The engine's complete output: finding sequence plus statistics, in a
/// renderer-agnostic serializable shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditResult {
    pub version: String,
    /// Timestamp of the underlying inventory scan.
    pub scanned_at: String,
    pub generated_at: String,
    pub account_id: String,
    pub account_alias: String,
    pub summary: AuditSummary,
    pub findings: Vec<crate::analyzer::Finding>,
    pub warnings: Vec<crate::analyzer::RuleParseWarning>,
    pub inventory: Vec<crate::analyzer::GroupInventory>,
}

impl AuditResult {
    pub fn new(snapshot: &Snapshot, analysis: AnalysisResult) -> Self {
        let summary = AuditSummary::from_findings(&analysis.findings)
            .with_totals(analysis.groups_analyzed, snapshot.regions.len());

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            scanned_at: snapshot.scan_timestamp.clone(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            account_id: snapshot.account_id.clone(),
            account_alias: snapshot.account_alias.clone(),
            summary,
            findings: analysis.findings,
            warnings: analysis.warnings,
            inventory: analysis.inventory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{info_unused_finding, rule_finding};

    #[test]
    fn test_empty_findings_all_zero() {
        let summary = AuditSummary::from_findings(&[]);
        assert_eq!(summary.total_findings, 0);
        assert_eq!(summary.critical, 0);
        assert_eq!(summary.info, 0);
        assert!(summary.by_region.is_empty());
        assert!(summary.by_category.is_empty());
    }

    #[test]
    fn test_severity_counts_sum_to_total() {
        let findings = vec![
            rule_finding(Severity::Critical, Category::AllTrafficExposed, "us-east-1"),
            rule_finding(
                Severity::High,
                Category::ManagementOrAdminPortExposed,
                "us-east-1",
            ),
            rule_finding(Severity::Medium, Category::BroadPublicAccess, "eu-west-1"),
            rule_finding(Severity::Low, Category::PermissiveEgress, "eu-west-1"),
            info_unused_finding("eu-west-1"),
        ];
        let summary = AuditSummary::from_findings(&findings);
        assert_eq!(
            summary.critical + summary.high + summary.medium + summary.low + summary.info,
            summary.total_findings
        );
        assert_eq!(summary.total_findings, 5);
    }

    #[test]
    fn test_per_region_counts() {
        let findings = vec![
            rule_finding(Severity::High, Category::ManagementOrAdminPortExposed, "us-east-1"),
            rule_finding(Severity::High, Category::ManagementOrAdminPortExposed, "us-east-1"),
            info_unused_finding("eu-west-1"),
        ];
        let summary = AuditSummary::from_findings(&findings);
        assert_eq!(summary.by_region["us-east-1"], 2);
        assert_eq!(summary.by_region["eu-west-1"], 1);
    }

    #[test]
    fn test_per_category_counts() {
        let findings = vec![
            rule_finding(Severity::Critical, Category::AllTrafficExposed, "us-east-1"),
            info_unused_finding("us-east-1"),
            info_unused_finding("eu-west-1"),
        ];
        let summary = AuditSummary::from_findings(&findings);
        assert_eq!(summary.by_category["all-traffic-exposed"], 1);
        assert_eq!(summary.by_category["unused-resource"], 2);
        assert_eq!(summary.unused_groups, 2);
    }

    #[test]
    fn test_risky_rules_exclude_info_and_low() {
        let findings = vec![
            rule_finding(Severity::Critical, Category::AllTrafficExposed, "us-east-1"),
            rule_finding(Severity::Low, Category::PermissiveEgress, "us-east-1"),
            info_unused_finding("us-east-1"),
        ];
        let summary = AuditSummary::from_findings(&findings);
        assert_eq!(summary.risky_rules, 1);
    }

    #[test]
    fn test_with_totals() {
        let summary = AuditSummary::from_findings(&[]).with_totals(12, 3);
        assert_eq!(summary.total_groups, 12);
        assert_eq!(summary.total_regions, 3);
    }
}
