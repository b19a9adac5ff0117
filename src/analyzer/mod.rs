//! Risk analysis engine.
//!
//! Walks the snapshot region by region, group by group, rule by rule, and
//! produces a deterministic finding sequence: findings appear in (region
//! order, group order, rule order) as loaded, with a group's rule-less
//! unused finding ahead of its rule findings. Re-running on the same
//! snapshot yields an identical sequence.

mod attachment;
mod ports;
mod risk;
mod types;
mod unused;

pub use attachment::AttachmentIndex;
pub use ports::{CRITICAL_PORTS, MANAGEMENT_PORTS, WEB_PORTS};
pub use types::{
    Category, Direction, Finding, GroupInventory, IngressSummary, RuleParseWarning, RuleRef,
    Severity,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::snapshot::{Region, SecurityGroup, Snapshot};

/// Everything the evaluators produce for one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub findings: Vec<Finding>,
    pub warnings: Vec<RuleParseWarning>,
    /// Per-group inventory for renderers, in (region, group) order.
    pub inventory: Vec<GroupInventory>,
    pub groups_analyzed: usize,
}

/// Analyze a loaded snapshot. Infallible: per-rule interpretation problems
/// become warnings, never errors.
pub fn analyze(snapshot: &Snapshot) -> AnalysisResult {
    info!(regions = snapshot.regions.len(), "Starting security analysis");

    let mut result = AnalysisResult {
        findings: Vec::new(),
        warnings: Vec::new(),
        inventory: Vec::new(),
        groups_analyzed: 0,
    };

    for region in &snapshot.regions {
        analyze_region(region, &mut result);
    }

    info!(
        findings = result.findings.len(),
        warnings = result.warnings.len(),
        groups = result.groups_analyzed,
        "Analysis complete"
    );
    result
}

fn analyze_region(region: &Region, result: &mut AnalysisResult) {
    debug!(region = %region.region_name, groups = region.security_groups.len(), "Analyzing region");

    let index = AttachmentIndex::build(&region.network_interfaces);

    for group in &region.security_groups {
        result.groups_analyzed += 1;
        let attached = index.count(&group.group_id);

        // The unused check precedes rule findings within a group.
        if let Some(finding) = unused::detect_unused(group, &region.region_name, &index) {
            result.findings.push(finding);
        }

        for rule in &group.ingress {
            if let Some(finding) = risk::evaluate_rule(
                rule,
                Direction::Ingress,
                group,
                &region.region_name,
                attached,
                &mut result.warnings,
            ) {
                result.findings.push(finding);
            }
        }

        for rule in &group.egress {
            if let Some(finding) = risk::evaluate_rule(
                rule,
                Direction::Egress,
                group,
                &region.region_name,
                attached,
                &mut result.warnings,
            ) {
                result.findings.push(finding);
            }
        }

        result
            .inventory
            .push(inventory_row(group, &region.region_name, attached));
    }
}

fn inventory_row(group: &SecurityGroup, region: &str, attached: usize) -> GroupInventory {
    let ingress_rules = group
        .ingress
        .iter()
        .filter(|rule| rule.cidrs().next().is_some())
        .map(|rule| IngressSummary {
            protocol: rule.protocol_display().to_string(),
            ports: rule.port_display(),
            source: rule.cidrs().collect::<Vec<_>>().join(", "),
        })
        .collect();

    GroupInventory {
        group_id: group.group_id.clone(),
        group_name: group.group_name.clone(),
        region: region.to_string(),
        vpc_id: group.vpc_display().to_string(),
        attached_resources: attached,
        is_used: attached > 0,
        ingress_rules,
    }
}
