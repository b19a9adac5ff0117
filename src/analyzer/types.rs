use serde::{Deserialize, Serialize};

/// Finding severity, ordered ascending so `Ord` comparisons read naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Risk taxonomy. Each category maps to exactly one default severity in the
/// evaluator's decision procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    AllTrafficExposed,
    DatabaseOrCriticalPortExposed,
    ManagementOrAdminPortExposed,
    WebServiceExposedWithoutEdgeProtection,
    BroadPublicAccess,
    PermissiveEgress,
    UnusedResource,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::AllTrafficExposed => "all-traffic-exposed",
            Category::DatabaseOrCriticalPortExposed => "database-or-critical-port-exposed",
            Category::ManagementOrAdminPortExposed => "management-or-admin-port-exposed",
            Category::WebServiceExposedWithoutEdgeProtection => {
                "web-service-exposed-without-edge-protection"
            }
            Category::BroadPublicAccess => "broad-public-access",
            Category::PermissiveEgress => "permissive-egress",
            Category::UnusedResource => "unused-resource",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Traffic direction of the triggering rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ingress,
    Egress,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Ingress => write!(f, "INGRESS"),
            Direction::Egress => write!(f, "EGRESS"),
        }
    }
}

/// The rule that triggered a finding, reduced to a renderer-friendly shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleRef {
    pub direction: Direction,
    pub protocol: String,
    /// "Port 22", "Ports 20-21" or "All Ports".
    pub ports: String,
    /// The public CIDR that triggered the finding.
    pub cidr: String,
    /// The rule author's annotation on that CIDR entry, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl std::fmt::Display for RuleRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} ({}) from {}",
            self.direction, self.ports, self.protocol, self.cidr
        )
    }
}

/// One unit of reported risk or informational observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub category: Category,
    pub region: String,
    pub group_id: String,
    pub group_name: String,
    pub vpc_id: String,
    /// None for unused-resource findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<RuleRef>,
    pub description: String,
    pub attached_resources: usize,
    pub recommendation: String,
}

/// A rule that could not be interpreted. Non-fatal: the rule is skipped and
/// evaluation continues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleParseWarning {
    pub region: String,
    pub group_id: String,
    pub detail: String,
}

impl std::fmt::Display for RuleParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.region, self.group_id, self.detail)
    }
}

/// One row of the group inventory table consumed by report renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupInventory {
    pub group_id: String,
    pub group_name: String,
    pub region: String,
    pub vpc_id: String,
    pub attached_resources: usize,
    pub is_used: bool,
    pub ingress_rules: Vec<IngressSummary>,
}

/// Compact ingress-rule summary for inventory rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngressSummary {
    pub protocol: String,
    pub ports: String,
    /// Comma-joined source CIDRs.
    pub source: String,
}
