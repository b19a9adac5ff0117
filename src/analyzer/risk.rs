//! Rule risk evaluator: the core decision procedure.
//!
//! Each rule yields at most one finding. The checks run in severity order,
//! so the first match is also the highest-severity match:
//!
//! 1. rules without a public source CIDR produce nothing (egress excepted);
//! 2. all protocols, or the full 0-65535 range -> Critical;
//! 3. a range anchored on a critical port (its `from` or `to` endpoint is
//!    in the critical table, e.g. 3306-3306 or 3306-3310) -> Critical;
//! 4. range crossing a management/admin port -> High;
//! 5. range crossing 80/443 -> Medium. The snapshot carries no
//!    CloudFront/ALB association signal, so this fires on every public
//!    web port: a documented over-approximation;
//! 6. anything else public -> Medium.
//!
//! A rule with an unparseable CIDR or unknown protocol is skipped with a
//! recorded warning; one bad rule never aborts the run.

use std::net::{Ipv4Addr, Ipv6Addr};

use tracing::warn;

use super::ports;
use super::types::{Category, Direction, Finding, RuleParseWarning, RuleRef, Severity};
use crate::snapshot::{IpPermission, SecurityGroup};

/// CIDRs denoting "any address".
const PUBLIC_CIDRS: &[&str] = &["0.0.0.0/0", "::/0"];

const KNOWN_PROTOCOLS: &[&str] = &["-1", "tcp", "udp", "icmp", "icmpv6"];

/// Evaluate one rule of one security group. Returns at most one finding;
/// interpretation failures are pushed onto `warnings` instead of erroring.
pub fn evaluate_rule(
    rule: &IpPermission,
    direction: Direction,
    group: &SecurityGroup,
    region: &str,
    attached_resources: usize,
    warnings: &mut Vec<RuleParseWarning>,
) -> Option<Finding> {
    if !KNOWN_PROTOCOLS.contains(&rule.ip_protocol.as_str()) {
        push_warning(
            warnings,
            region,
            group,
            format!("unknown protocol '{}', rule skipped", rule.ip_protocol),
        );
        return None;
    }

    for cidr in rule.cidrs() {
        if !is_valid_cidr(cidr) {
            push_warning(
                warnings,
                region,
                group,
                format!("unparseable CIDR '{}', rule skipped", cidr),
            );
            return None;
        }
    }

    let (public_cidr, note) = rule
        .cidr_entries()
        .find(|(cidr, _)| PUBLIC_CIDRS.contains(cidr))?;

    let (severity, category, description) = match direction {
        Direction::Egress => classify_egress(rule)?,
        Direction::Ingress => classify_ingress(rule),
    };

    Some(Finding {
        severity,
        category,
        region: region.to_string(),
        group_id: group.group_id.clone(),
        group_name: group.group_name.clone(),
        vpc_id: group.vpc_display().to_string(),
        rule: Some(RuleRef {
            direction,
            protocol: rule.protocol_display().to_string(),
            ports: rule.port_display(),
            cidr: public_cidr.to_string(),
            note: note.map(str::to_string),
        }),
        description,
        attached_resources,
        recommendation: recommendation(category, rule).to_string(),
    })
}

/// Egress to the internet is routine; only all-protocol egress is flagged.
fn classify_egress(rule: &IpPermission) -> Option<(Severity, Category, String)> {
    if rule.ip_protocol == "-1" {
        Some((
            Severity::Low,
            Category::PermissiveEgress,
            "All outbound traffic allowed to the internet".to_string(),
        ))
    } else {
        None
    }
}

fn classify_ingress(rule: &IpPermission) -> (Severity, Category, String) {
    if opens_all_ports(rule) {
        return (
            Severity::Critical,
            Category::AllTrafficExposed,
            "All protocols and ports open to the internet".to_string(),
        );
    }

    // Protocol is tcp/udp from here on; icmp has no port semantics.
    let port_range = match (rule.from_port, rule.to_port) {
        (Some(from), Some(to)) if rule.ip_protocol == "tcp" || rule.ip_protocol == "udp" => {
            Some((clamp_port(from), clamp_port(to)))
        }
        _ => None,
    };

    if let Some((from, to)) = port_range {
        if ports::anchored_on(ports::CRITICAL_PORTS, from, to) {
            let services = ports::matched_services(ports::CRITICAL_PORTS, from, to);
            return (
                Severity::Critical,
                Category::DatabaseOrCriticalPortExposed,
                format!("{} reachable from the internet", services.join(", ")),
            );
        }

        if ports::intersects(ports::MANAGEMENT_PORTS, from, to) {
            let services = ports::matched_services(ports::MANAGEMENT_PORTS, from, to);
            return (
                Severity::High,
                Category::ManagementOrAdminPortExposed,
                format!("{} reachable from the internet", services.join(", ")),
            );
        }

        if ports::intersects(ports::WEB_PORTS, from, to) {
            let services = ports::matched_services(ports::WEB_PORTS, from, to);
            return (
                Severity::Medium,
                Category::WebServiceExposedWithoutEdgeProtection,
                format!(
                    "{} exposed to the internet without a detectable edge layer",
                    services.join(", ")
                ),
            );
        }
    }

    (
        Severity::Medium,
        Category::BroadPublicAccess,
        format!("{} open to the internet", rule.port_display()),
    )
}

/// Protocol "-1", null ports, or a range spanning the whole port space.
fn opens_all_ports(rule: &IpPermission) -> bool {
    if rule.ip_protocol == "-1" {
        return true;
    }
    match (rule.from_port, rule.to_port) {
        (None, None) => true,
        (Some(from), Some(to)) => from <= 0 && to >= 65535,
        _ => false,
    }
}

fn clamp_port(port: i64) -> u16 {
    port.clamp(0, 65535) as u16
}

fn recommendation(category: Category, rule: &IpPermission) -> &'static str {
    match category {
        Category::AllTrafficExposed => {
            "URGENT: restrict to specific protocols and ports; use a VPN or bastion host for management access"
        }
        Category::DatabaseOrCriticalPortExposed => {
            if rule_covers(rule, 23) {
                "Telnet is insecure and deprecated; use SSH instead and restrict the source"
            } else {
                "Database ports should never be internet-facing; use a VPN, VPC peering, or PrivateLink"
            }
        }
        Category::ManagementOrAdminPortExposed => {
            if rule_covers(rule, 22) || rule_covers(rule, 3389) {
                "Use AWS Systems Manager Session Manager or a VPN instead of direct internet access"
            } else {
                "Restrict the source to known management networks"
            }
        }
        Category::WebServiceExposedWithoutEdgeProtection => {
            "Front the service with CloudFront or an ALB and restrict the origin to it"
        }
        Category::BroadPublicAccess => {
            "Restrict the source to specific IP addresses or referencing security groups"
        }
        Category::PermissiveEgress => {
            "Consider restricting egress to specific ports and protocols"
        }
        Category::UnusedResource => "review and remove if no longer required",
    }
}

fn rule_covers(rule: &IpPermission, port: u16) -> bool {
    match (rule.from_port, rule.to_port) {
        (Some(from), Some(to)) => from <= i64::from(port) && i64::from(port) <= to,
        _ => true,
    }
}

/// Valid IPv4/IPv6 CIDR notation: address part parses, prefix within bounds.
fn is_valid_cidr(cidr: &str) -> bool {
    let Some((addr, prefix)) = cidr.split_once('/') else {
        return false;
    };
    let Ok(prefix) = prefix.parse::<u8>() else {
        return false;
    };
    if addr.parse::<Ipv4Addr>().is_ok() {
        prefix <= 32
    } else if addr.parse::<Ipv6Addr>().is_ok() {
        prefix <= 128
    } else {
        false
    }
}

fn push_warning(
    warnings: &mut Vec<RuleParseWarning>,
    region: &str,
    group: &SecurityGroup,
    detail: String,
) {
    warn!(region, group_id = %group.group_id, %detail, "Skipping rule");
    warnings.push(RuleParseWarning {
        region: region.to_string(),
        group_id: group.group_id.clone(),
        detail,
    });
}
