//! Typed in-memory model of the inventory snapshot.
//!
//! The shapes mirror the JSON produced by the data-collection step: the
//! top-level and region keys are snake_case, while the nested descriptors
//! keep the PascalCase keys of the AWS CLI output (`GroupId`,
//! `IpPermissions`, ...). Deserialization is the only construction path;
//! the snapshot is read-only once loaded.

use serde::{Deserialize, Serialize};

/// Root entity: one captured inventory scan. Immutable once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    pub scan_timestamp: String,
    pub account_id: String,
    /// "N/A" when the account has no alias.
    pub account_alias: String,
    pub regions: Vec<Region>,
}

/// One region's inventory. Regions are independent of each other.
#[derive(Debug, Clone, Deserialize)]
pub struct Region {
    pub region_name: String,
    #[serde(default)]
    pub security_groups: Vec<SecurityGroup>,
    #[serde(default)]
    pub network_interfaces: Vec<NetworkInterface>,
    #[serde(default)]
    pub instances: Vec<Reservation>,
    #[serde(default)]
    pub vpcs: Vec<Vpc>,
}

/// A security group as described by the AWS CLI. Identity key is
/// (region, group id).
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityGroup {
    #[serde(rename = "GroupId")]
    pub group_id: String,
    #[serde(rename = "GroupName")]
    pub group_name: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "VpcId")]
    pub vpc_id: Option<String>,
    #[serde(rename = "IpPermissions", default)]
    pub ingress: Vec<IpPermission>,
    #[serde(rename = "IpPermissionsEgress", default)]
    pub egress: Vec<IpPermission>,
}

impl SecurityGroup {
    /// Default groups cannot be deleted and are exempt from unused-resource
    /// detection.
    pub fn is_default(&self) -> bool {
        self.group_name == "default"
    }

    /// VPC id for display, `EC2-Classic` when the group predates VPCs.
    pub fn vpc_display(&self) -> &str {
        self.vpc_id.as_deref().unwrap_or("EC2-Classic")
    }
}

/// One ingress or egress permission entry.
#[derive(Debug, Clone, Deserialize)]
pub struct IpPermission {
    /// "tcp", "udp", "icmp", "icmpv6" or "-1" (all protocols).
    #[serde(rename = "IpProtocol")]
    pub ip_protocol: String,
    /// Null when the protocol is "-1" (all ports implied).
    #[serde(rename = "FromPort")]
    pub from_port: Option<i64>,
    #[serde(rename = "ToPort")]
    pub to_port: Option<i64>,
    #[serde(rename = "IpRanges", default)]
    pub ip_ranges: Vec<IpRange>,
    #[serde(rename = "Ipv6Ranges", default)]
    pub ipv6_ranges: Vec<Ipv6Range>,
    /// Source security-group references instead of CIDRs.
    #[serde(rename = "UserIdGroupPairs", default)]
    pub group_pairs: Vec<GroupRef>,
}

impl IpPermission {
    /// All CIDR sources of this permission, IPv4 first, in input order.
    pub fn cidrs(&self) -> impl Iterator<Item = &str> {
        self.cidr_entries().map(|(cidr, _)| cidr)
    }

    /// CIDR sources paired with the rule author's annotation, if any.
    pub fn cidr_entries(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.ip_ranges
            .iter()
            .map(|r| (r.cidr_ip.as_str(), r.description.as_deref()))
            .chain(
                self.ipv6_ranges
                    .iter()
                    .map(|r| (r.cidr_ipv6.as_str(), r.description.as_deref())),
            )
    }

    /// Human-readable port range, e.g. "Port 22", "Ports 20-21", "All Ports".
    pub fn port_display(&self) -> String {
        if self.ip_protocol == "-1" {
            return "All Ports".to_string();
        }
        match (self.from_port, self.to_port) {
            (Some(from), Some(to)) if from == to => format!("Port {}", from),
            (Some(from), Some(to)) => format!("Ports {}-{}", from, to),
            _ => "All Ports".to_string(),
        }
    }

    /// Protocol for display ("-1" shown as "All").
    pub fn protocol_display(&self) -> &str {
        if self.ip_protocol == "-1" {
            "All"
        } else {
            &self.ip_protocol
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IpRange {
    #[serde(rename = "CidrIp")]
    pub cidr_ip: String,
    #[serde(rename = "Description")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ipv6Range {
    #[serde(rename = "CidrIpv6")]
    pub cidr_ipv6: String,
    #[serde(rename = "Description")]
    pub description: Option<String>,
}

/// Reference to a security group from an ENI or a rule's source pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRef {
    #[serde(rename = "GroupId")]
    pub group_id: String,
    #[serde(rename = "GroupName")]
    pub group_name: Option<String>,
}

/// A network interface; the attachment point that makes a group "in use".
/// Consumed by the attachment index and not retained afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkInterface {
    #[serde(rename = "NetworkInterfaceId", default)]
    pub network_interface_id: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "PrivateIpAddress")]
    pub private_ip_address: Option<String>,
    #[serde(rename = "Groups", default)]
    pub groups: Vec<GroupRef>,
}

/// The `instances` array carries EC2 reservation objects.
#[derive(Debug, Clone, Deserialize)]
pub struct Reservation {
    #[serde(rename = "Instances", default)]
    pub instances: Vec<Instance>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Instance {
    #[serde(rename = "InstanceId", default)]
    pub instance_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Vpc {
    #[serde(rename = "VpcId", default)]
    pub vpc_id: String,
    #[serde(rename = "IsDefault", default)]
    pub is_default: bool,
}
