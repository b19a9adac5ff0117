#[cfg(test)]
pub mod fixtures {
    use crate::analyzer::{Category, Direction, Finding, RuleRef, Severity};
    use crate::snapshot::{IpPermission, SecurityGroup, Snapshot};

    pub fn minimal_snapshot_json() -> String {
        r#"{
            "scan_timestamp": "2026-01-12T14:30:22Z",
            "account_id": "123456789012",
            "account_alias": "N/A",
            "regions": [{
                "region_name": "us-east-1",
                "security_groups": [],
                "network_interfaces": [],
                "instances": [],
                "vpcs": []
            }]
        }"#
        .to_string()
    }

    pub fn snapshot_from_json(raw: &str) -> Snapshot {
        Snapshot::from_json(raw).expect("fixture snapshot must be well-formed")
    }

    pub fn ingress_rule(
        protocol: &str,
        from_port: Option<i64>,
        to_port: Option<i64>,
        cidrs: &[&str],
    ) -> IpPermission {
        let (v4, v6): (Vec<&&str>, Vec<&&str>) = cidrs.iter().partition(|c| !c.contains(':'));
        let ip_ranges: Vec<String> = v4
            .iter()
            .map(|c| format!(r#"{{"CidrIp": "{}"}}"#, c))
            .collect();
        let ipv6_ranges: Vec<String> = v6
            .iter()
            .map(|c| format!(r#"{{"CidrIpv6": "{}"}}"#, c))
            .collect();
        let from = from_port.map_or("null".to_string(), |p| p.to_string());
        let to = to_port.map_or("null".to_string(), |p| p.to_string());
        let raw = format!(
            r#"{{
                "IpProtocol": "{}",
                "FromPort": {},
                "ToPort": {},
                "IpRanges": [{}],
                "Ipv6Ranges": [{}]
            }}"#,
            protocol,
            from,
            to,
            ip_ranges.join(","),
            ipv6_ranges.join(",")
        );
        serde_json::from_str(&raw).expect("fixture rule must deserialize")
    }

    pub fn group_with_ingress(
        group_id: &str,
        group_name: &str,
        ingress: Vec<IpPermission>,
    ) -> SecurityGroup {
        let raw = format!(
            r#"{{
                "GroupId": "{}",
                "GroupName": "{}",
                "Description": "test group",
                "VpcId": "vpc-test"
            }}"#,
            group_id, group_name
        );
        let mut group: SecurityGroup =
            serde_json::from_str(&raw).expect("fixture group must deserialize");
        group.ingress = ingress;
        group
    }

    pub fn rule_finding(severity: Severity, category: Category, region: &str) -> Finding {
        Finding {
            severity,
            category,
            region: region.to_string(),
            group_id: "sg-test".to_string(),
            group_name: "test".to_string(),
            vpc_id: "vpc-test".to_string(),
            rule: Some(RuleRef {
                direction: Direction::Ingress,
                protocol: "tcp".to_string(),
                ports: "Port 22".to_string(),
                cidr: "0.0.0.0/0".to_string(),
                note: None,
            }),
            description: "test finding".to_string(),
            attached_resources: 1,
            recommendation: "test recommendation".to_string(),
        }
    }

    pub fn info_unused_finding(region: &str) -> Finding {
        Finding {
            severity: Severity::Info,
            category: Category::UnusedResource,
            region: region.to_string(),
            group_id: "sg-idle".to_string(),
            group_name: "idle".to_string(),
            vpc_id: "vpc-test".to_string(),
            rule: None,
            description: "Security group 'idle' has no attached resources".to_string(),
            attached_resources: 0,
            recommendation: "review and remove if no longer required".to_string(),
        }
    }
}
