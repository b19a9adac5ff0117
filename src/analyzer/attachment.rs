//! Attachment index: security-group id -> attachment count.

use std::collections::HashMap;

use crate::snapshot::NetworkInterface;

/// Mapping from security-group id to the number of network interfaces
/// referencing it. Pure function of the region's ENI list; a group absent
/// from the index has zero attachments.
#[derive(Debug, Default)]
pub struct AttachmentIndex {
    counts: HashMap<String, usize>,
}

impl AttachmentIndex {
    pub fn build(interfaces: &[NetworkInterface]) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for eni in interfaces {
            for group in &eni.groups {
                *counts.entry(group.group_id.clone()).or_default() += 1;
            }
        }
        Self { counts }
    }

    /// Attachment count for a group, zero when unknown.
    pub fn count(&self, group_id: &str) -> usize {
        self.counts.get(group_id).copied().unwrap_or(0)
    }

    pub fn is_used(&self, group_id: &str) -> bool {
        self.count(group_id) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::NetworkInterface;

    fn eni(groups: &[&str]) -> NetworkInterface {
        let groups_json: Vec<String> = groups
            .iter()
            .map(|g| format!(r#"{{"GroupId": "{}"}}"#, g))
            .collect();
        let raw = format!(
            r#"{{"NetworkInterfaceId": "eni-1", "Groups": [{}]}}"#,
            groups_json.join(",")
        );
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_counts_per_group() {
        let interfaces = vec![eni(&["sg-1", "sg-2"]), eni(&["sg-1"])];
        let index = AttachmentIndex::build(&interfaces);
        assert_eq!(index.count("sg-1"), 2);
        assert_eq!(index.count("sg-2"), 1);
    }

    #[test]
    fn test_absent_group_is_zero() {
        let index = AttachmentIndex::build(&[]);
        assert_eq!(index.count("sg-unknown"), 0);
        assert!(!index.is_used("sg-unknown"));
    }

    #[test]
    fn test_eni_without_groups() {
        let interfaces = vec![eni(&[])];
        let index = AttachmentIndex::build(&interfaces);
        assert_eq!(index.count("sg-1"), 0);
    }
}
