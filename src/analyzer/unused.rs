//! Unused-resource detection.

use super::attachment::AttachmentIndex;
use super::types::{Category, Finding, Severity};
use crate::snapshot::SecurityGroup;

/// Flag a security group with zero attachments as an Info finding. Groups
/// named "default" are exempt regardless of attachment count: they cannot
/// be deleted.
pub fn detect_unused(
    group: &SecurityGroup,
    region: &str,
    index: &AttachmentIndex,
) -> Option<Finding> {
    if group.is_default() || index.is_used(&group.group_id) {
        return None;
    }

    Some(Finding {
        severity: Severity::Info,
        category: Category::UnusedResource,
        region: region.to_string(),
        group_id: group.group_id.clone(),
        group_name: group.group_name.clone(),
        vpc_id: group.vpc_display().to_string(),
        rule: None,
        description: format!(
            "Security group '{}' has no attached resources",
            group.group_name
        ),
        attached_resources: 0,
        recommendation: "review and remove if no longer required".to_string(),
    })
}
