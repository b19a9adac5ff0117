//! Snapshot loading and structural validation.
//!
//! The loader parses to a dynamic `Value` first so that contract
//! violations can be reported against a named field, then deserializes
//! into the typed model. No business logic lives here.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::types::Snapshot;
use crate::error::{Result, SgAuditError};

/// Top-level keys that must be present in every snapshot.
const REQUIRED_KEYS: &[&str] = &["scan_timestamp", "account_id", "account_alias", "regions"];

impl Snapshot {
    /// Load and validate a snapshot from a file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| SgAuditError::read_error(path, e))?;
        info!(path = %path.display(), bytes = raw.len(), "Loaded snapshot file");
        Self::from_json(&raw)
    }

    /// Parse and validate a snapshot from raw JSON text.
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|source| SgAuditError::Json { source })?;

        validate_structure(&value)?;

        let snapshot: Snapshot = serde_json::from_value(value)
            .map_err(|e| SgAuditError::malformed("$", format!("schema mismatch: {}", e)))?;

        debug!(
            account_id = %snapshot.account_id,
            regions = snapshot.regions.len(),
            "Snapshot validated"
        );
        Ok(snapshot)
    }
}

/// Check the top-level contract before typed deserialization: required keys
/// present, `regions` a non-empty array.
fn validate_structure(value: &serde_json::Value) -> Result<()> {
    let obj = value
        .as_object()
        .ok_or_else(|| SgAuditError::malformed("$", "top level is not a JSON object"))?;

    for key in REQUIRED_KEYS {
        if !obj.contains_key(*key) {
            return Err(SgAuditError::malformed(*key, "missing required key"));
        }
    }

    let regions = obj["regions"]
        .as_array()
        .ok_or_else(|| SgAuditError::malformed("regions", "expected an array"))?;

    if regions.is_empty() {
        return Err(SgAuditError::malformed(
            "regions",
            "snapshot contains zero regions",
        ));
    }

    for (idx, region) in regions.iter().enumerate() {
        if !region
            .get("region_name")
            .map(serde_json::Value::is_string)
            .unwrap_or(false)
        {
            return Err(SgAuditError::malformed(
                format!("regions[{}].region_name", idx),
                "missing or non-string region name",
            ));
        }

        for key in ["security_groups", "network_interfaces", "instances", "vpcs"] {
            if let Some(v) = region.get(key) {
                if !v.is_array() {
                    return Err(SgAuditError::malformed(
                        format!("regions[{}].{}", idx, key),
                        "expected an array",
                    ));
                }
            }
        }

        if let Some(groups) = region
            .get("security_groups")
            .and_then(serde_json::Value::as_array)
        {
            for (g_idx, group) in groups.iter().enumerate() {
                validate_group(idx, g_idx, group)?;
            }
        }
    }

    Ok(())
}

/// Group-level shape checks, so a broken group is reported by path instead
/// of as a generic deserialization failure.
fn validate_group(region_idx: usize, group_idx: usize, group: &serde_json::Value) -> Result<()> {
    let path = format!("regions[{}].security_groups[{}]", region_idx, group_idx);

    let obj = group
        .as_object()
        .ok_or_else(|| SgAuditError::malformed(path.clone(), "expected an object"))?;

    for key in ["GroupId", "GroupName"] {
        if !obj
            .get(key)
            .map(serde_json::Value::is_string)
            .unwrap_or(false)
        {
            return Err(SgAuditError::malformed(
                format!("{}.{}", path, key),
                "missing or non-string value",
            ));
        }
    }

    for key in ["IpPermissions", "IpPermissionsEgress"] {
        if let Some(v) = obj.get(key) {
            if !v.is_array() {
                return Err(SgAuditError::malformed(
                    format!("{}.{}", path, key),
                    "expected an array",
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::minimal_snapshot_json;
    use std::io::Write;

    #[test]
    fn test_load_minimal_snapshot() {
        let snapshot = Snapshot::from_json(&minimal_snapshot_json()).unwrap();
        assert_eq!(snapshot.account_id, "123456789012");
        assert_eq!(snapshot.regions.len(), 1);
        assert_eq!(snapshot.regions[0].region_name, "us-east-1");
    }

    #[test]
    fn test_reject_missing_regions_key() {
        let raw = r#"{"scan_timestamp": "t", "account_id": "a", "account_alias": "N/A"}"#;
        let err = Snapshot::from_json(raw).unwrap_err();
        assert!(matches!(
            err,
            SgAuditError::MalformedSnapshot { ref field, .. } if field == "regions"
        ));
    }

    #[test]
    fn test_reject_zero_regions() {
        let raw = r#"{
            "scan_timestamp": "t", "account_id": "a",
            "account_alias": "N/A", "regions": []
        }"#;
        let err = Snapshot::from_json(raw).unwrap_err();
        assert!(err.to_string().contains("zero regions"));
    }

    #[test]
    fn test_reject_regions_not_array() {
        let raw = r#"{
            "scan_timestamp": "t", "account_id": "a",
            "account_alias": "N/A", "regions": {"region_name": "us-east-1"}
        }"#;
        let err = Snapshot::from_json(raw).unwrap_err();
        assert!(err.to_string().contains("expected an array"));
    }

    #[test]
    fn test_reject_region_without_name() {
        let raw = r#"{
            "scan_timestamp": "t", "account_id": "a",
            "account_alias": "N/A", "regions": [{"security_groups": []}]
        }"#;
        let err = Snapshot::from_json(raw).unwrap_err();
        assert!(err.to_string().contains("regions[0].region_name"));
    }

    #[test]
    fn test_reject_non_array_permissions_by_path() {
        let raw = r#"{
            "scan_timestamp": "t", "account_id": "a", "account_alias": "N/A",
            "regions": [{
                "region_name": "us-east-1",
                "security_groups": [{
                    "GroupId": "sg-1",
                    "GroupName": "web",
                    "IpPermissions": {"IpProtocol": "tcp"}
                }]
            }]
        }"#;
        let err = Snapshot::from_json(raw).unwrap_err();
        assert!(matches!(
            err,
            SgAuditError::MalformedSnapshot { ref field, .. }
                if field == "regions[0].security_groups[0].IpPermissions"
        ));
    }

    #[test]
    fn test_reject_group_without_id_by_path() {
        let raw = r#"{
            "scan_timestamp": "t", "account_id": "a", "account_alias": "N/A",
            "regions": [{
                "region_name": "us-east-1",
                "security_groups": [{"GroupName": "web"}]
            }]
        }"#;
        let err = Snapshot::from_json(raw).unwrap_err();
        assert!(err
            .to_string()
            .contains("regions[0].security_groups[0].GroupId"));
    }

    #[test]
    fn test_reject_non_array_region_collection_by_path() {
        let raw = r#"{
            "scan_timestamp": "t", "account_id": "a", "account_alias": "N/A",
            "regions": [{"region_name": "us-east-1", "network_interfaces": 7}]
        }"#;
        let err = Snapshot::from_json(raw).unwrap_err();
        assert!(err.to_string().contains("regions[0].network_interfaces"));
    }

    #[test]
    fn test_reject_non_object_top_level() {
        let err = Snapshot::from_json("[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("not a JSON object"));
    }

    #[test]
    fn test_reject_invalid_json() {
        let err = Snapshot::from_json("not json at all").unwrap_err();
        assert!(matches!(err, SgAuditError::Json { .. }));
    }

    #[test]
    fn test_region_with_missing_collections() {
        let raw = r#"{
            "scan_timestamp": "2026-01-12T14:30:22Z",
            "account_id": "123456789012",
            "account_alias": "N/A",
            "regions": [{"region_name": "eu-west-1"}]
        }"#;
        let snapshot = Snapshot::from_json(raw).unwrap();
        assert!(snapshot.regions[0].security_groups.is_empty());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Snapshot::from_path(Path::new("/nonexistent/snapshot.json")).unwrap_err();
        assert!(matches!(err, SgAuditError::Io { .. }));
    }

    #[test]
    fn test_from_path_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(minimal_snapshot_json().as_bytes()).unwrap();
        let snapshot = Snapshot::from_path(file.path()).unwrap();
        assert_eq!(snapshot.regions.len(), 1);
    }
}
