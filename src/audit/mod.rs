//! Audit Change Capture
//!
//! Snapshot diffing and audit record construction. The module performs no
//! I/O; a persistence collaborator stores the entries it produces.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::debug;
use ulid::Ulid;

/// The kind of change an audit entry records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditOperation {
    Insert,
    Update,
    Delete,
}

impl AuditOperation {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

/// One immutable audit record.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub operation: AuditOperation,
    pub entity_type: String,
    pub entity_id: String,
    /// Serialized field-level diff, absent for operations without one.
    pub changes_json: Option<String>,
    /// Free-form caller context, such as the requesting subsystem.
    pub context: Option<String>,
}

/// Computes the field-level difference between two entity snapshots.
///
/// The result maps each field whose value changed to `{"old": …, "new": …}`.
/// Fields present in only one snapshot appear with the other side `null`.
/// Identical snapshots produce an empty map.
#[must_use]
pub fn diff(old: &Value, new: &Value) -> Map<String, Value> {
    let empty = Map::new();
    let old_fields = old.as_object().unwrap_or(&empty);
    let new_fields = new.as_object().unwrap_or(&empty);

    let mut changes = Map::new();
    for (field, old_value) in old_fields {
        let new_value = new_fields.get(field).unwrap_or(&Value::Null);
        if old_value != new_value {
            changes.insert(
                field.clone(),
                serde_json::json!({ "old": old_value, "new": new_value }),
            );
        }
    }
    for (field, new_value) in new_fields {
        if !old_fields.contains_key(field) && *new_value != Value::Null {
            changes.insert(
                field.clone(),
                serde_json::json!({ "old": Value::Null, "new": new_value }),
            );
        }
    }
    changes
}

/// Constructs an audit entry with a fresh identifier and timestamp.
///
/// `changes` is typically the output of [`diff`]; it is serialized into
/// the entry. The entry is returned to the caller for persistence.
#[must_use]
pub fn log_change(
    operation: AuditOperation,
    entity_type: impl Into<String>,
    entity_id: impl Into<String>,
    changes: Option<&Map<String, Value>>,
    context: Option<&str>,
) -> AuditEntry {
    let entity_type = entity_type.into();
    let entity_id = entity_id.into();
    debug!(
        operation = operation.as_str(),
        entity_type = %entity_type,
        entity_id = %entity_id,
        "audit entry captured"
    );
    AuditEntry {
        id: Ulid::new().to_string(),
        timestamp: Utc::now(),
        operation,
        entity_type,
        entity_id,
        changes_json: changes.map(|c| Value::Object(c.clone()).to_string()),
        context: context.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_diff_identical_snapshots_is_empty() {
        let snapshot = json!({ "name": "intro.mp4", "duration": 120 });
        assert!(diff(&snapshot, &snapshot).is_empty());
    }

    #[test]
    fn test_diff_reports_only_changed_fields() {
        let old = json!({ "name": "intro.mp4", "duration": 120, "codec": "libx264" });
        let new = json!({ "name": "intro_v2.mp4", "duration": 120, "codec": "libx264" });
        let changes = diff(&old, &new);
        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes["name"],
            json!({ "old": "intro.mp4", "new": "intro_v2.mp4" })
        );
    }

    #[test]
    fn test_diff_field_added_and_removed() {
        let old = json!({ "a": 1, "b": 2 });
        let new = json!({ "b": 2, "c": 3 });
        let changes = diff(&old, &new);
        assert_eq!(changes["a"], json!({ "old": 1, "new": null }));
        assert_eq!(changes["c"], json!({ "old": null, "new": 3 }));
        assert!(!changes.contains_key("b"));
    }

    #[test]
    fn test_diff_nested_value_change() {
        let old = json!({ "meta": { "fps": 24 } });
        let new = json!({ "meta": { "fps": 30 } });
        let changes = diff(&old, &new);
        assert_eq!(
            changes["meta"],
            json!({ "old": { "fps": 24 }, "new": { "fps": 30 } })
        );
    }

    #[test]
    fn test_log_change_populates_record() {
        let old = json!({ "title": "draft" });
        let new = json!({ "title": "final" });
        let changes = diff(&old, &new);
        let entry = log_change(
            AuditOperation::Update,
            "project",
            "proj_42",
            Some(&changes),
            Some("timeline editor"),
        );
        assert_eq!(entry.operation, AuditOperation::Update);
        assert_eq!(entry.entity_type, "project");
        assert_eq!(entry.entity_id, "proj_42");
        assert_eq!(entry.context.as_deref(), Some("timeline editor"));
        assert!(!entry.id.is_empty());
        let parsed: Value = serde_json::from_str(entry.changes_json.as_deref().unwrap()).unwrap();
        assert_eq!(parsed["title"]["new"], "final");
    }

    #[test]
    fn test_log_change_without_diff() {
        let entry = log_change(AuditOperation::Delete, "clip", "clip_7", None, None);
        assert!(entry.changes_json.is_none());
        assert!(entry.context.is_none());
    }

    #[test]
    fn test_entries_get_distinct_ids() {
        let a = log_change(AuditOperation::Insert, "clip", "c1", None, None);
        let b = log_change(AuditOperation::Insert, "clip", "c1", None, None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_operation_as_str() {
        assert_eq!(AuditOperation::Insert.as_str(), "INSERT");
        assert_eq!(AuditOperation::Update.as_str(), "UPDATE");
        assert_eq!(AuditOperation::Delete.as_str(), "DELETE");
    }
}
