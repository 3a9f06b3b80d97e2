//! Diff CLI command
//!
//! Compares two JSON snapshots the same way the audit trail does before an
//! entry is recorded.

use std::path::Path;

use serde_json::Value;

use crate::audit::{changed_fields, describe_changes, FieldValues};
use crate::error::{AuditError, AuditResult};

/// Read a snapshot file; `null` means the record did not exist
pub fn read_snapshot(path: &Path) -> AuditResult<Option<FieldValues>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| AuditError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    match serde_json::from_str::<Value>(&contents)? {
        Value::Object(values) => Ok(Some(values)),
        Value::Null => Ok(None),
        other => Err(AuditError::Validation(format!(
            "{} must contain a JSON object or null, found {}",
            path.display(),
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Render the diff between two snapshots for the terminal
pub fn render_diff(old: Option<&FieldValues>, new: Option<&FieldValues>) -> String {
    let fields = changed_fields(old, new);
    if fields.is_empty() {
        return "No changes.\n".to_string();
    }

    let mut output = String::from("Changed fields:\n");
    for field in &fields {
        output.push_str(&format!("  {}\n", field));
    }
    if let (Some(old), Some(new)) = (old, new) {
        if let Some(summary) = describe_changes(old, new) {
            output.push_str(&format!("Summary: {}\n", summary));
        }
    }
    output
}

/// Handle the diff command
pub fn handle_diff_command(old: &Path, new: &Path) -> AuditResult<()> {
    let old = read_snapshot(old)?;
    let new = read_snapshot(new)?;
    print!("{}", render_diff(old.as_ref(), new.as_ref()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_render_diff() {
        let old = json!({"amount": 100, "note": "a"}).as_object().cloned();
        let new = json!({"amount": 150, "note": "a"}).as_object().cloned();

        let output = render_diff(old.as_ref(), new.as_ref());
        assert_eq!(
            output,
            "Changed fields:\n  amount\nSummary: amount: 100 -> 150\n"
        );
    }

    #[test]
    fn test_render_diff_absent_side() {
        let new = json!({"amount": 100}).as_object().cloned();
        assert_eq!(render_diff(None, new.as_ref()), "No changes.\n");
    }

    #[test]
    fn test_read_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let object = temp_dir.path().join("object.json");
        let null = temp_dir.path().join("null.json");
        let array = temp_dir.path().join("array.json");
        std::fs::write(&object, r#"{"amount": 1}"#).unwrap();
        std::fs::write(&null, "null").unwrap();
        std::fs::write(&array, "[1, 2]").unwrap();

        assert!(read_snapshot(&object).unwrap().is_some());
        assert!(read_snapshot(&null).unwrap().is_none());
        assert!(read_snapshot(&array).unwrap_err().is_validation());
        assert!(matches!(
            read_snapshot(&temp_dir.path().join("missing.json")),
            Err(AuditError::Io(_))
        ));
    }
}
