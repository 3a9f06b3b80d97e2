//! Field-level diffing for audit entries
//!
//! Two values are equal when they are structurally equal: object key order
//! never matters, array element order always does. A key missing on one side
//! differs from a key holding `null`.

use serde_json::Value;

use super::entry::FieldValues;

/// Names of the fields whose value differs between two snapshots
///
/// Returns an empty list when either side is absent; no diff is computed
/// across a create or delete. Order follows `old`'s keys, then keys only
/// present in `new`.
pub fn changed_fields(old: Option<&FieldValues>, new: Option<&FieldValues>) -> Vec<String> {
    let (Some(old), Some(new)) = (old, new) else {
        return Vec::new();
    };

    let mut changed: Vec<String> = old
        .iter()
        .filter(|(key, old_val)| new.get(*key) != Some(*old_val))
        .map(|(key, _)| key.clone())
        .collect();

    changed.extend(
        new.keys()
            .filter(|key| !old.contains_key(*key))
            .cloned(),
    );

    changed
}

/// Human-readable summary of the changes between two snapshots
///
/// Only top-level fields are described, e.g. `amount: 100 -> 150`.
pub fn describe_changes(old: &FieldValues, new: &FieldValues) -> Option<String> {
    let mut changes = Vec::new();

    for (key, old_val) in old {
        match new.get(key) {
            Some(new_val) if new_val != old_val => changes.push(format!(
                "{}: {} -> {}",
                key,
                format_value(old_val),
                format_value(new_val)
            )),
            Some(_) => {}
            None => changes.push(format!("{}: {} -> (removed)", key, format_value(old_val))),
        }
    }

    for (key, new_val) in new {
        if !old.contains_key(key) {
            changes.push(format!("{}: (added) -> {}", key, format_value(new_val)));
        }
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

/// Format a JSON value for human-readable display
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            // Truncate long strings
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
