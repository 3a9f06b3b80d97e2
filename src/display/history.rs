//! Audit history display formatting
//!
//! Formats audit entries for terminal output in table and detail views.

use crate::audit::{
    describe_changes, format_action, format_table_name, format_value, AuditLogEntry, FieldValues,
};

/// Format a history listing as a table
pub fn format_history_list(entries: &[AuditLogEntry]) -> String {
    if entries.is_empty() {
        return "No audit entries found.".to_string();
    }

    let rows: Vec<[String; 6]> = entries
        .iter()
        .map(|entry| {
            [
                entry.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                format_action(entry.action.as_str()),
                format_table_name(&entry.table_name),
                entry.record_id.clone(),
                entry.user_id.short(),
                entry
                    .changed_fields
                    .as_ref()
                    .map(|fields| fields.join(", "))
                    .unwrap_or_default(),
            ]
        })
        .collect();

    let headers = ["When", "Action", "Table", "Record", "User", "Changed"];
    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    output.push_str(&format_row(&headers.map(String::from), &widths));
    output.push_str(&format_row(&widths.map(|w| "-".repeat(w)), &widths));
    for row in &rows {
        output.push_str(&format_row(row, &widths));
    }

    let noun = if entries.len() == 1 { "entry" } else { "entries" };
    output.push_str(&format!("\n{} {}\n", entries.len(), noun));
    output
}

fn format_row(cells: &[String; 6], widths: &[usize; 6]) -> String {
    let line = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}

/// Format a single entry with its snapshots
pub fn format_entry_details(entry: &AuditLogEntry) -> String {
    let mut output = String::new();

    output.push_str(&format!("Entry:   {}\n", entry.id));
    output.push_str(&format!(
        "When:    {}\n",
        entry.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!("Action:  {}\n", format_action(entry.action.as_str())));
    output.push_str(&format!("Table:   {}\n", format_table_name(&entry.table_name)));
    output.push_str(&format!("Record:  {}\n", entry.record_id));
    output.push_str(&format!("User:    {}\n", entry.user_id));

    match (&entry.old_values, &entry.new_values) {
        (Some(old), Some(new)) => {
            let summary = describe_changes(old, new).unwrap_or_else(|| "(none)".into());
            output.push_str(&format!("Changes: {}\n", summary));
        }
        (None, Some(new)) => {
            output.push_str("Values:\n");
            output.push_str(&format_snapshot(new));
        }
        (Some(old), None) => {
            output.push_str("Previous values:\n");
            output.push_str(&format_snapshot(old));
        }
        (None, None) => {}
    }

    output
}

fn format_snapshot(values: &FieldValues) -> String {
    values
        .iter()
        .map(|(key, value)| format!("  {}: {}\n", key, format_value(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditAction, NewAuditEntry};
    use crate::models::{EntryId, UserId};
    use serde_json::json;

    fn entry(
        action: AuditAction,
        old: Option<serde_json::Value>,
        new: Option<serde_json::Value>,
    ) -> AuditLogEntry {
        let old_values = old.and_then(|v| v.as_object().cloned());
        let new_values = new.and_then(|v| v.as_object().cloned());
        let changed_fields = crate::audit::changed_fields(old_values.as_ref(), new_values.as_ref());
        AuditLogEntry::from_new(
            EntryId::new(),
            "2025-03-01T08:00:00Z".parse().unwrap(),
            NewAuditEntry {
                user_id: UserId::new(),
                table_name: "accounts".into(),
                record_id: "1105".into(),
                action,
                old_values,
                new_values,
                changed_fields: (!changed_fields.is_empty()).then_some(changed_fields),
            },
        )
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_history_list(&[]), "No audit entries found.");
    }

    #[test]
    fn test_list_uses_display_labels() {
        let entries = vec![
            entry(
                AuditAction::Update,
                Some(json!({"balance": 100})),
                Some(json!({"balance": 200})),
            ),
            entry(AuditAction::Create, None, Some(json!({"balance": 100}))),
        ];

        let output = format_history_list(&entries);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("When"));
        assert!(lines[1].starts_with("----"));
        assert!(lines[2].contains("Modification"));
        assert!(lines[2].contains("Accounts"));
        assert!(lines[2].contains("balance"));
        assert!(lines[3].contains("Creation"));
        assert!(output.ends_with("2 entries\n"));
    }

    #[test]
    fn test_details_for_update() {
        let output = format_entry_details(&entry(
            AuditAction::Update,
            Some(json!({"balance": 100, "name": "Cash"})),
            Some(json!({"balance": 200, "name": "Cash"})),
        ));

        assert!(output.contains("Action:  Modification"));
        assert!(output.contains("Changes: balance: 100 -> 200"));
    }

    #[test]
    fn test_details_for_delete() {
        let output = format_entry_details(&entry(
            AuditAction::Delete,
            Some(json!({"name": "Cash"})),
            None,
        ));

        assert!(output.contains("Action:  Deletion"));
        assert!(output.contains("Previous values:\n  name: \"Cash\""));
    }
}
