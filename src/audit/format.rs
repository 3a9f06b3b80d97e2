//! Display labels for audit actions and tracked tables
//!
//! Both mappings are total: unrecognized input is echoed back unchanged so
//! that rows written by newer producers still render.

use std::fmt;

/// Tables whose mutations are recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedTable {
    JournalEntries,
    JournalEntryLines,
    Accounts,
    AuxiliaryLedger,
    KardexMovements,
}

impl TrackedTable {
    /// All tracked tables, in display order
    pub const ALL: [TrackedTable; 5] = [
        TrackedTable::JournalEntries,
        TrackedTable::JournalEntryLines,
        TrackedTable::Accounts,
        TrackedTable::AuxiliaryLedger,
        TrackedTable::KardexMovements,
    ];

    /// Technical table name as stored in `audit_log.table_name`
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackedTable::JournalEntries => "journal_entries",
            TrackedTable::JournalEntryLines => "journal_entry_lines",
            TrackedTable::Accounts => "accounts",
            TrackedTable::AuxiliaryLedger => "auxiliary_ledger",
            TrackedTable::KardexMovements => "kardex_movements",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            TrackedTable::JournalEntries => "Journal Entries",
            TrackedTable::JournalEntryLines => "Journal Entry Lines",
            TrackedTable::Accounts => "Accounts",
            TrackedTable::AuxiliaryLedger => "Auxiliary Ledger",
            TrackedTable::KardexMovements => "Kardex Movements",
        }
    }

    /// Parse a technical table name (exact match)
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|table| table.as_str() == name)
    }
}

impl fmt::Display for TrackedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display label for an action value; unknown values are echoed
pub fn format_action(action: &str) -> String {
    match action {
        "CREATE" => "Creation".to_string(),
        "UPDATE" => "Modification".to_string(),
        "DELETE" => "Deletion".to_string(),
        other => other.to_string(),
    }
}

/// Display label for a table name; unknown tables are echoed
pub fn format_table_name(name: &str) -> String {
    TrackedTable::parse(name)
        .map(|table| table.label().to_string())
        .unwrap_or_else(|| name.to_string())
}
