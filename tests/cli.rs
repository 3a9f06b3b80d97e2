use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ledger_audit(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ledger-audit").unwrap();
    cmd.env("LEDGER_AUDIT_CONFIG_DIR", config_dir.path())
        .env_remove("SUPABASE_URL")
        .env_remove("SUPABASE_ANON_KEY")
        .env_remove("SUPABASE_ACCESS_TOKEN")
        .env_remove("LEDGER_AUDIT_READ_ONLY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn format_action_labels() {
    let dir = TempDir::new().unwrap();

    ledger_audit(&dir)
        .args(["format", "action", "UPDATE"])
        .assert()
        .success()
        .stdout("Modification\n");

    ledger_audit(&dir)
        .args(["format", "action", "UNKNOWN_X"])
        .assert()
        .success()
        .stdout("UNKNOWN_X\n");
}

#[test]
fn format_table_labels() {
    let dir = TempDir::new().unwrap();

    ledger_audit(&dir)
        .args(["format", "table", "accounts"])
        .assert()
        .success()
        .stdout("Accounts\n");

    ledger_audit(&dir)
        .args(["format", "table", "unknown_table"])
        .assert()
        .success()
        .stdout("unknown_table\n");
}

#[test]
fn diff_reports_changed_fields() {
    let dir = TempDir::new().unwrap();
    let old = dir.path().join("old.json");
    let new = dir.path().join("new.json");
    std::fs::write(&old, r#"{"amount": 100, "note": "a", "meta": {"x": 1, "y": 2}}"#).unwrap();
    std::fs::write(&new, r#"{"amount": 150, "note": "a", "meta": {"y": 2, "x": 1}}"#).unwrap();

    ledger_audit(&dir)
        .arg("diff")
        .arg(&old)
        .arg(&new)
        .assert()
        .success()
        .stdout(predicate::str::contains("Changed fields:\n  amount\n"))
        .stdout(predicate::str::contains("meta").not());
}

#[test]
fn diff_against_null_snapshot_has_no_changes() {
    let dir = TempDir::new().unwrap();
    let old = dir.path().join("old.json");
    let new = dir.path().join("new.json");
    std::fs::write(&old, "null").unwrap();
    std::fs::write(&new, r#"{"amount": 100}"#).unwrap();

    ledger_audit(&dir)
        .arg("diff")
        .arg(&old)
        .arg(&new)
        .assert()
        .success()
        .stdout("No changes.\n");
}

#[test]
fn history_without_project_fails() {
    let dir = TempDir::new().unwrap();

    ledger_audit(&dir)
        .args(["history", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing SUPABASE_URL"));
}

#[test]
fn config_reads_settings_file_and_env() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"supabase_url": "https://demo.supabase.co", "history_limit": 25}"#,
    )
    .unwrap();

    ledger_audit(&dir)
        .arg("config")
        .env("LEDGER_AUDIT_READ_ONLY", "true")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://demo.supabase.co"))
        .stdout(predicate::str::contains("History limit:   25"))
        .stdout(predicate::str::contains("Read-only:       true"))
        .stderr(predicate::str::contains("READ-ONLY MODE"));
}

#[test]
fn config_set_persists_settings() {
    let dir = TempDir::new().unwrap();

    ledger_audit(&dir)
        .args([
            "config",
            "set",
            "--url",
            "https://demo.supabase.co",
            "--anon-key",
            "anon",
            "--history-limit",
            "40",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved settings to"));

    let saved = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(saved.contains("https://demo.supabase.co"));

    ledger_audit(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("History limit:   40"))
        .stdout(predicate::str::contains("Store: configured"));
}
