//! Binary-level smoke tests: argument surface, config failure modes, and
//! the local (network-free) subcommands.

use assert_cmd::Command;
use campus_sync::CheckpointStore;
use predicates::prelude::*;
use tempfile::TempDir;

fn campus() -> Command {
    Command::cargo_bin("campus").expect("campus binary")
}

#[test]
fn help_lists_subcommands() {
    campus()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("checkpoint"));
}

#[test]
fn sync_without_credentials_exits_one_and_names_the_variable() {
    let home = TempDir::new().unwrap();
    campus()
        .env_clear()
        .env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .arg("sync")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("CAMPUS_SHEETS_TOKEN"));
}

#[test]
fn status_with_fresh_home_reports_never_synced() {
    let home = TempDir::new().unwrap();
    campus()
        .env_clear()
        .env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No sync recorded yet."));
}

#[test]
fn status_json_reports_zero_runs() {
    let home = TempDir::new().unwrap();
    campus()
        .env_clear()
        .env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .args(["status", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"runs\": 0"));
}

#[test]
fn checkpoint_list_shows_recorded_entries() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("ckpt.json");
    let store = CheckpointStore::new(path.clone());
    store.record("first@x.com").unwrap();
    store.record("second@x.com").unwrap();

    campus()
        .env_clear()
        .env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .env("CAMPUS_CHECKPOINT_PATH", &path)
        .args(["checkpoint", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("first@x.com"))
        .stdout(predicate::str::contains("second@x.com"));
}

#[test]
fn checkpoint_list_limit_keeps_most_recent() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("ckpt.json");
    let store = CheckpointStore::new(path.clone());
    store.record("old@x.com").unwrap();
    store.record("new@x.com").unwrap();

    campus()
        .env_clear()
        .env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .env("CAMPUS_CHECKPOINT_PATH", &path)
        .args(["checkpoint", "list", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("new@x.com"))
        .stdout(predicate::str::contains("old@x.com").not());
}

#[test]
fn status_shows_current_watermark_after_syncs_are_recorded() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("ckpt.json");
    let store = CheckpointStore::new(path.clone());
    store.record("tail@x.com").unwrap();

    campus()
        .env_clear()
        .env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .env("CAMPUS_CHECKPOINT_PATH", &path)
        .env("NO_COLOR", "1")
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("tail@x.com"))
        .stdout(predicate::str::contains("Recorded syncs: 1"));
}
