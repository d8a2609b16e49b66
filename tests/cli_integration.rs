//! Integration tests for the `ys` CLI.
//!
//! Each test points `ys` at a database in a temp directory with `--db`,
//! runs it as a subprocess, and checks stdout and the resulting store.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Database path inside a fresh temp dir
fn temp_db(tmp: &TempDir) -> PathBuf {
    tmp.path().join("todo_data.db")
}

/// Run `ys --db <db>` with the given args, returning (stdout, stderr, success).
fn run_ys(db: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_ys"))
        .arg("--db")
        .arg(db)
        .args(args)
        .env_remove("YS_LOG")
        .output()
        .expect("failed to run ys");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `ys` expecting success, return stdout.
fn run_ys_ok(db: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_ys(db, args);
    if !success {
        panic!(
            "ys {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Add an item and return its id
fn add(db: &Path, text: &str) -> i64 {
    run_ys_ok(db, &["add", text]).trim().parse().unwrap()
}

fn json(db: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = args.to_vec();
    full.push("--json");
    serde_json::from_str(&run_ys_ok(db, &full)).unwrap()
}

fn contents(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["content"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn test_list_empty_store() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);

    let out = run_ys_ok(&db, &["list"]);
    assert_eq!(out.trim(), "0 Todos");
    assert!(db.exists());
}

#[test]
fn test_add_then_list_newest_first() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);

    let first = add(&db, "buy milk");
    let second = add(&db, "walk dog");
    assert_ne!(first, second);

    let out = run_ys_ok(&db, &["list"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with(&format!("#{}", second)));
    assert!(lines[0].ends_with("walk dog"));
    assert!(lines[1].ends_with("buy milk"));
    assert_eq!(lines[2], "2 Todos");
}

#[test]
fn test_add_joins_words() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);

    run_ys_ok(&db, &["add", "call", "mom"]);
    assert_eq!(contents(&json(&db, &["list"])), vec!["call mom"]);
}

#[test]
fn test_list_search() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);
    add(&db, "buy milk");
    add(&db, "walk dog");

    let found = json(&db, &["list", "--search", "milk"]);
    assert_eq!(contents(&found), vec!["buy milk"]);

    let all = json(&db, &["list", "--search", "  "]);
    assert_eq!(contents(&all).len(), 2);
}

#[test]
fn test_list_json_fields() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);
    let id = add(&db, "buy milk");

    let items = json(&db, &["list"]);
    let item = &items.as_array().unwrap()[0];
    assert_eq!(item["id"].as_i64(), Some(id));
    assert_eq!(item["content"], "buy milk");
    assert!(item["created_at"].as_str().unwrap().len() >= 19);
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_done_moves_to_history() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);
    let id = add(&db, "buy milk");
    add(&db, "walk dog");

    run_ys_ok(&db, &["done", &id.to_string()]);

    assert_eq!(contents(&json(&db, &["list"])), vec!["walk dog"]);
    assert_eq!(contents(&json(&db, &["history"])), vec!["buy milk"]);

    let out = run_ys_ok(&db, &["history"]);
    assert!(out.contains("\u{2713} #"));
    assert!(out.contains("1 Histories"));
}

#[test]
fn test_restore_gets_new_id() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);
    let id = add(&db, "walk dog");

    let hid = run_ys_ok(&db, &["done", &id.to_string()]);
    let new_id: i64 = run_ys_ok(&db, &["restore", hid.trim()])
        .trim()
        .parse()
        .unwrap();

    assert_ne!(new_id, id);
    assert!(contents(&json(&db, &["history"])).is_empty());
    assert_eq!(contents(&json(&db, &["list"])), vec!["walk dog"]);
}

#[test]
fn test_done_unknown_id_fails() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);

    let (_, stderr, success) = run_ys(&db, &["done", "99"]);
    assert!(!success);
    assert!(stderr.contains("error: no to-do with id 99"));
    assert!(contents(&json(&db, &["history"])).is_empty());
}

#[test]
fn test_edit_replaces_text() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);
    let id = add(&db, "draft");

    run_ys_ok(&db, &["edit", &id.to_string(), "final", "version"]);
    assert_eq!(contents(&json(&db, &["list"])), vec!["final version"]);
}

#[test]
fn test_edit_blank_fails_and_keeps_text() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);
    let id = add(&db, "draft");

    let (_, stderr, success) = run_ys(&db, &["edit", &id.to_string(), " "]);
    assert!(!success);
    assert!(stderr.starts_with("error:"));
    assert_eq!(contents(&json(&db, &["list"])), vec!["draft"]);
}

#[test]
fn test_add_blank_fails() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);

    let (_, stderr, success) = run_ys(&db, &["add", "   "]);
    assert!(!success);
    assert!(stderr.contains("content must not be empty"));
    assert!(contents(&json(&db, &["list"])).is_empty());
}

// ---------------------------------------------------------------------------
// Deletes
// ---------------------------------------------------------------------------

#[test]
fn test_rm_item_and_history() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);
    let keep = add(&db, "keep");
    let gone = add(&db, "gone");
    let archived = add(&db, "archived");
    let hid = run_ys_ok(&db, &["done", &archived.to_string()]);

    run_ys_ok(&db, &["rm", &gone.to_string()]);
    run_ys_ok(&db, &["rm", hid.trim(), "--history"]);

    let items = json(&db, &["list"]);
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["id"].as_i64(), Some(keep));
    assert!(contents(&json(&db, &["history"])).is_empty());
}

#[test]
fn test_rm_unknown_id_is_silent() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);
    add(&db, "stay");

    let out = run_ys_ok(&db, &["rm", "12345"]);
    assert!(out.is_empty());
    assert_eq!(contents(&json(&db, &["list"])), vec!["stay"]);
}

#[test]
fn test_clear_history_requires_yes() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);
    let a = add(&db, "a");
    let b = add(&db, "b");
    run_ys_ok(&db, &["done", &a.to_string()]);
    run_ys_ok(&db, &["done", &b.to_string()]);

    let (_, stderr, success) = run_ys(&db, &["clear-history"]);
    assert!(!success);
    assert!(stderr.contains("--yes"));
    assert_eq!(contents(&json(&db, &["history"])).len(), 2);

    run_ys_ok(&db, &["clear-history", "--yes"]);
    assert!(contents(&json(&db, &["history"])).is_empty());
}

#[test]
fn test_history_search() {
    let tmp = TempDir::new().unwrap();
    let db = temp_db(&tmp);
    for text in ["pay rent", "pay 100% of bill", "water plants"] {
        let id = add(&db, text);
        run_ys_ok(&db, &["done", &id.to_string()]);
    }

    let found = json(&db, &["history", "--search", "100%"]);
    assert_eq!(contents(&found), vec!["pay 100% of bill"]);

    let found = json(&db, &["history", "--search", "pay"]);
    assert_eq!(contents(&found), vec!["pay 100% of bill", "pay rent"]);
}

#[test]
fn test_unopenable_db_fails() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("missing-dir").join("todo_data.db");

    let (_, stderr, success) = run_ys(&db, &["list"]);
    assert!(!success);
    assert!(stderr.contains("could not open database"));
}
