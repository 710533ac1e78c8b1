use dashstore::key::StoreKey;
use dashstore::store::fs_tier::FsTier;
use dashstore::store::{Tier, TierKind};
use std::fs;
use tempfile::TempDir;

fn key(raw: &str) -> StoreKey {
    StoreKey::new(raw).unwrap()
}

#[test]
fn writes_one_file_per_key_without_leftovers() {
    let dir = TempDir::new().unwrap();
    let tier = FsTier::new(dir.path().join("nested").join("data"));
    assert_eq!(tier.kind(), TierKind::Durable);

    tier.write(&key("todos"), "[]").unwrap();
    tier.write(&key("todos"), r#"[{"id":"1"}]"#).unwrap();
    tier.write(&key("daily-focus"), "{}").unwrap();

    let mut names: Vec<String> = fs::read_dir(tier.root())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["daily-focus.json", "todos.json"]);
}

#[test]
fn compact_mode_writes_document_verbatim() {
    let dir = TempDir::new().unwrap();
    let tier = FsTier::new(dir.path()).with_pretty(false);

    tier.write(&key("notes"), r#"{"a":[1,2]}"#).unwrap();
    let raw = fs::read_to_string(dir.path().join("notes.json")).unwrap();
    assert_eq!(raw, r#"{"a":[1,2]}"#);
}

#[test]
fn pretty_mode_still_reads_back_the_same_document() {
    let dir = TempDir::new().unwrap();
    let tier = FsTier::new(dir.path());

    tier.write(&key("notes"), r#"{"a":[1,2]}"#).unwrap();
    let raw = tier.read(&key("notes")).unwrap().unwrap();
    assert!(raw.contains('\n'));
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc, serde_json::json!({"a": [1, 2]}));
}

#[test]
fn keys_ignore_foreign_files() {
    let dir = TempDir::new().unwrap();
    let tier = FsTier::new(dir.path());
    tier.write(&key("reminders"), "[]").unwrap();

    fs::write(dir.path().join("README.txt"), "hello").unwrap();
    fs::write(dir.path().join(".todos-123.tmp"), "[]").unwrap();
    fs::create_dir(dir.path().join("backup.json")).unwrap();

    assert_eq!(tier.keys().unwrap(), vec![key("reminders")]);
}

#[test]
fn clear_leaves_foreign_files_alone() {
    let dir = TempDir::new().unwrap();
    let tier = FsTier::new(dir.path());
    tier.write(&key("a"), "1").unwrap();
    tier.write(&key("b"), "2").unwrap();
    fs::write(dir.path().join("notes.txt"), "keep me").unwrap();

    assert_eq!(tier.clear().unwrap(), 2);
    assert!(tier.keys().unwrap().is_empty());
    assert!(dir.path().join("notes.txt").exists());
}

#[test]
fn missing_root_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let tier = FsTier::new(dir.path().join("not-yet"));

    assert!(tier.is_available());
    assert_eq!(tier.read(&key("todos")).unwrap(), None);
    assert_eq!(tier.modified(&key("todos")).unwrap(), None);
    assert!(tier.keys().unwrap().is_empty());
    tier.remove(&key("todos")).unwrap();
}

#[test]
fn location_is_the_key_file() {
    let dir = TempDir::new().unwrap();
    let tier = FsTier::new(dir.path());
    assert_eq!(
        tier.location(&key("pomodoro-history")),
        dir.path().join("pomodoro-history.json")
    );
}
