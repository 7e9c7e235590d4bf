//! Behavioral tests for the flat-file store.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;
use taskify_core::Priority;
use taskify_store::FileStore;
use time::macros::date;

fn temp_store() -> (tempfile::TempDir, FileStore) {
    let dir = tempfile::tempdir().expect("must create temp dir");
    let store = FileStore::open(dir.path().join("taskify")).expect("must open store");
    (dir, store)
}

#[test]
fn first_run_seeds_and_second_run_loads() {
    let (_dir, store) = temp_store();
    let reference = date!(2025 - 06 - 18);

    let seeded = store.load_or_seed(reference).expect("must seed");
    assert_eq!(seeded.len(), 2);
    assert_eq!(seeded[0].title, "Review Q4 Marketing Strategy");
    assert_eq!(seeded[0].priority, Priority::High);
    assert!(seeded[0].starred);
    assert_eq!(seeded[1].title, "Update Project Documentation");
    assert_eq!(seeded[1].priority, Priority::Medium);
    assert!(seeded.iter().all(|task| task.date == reference));
    assert!(seeded.iter().all(|task| !task.completed));
    assert!(seeded.iter().all(|task| task.tag == "work"));

    // A later run, even with a different reference date, loads what was
    // seeded instead of seeding again.
    let loaded = store.load_or_seed(date!(2025 - 07 - 01)).expect("must load");
    let seeded_ids: Vec<_> = seeded.iter().map(|task| task.id).collect();
    let loaded_ids: Vec<_> = loaded.iter().map(|task| task.id).collect();
    assert_eq!(loaded_ids, seeded_ids);
    assert!(loaded.iter().all(|task| task.date == reference));
}

#[test]
fn reopening_the_store_sees_earlier_writes() {
    let dir = tempfile::tempdir().expect("must create temp dir");
    let root = dir.path().join("taskify");

    let first = FileStore::open(&root).expect("must open store");
    let tasks = first.load_or_seed(date!(2025 - 06 - 18)).expect("must seed");
    first.set_display_name("Jordan").expect("must write");
    drop(first);

    let second = FileStore::open(&root).expect("must reopen store");
    let reloaded = second
        .load_tasks()
        .expect("must load")
        .unwrap_or_else(|| panic!("tasks must survive reopen"));
    assert_eq!(reloaded, tasks);
    assert_eq!(
        second.display_name().expect("must read").as_deref(),
        Some("Jordan")
    );
}

#[test]
fn keys_are_written_independently() {
    let (_dir, store) = temp_store();
    let reference = date!(2025 - 06 - 18);
    store.load_or_seed(reference).expect("must seed");

    let tasks_path = store.root().join("tasks.json");
    let before = fs::read(&tasks_path).expect("tasks document must exist");

    store.set_pomodoro_count(9).expect("must write");
    store.set_dark_mode(true).expect("must write");
    store.set_display_name("Sam").expect("must write");

    let after = fs::read(&tasks_path).expect("tasks document must exist");
    assert_eq!(before, after, "preference writes must not rewrite tasks");

    assert!(store.root().join("pomodoro_count.json").is_file());
    assert!(store.root().join("dark_mode.json").is_file());
    assert!(store.root().join("user_name.json").is_file());
}

#[test]
fn stored_tasks_use_the_wire_date_format() {
    let (_dir, store) = temp_store();
    let mut tasks = store.load_or_seed(date!(2025 - 06 - 18)).expect("must seed");
    tasks[0].date = date!(2024 - 12 - 31);
    store.save_tasks(&tasks).expect("must save");

    let raw = fs::read_to_string(store.root().join("tasks.json")).expect("must read");
    assert!(raw.contains("\"2024-12-31\""), "raw was {raw}");
    assert!(raw.contains("\"priority\": \"high\""), "raw was {raw}");
}

#[test]
fn corrupt_preference_document_is_fatal_for_that_key_only() {
    let (_dir, store) = temp_store();
    store.load_or_seed(date!(2025 - 06 - 18)).expect("must seed");
    fs::write(store.root().join("pomodoro_count.json"), "banana").expect("must write");

    assert!(store.pomodoro_count().is_err());
    // Other keys stay readable.
    assert!(store.load_tasks().expect("must load").is_some());
    assert!(!store.dark_mode().expect("must read"));
}
