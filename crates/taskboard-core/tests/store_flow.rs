use std::collections::HashSet;

use chrono::NaiveDate;
use proptest::prelude::*;
use taskboard_core::storage::TASKS_KEY;
use taskboard_core::{
    Category, CategoryFilter, Filters, KeyValueStorage, MemoryStorage, StatusFilter, Stats, Store,
    TaskId, TaskPatch,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn seeded_store() -> Store<MemoryStorage> {
    let mut store = Store::open(MemoryStorage::new());
    let today = date(2024, 1, 1);
    for (title, category) in [
        ("File taxes", "Work"),
        ("Buy milk", "Personal"),
        ("Book dentist", "Health"),
        ("Call mom", "Personal"),
    ] {
        store
            .add(
                title.to_string(),
                Category::new(category),
                date(2024, 2, 1),
                today,
            )
            .expect("add task");
    }
    store
}

#[test]
fn add_creates_pending_task_dated_today_at_the_front() {
    let mut store = seeded_store();
    let today = date(2024, 6, 15);
    let id = store
        .add(
            "Buy milk".to_string(),
            Category::new("Personal"),
            date(2024, 1, 1),
            today,
        )
        .expect("add task");

    let first = &store.tasks()[0];
    assert_eq!(first.id, id);
    assert_eq!(first.title, "Buy milk");
    assert_eq!(first.category.as_str(), "Personal");
    assert_eq!(first.due, date(2024, 1, 1));
    assert!(!first.completed);
    assert_eq!(first.created_at, today);
    assert!(first.is_new);
}

#[test]
fn ids_are_unique() {
    let mut store = Store::open(MemoryStorage::new());
    let day = date(2024, 1, 1);
    for n in 0..200 {
        store
            .add(format!("task {n}"), Category::new("Work"), day, day)
            .expect("add task");
    }
    let ids: HashSet<&TaskId> = store.tasks().iter().map(|t| &t.id).collect();
    assert_eq!(ids.len(), 200);
}

#[test]
fn toggling_twice_restores_completion() {
    let mut store = seeded_store();
    let id = store.tasks()[1].id.clone();

    store.toggle_completed(&id).expect("toggle");
    assert!(store.get(&id).expect("task").completed);
    store.toggle_completed(&id).expect("toggle");
    assert!(!store.get(&id).expect("task").completed);
}

#[test]
fn lookup_misses_are_no_ops() {
    let mut store = seeded_store();
    let before = store.tasks().to_vec();
    let missing = TaskId::from("does-not-exist");

    store.toggle_completed(&missing).expect("toggle");
    store
        .update(
            &missing,
            TaskPatch {
                title: Some("x".to_string()),
                ..TaskPatch::default()
            },
        )
        .expect("update");
    store.remove(&missing).expect("remove");

    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn update_replaces_named_fields() {
    let mut store = seeded_store();
    let id = store.tasks()[0].id.clone();
    store
        .update(
            &id,
            TaskPatch {
                title: Some("Call dad".to_string()),
                due: Some(date(2024, 3, 3)),
                ..TaskPatch::default()
            },
        )
        .expect("update");

    let task = store.get(&id).expect("task");
    assert_eq!(task.title, "Call dad");
    assert_eq!(task.due, date(2024, 3, 3));
    assert_eq!(task.category.as_str(), "Personal");
}

#[test]
fn clear_completed_leaves_no_completed_tasks() {
    let mut store = seeded_store();
    let ids: Vec<TaskId> = store.tasks().iter().take(2).map(|t| t.id.clone()).collect();
    for id in &ids {
        store.toggle_completed(id).expect("toggle");
    }

    store.clear_completed().expect("clear completed");

    let completed = Filters::new(CategoryFilter::All, StatusFilter::Completed);
    assert!(completed.apply(store.tasks()).is_empty());
    assert_eq!(store.tasks().len(), 2);
}

#[test]
fn reload_round_trips_everything_but_the_new_flag() {
    let mut store = seeded_store();
    let id = store.tasks()[2].id.clone();
    store.toggle_completed(&id).expect("toggle");
    let before = store.tasks().to_vec();

    let reopened = Store::open(store.into_storage());

    assert_eq!(reopened.tasks().len(), before.len());
    for (loaded, original) in reopened.tasks().iter().zip(&before) {
        let mut original = original.clone();
        original.is_new = false;
        assert_eq!(*loaded, original);
    }
}

#[test]
fn corrupt_collection_loads_empty() {
    let storage = MemoryStorage::new().with_item(TASKS_KEY, "{not json");
    let store = Store::open(storage);
    assert!(store.tasks().is_empty());
}

#[test]
fn saved_collection_is_a_json_array_without_new_flags() {
    let store = seeded_store();
    let raw = store
        .storage()
        .get_item(TASKS_KEY)
        .expect("read")
        .expect("tasks key present");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    let items = value.as_array().expect("array");
    assert_eq!(items.len(), 4);
    assert!(items.iter().all(|item| item.get("isNew").is_none()));
    assert_eq!(items[0]["title"], "Call mom");
}

#[test]
fn resolve_accepts_unique_prefixes() {
    let store = seeded_store();
    let id = store.tasks()[0].id.clone();
    assert_eq!(store.resolve(id.as_str()), Some(&id));
    assert_eq!(store.resolve(&id.as_str()[..8]), Some(&id));
    assert_eq!(store.resolve(""), None);
}

proptest! {
    #[test]
    fn stats_always_add_up(flags in proptest::collection::vec(any::<bool>(), 0..40)) {
        let mut store = Store::open(MemoryStorage::new());
        let day = date(2024, 1, 1);
        for (n, done) in flags.iter().enumerate() {
            let id = store
                .add(format!("t{n}"), Category::new("Other"), day, day)
                .expect("add task");
            if *done {
                store.toggle_completed(&id).expect("toggle");
            }
        }

        let Stats { total, completed, pending } = store.stats();
        prop_assert_eq!(total, completed + pending);
        prop_assert_eq!(total, flags.len());
        prop_assert_eq!(completed, flags.iter().filter(|f| **f).count());
    }
}
