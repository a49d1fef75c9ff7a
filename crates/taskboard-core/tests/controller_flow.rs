use std::cell::Cell;
use std::time::Duration;

use chrono::NaiveDate;
use taskboard_core::storage::THEME_KEY;
use taskboard_core::{
    Categories, Category, CategoryFilter, Controller, ControllerError, DeleteOutcome, FixedClock,
    FormKind, KeyValueStorage, MemoryStorage, StatusFilter, TaskForm, Theme, ValidationError,
};
use taskboard_core::controller::{CLEAR_ALL_PROMPT, Focus};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
}

fn controller() -> Controller<MemoryStorage, FixedClock> {
    Controller::start(MemoryStorage::new(), Categories::default(), FixedClock(today()))
}

fn form(title: &str, category: &str, due: &str) -> TaskForm {
    TaskForm {
        title: title.to_string(),
        category: category.to_string(),
        due: due.to_string(),
    }
}

#[test]
fn create_adds_task_resets_form_and_focuses_title() {
    let mut ctl = controller();
    let id = ctl
        .on_submit_create(form("  Buy milk ", "Personal", "2024-01-01"))
        .expect("create");

    let task = ctl.store().get(&id).expect("task stored");
    assert_eq!(task.title, "Buy milk");
    assert!(!task.completed);
    assert_eq!(task.created_at, today());
    assert_eq!(ctl.add_form(), &TaskForm::default());
    assert_eq!(ctl.take_focus(), Focus::AddTitle);
    assert_eq!(ctl.focus(), Focus::None);

    let rendered = ctl.rendered();
    assert_eq!(rendered.cards.len(), 1);
    assert_eq!(rendered.stats.total, 1);
}

#[test]
fn create_with_empty_title_mutates_nothing() {
    let mut ctl = controller();
    ctl.on_submit_create(form("Existing", "Work", "2024-02-02"))
        .expect("create");
    let before = ctl.store().tasks().to_vec();

    let err = ctl
        .on_submit_create(form("   ", "Personal", "2024-01-01"))
        .expect_err("empty title rejected");

    match err {
        ControllerError::Validation(ValidationError::MissingFields { form, fields }) => {
            assert_eq!(form, FormKind::Create);
            assert_eq!(fields, vec!["title"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(ctl.store().tasks(), before.as_slice());
}

#[test]
fn create_rejects_unknown_category_and_bad_dates() {
    let mut ctl = controller();
    assert!(matches!(
        ctl.on_submit_create(form("x", "Errands", "2024-01-01")),
        Err(ControllerError::Validation(ValidationError::UnknownCategory(_)))
    ));
    assert!(matches!(
        ctl.on_submit_create(form("x", "Work", "01/02/2024")),
        Err(ControllerError::Validation(ValidationError::InvalidDate(_)))
    ));
    assert!(ctl.store().tasks().is_empty());
}

#[test]
fn edit_prefills_form_and_applies_changes() {
    let mut ctl = controller();
    let id = ctl
        .on_submit_create(form("Draft report", "Work", "2024-07-01"))
        .expect("create");

    let mut edit = ctl.on_open_edit(&id).expect("edit form").clone();
    assert_eq!(edit.title, "Draft report");
    assert_eq!(edit.category, "Work");
    assert_eq!(edit.due, "2024-07-01");
    assert!(!edit.completed);

    edit.title = "Final report".to_string();
    edit.completed = true;
    ctl.on_submit_edit(edit).expect("edit");

    assert!(ctl.edit_form().is_none());
    let task = ctl.store().get(&id).expect("task");
    assert_eq!(task.title, "Final report");
    assert!(task.completed);
    assert_eq!(ctl.rendered().stats.completed, 1);
}

#[test]
fn edit_with_missing_due_keeps_form_open_and_task_unchanged() {
    let mut ctl = controller();
    let id = ctl
        .on_submit_create(form("Draft", "Work", "2024-07-01"))
        .expect("create");

    let mut edit = ctl.on_open_edit(&id).expect("edit form").clone();
    edit.due.clear();
    let err = ctl.on_submit_edit(edit).expect_err("missing due rejected");

    assert_eq!(
        err.to_string(),
        "Please complete all fields before saving changes."
    );
    assert!(ctl.edit_form().is_some());
    assert_eq!(
        ctl.store().get(&id).expect("task").due,
        NaiveDate::from_ymd_opt(2024, 7, 1).expect("valid date")
    );
}

#[test]
fn open_edit_for_unknown_id_is_ignored() {
    let mut ctl = controller();
    assert!(ctl.on_open_edit(&"nope".into()).is_none());
}

#[test]
fn delete_of_visible_card_waits_for_the_fade() {
    let mut ctl = controller().with_fade_delay(Duration::from_millis(50));
    let id = ctl
        .on_submit_create(form("Trash me", "Other", "2024-01-01"))
        .expect("create");

    let outcome = ctl.on_delete(&id).expect("delete");
    assert_eq!(outcome, DeleteOutcome::Deferred(Duration::from_millis(50)));
    assert!(ctl.store().get(&id).is_some());
    assert!(ctl.rendered().card(&id).is_some_and(|card| card.fading));

    ctl.on_delete_elapsed(&id).expect("finalize");
    assert!(ctl.store().get(&id).is_none());
    assert!(ctl.rendered().cards.is_empty());
}

#[test]
fn delete_of_hidden_card_is_immediate() {
    let mut ctl = controller();
    let id = ctl
        .on_submit_create(form("Hidden", "Work", "2024-01-01"))
        .expect("create");
    ctl.on_filter_status(StatusFilter::Completed);

    assert_eq!(ctl.on_delete(&id).expect("delete"), DeleteOutcome::Immediate);
    assert!(ctl.store().tasks().is_empty());
}

#[test]
fn filters_rerender_without_mutation() {
    let mut ctl = controller();
    let a = ctl
        .on_submit_create(form("a", "Personal", "2024-01-01"))
        .expect("create");
    ctl.on_submit_create(form("b", "Work", "2024-01-01"))
        .expect("create");
    ctl.on_submit_create(form("c", "Personal", "2024-01-01"))
        .expect("create");
    ctl.on_toggle(&a).expect("toggle");
    let before = ctl.store().tasks().to_vec();

    ctl.on_filter_category(CategoryFilter::Only(Category::new("Personal")));
    let titles: Vec<String> = ctl
        .on_filter_status(StatusFilter::Pending)
        .cards
        .iter()
        .map(|card| card.title.clone())
        .collect();

    assert_eq!(titles, vec!["c".to_string()]);
    assert_eq!(ctl.store().tasks(), before.as_slice());
    assert_eq!(ctl.rendered().stats.total, 3);
}

#[test]
fn clear_completed_then_completed_filter_is_empty() {
    let mut ctl = controller();
    let a = ctl
        .on_submit_create(form("a", "Health", "2024-01-01"))
        .expect("create");
    ctl.on_submit_create(form("b", "Health", "2024-01-01"))
        .expect("create");
    ctl.on_toggle(&a).expect("toggle");

    ctl.on_clear_completed().expect("clear completed");
    let rendered = ctl.on_filter_status(StatusFilter::Completed);

    assert!(rendered.cards.is_empty());
    assert_eq!(rendered.stats.pending, 1);
}

#[test]
fn clear_all_requires_confirmation() {
    let mut ctl = controller();
    ctl.on_submit_create(form("a", "Work", "2024-01-01"))
        .expect("create");
    ctl.on_submit_create(form("b", "Work", "2024-01-01"))
        .expect("create");

    let asked = Cell::new(None::<String>);
    let decline = |message: &str| {
        asked.set(Some(message.to_string()));
        false
    };
    assert!(!ctl.on_clear_all(&decline).expect("declined"));
    assert_eq!(asked.take().as_deref(), Some(CLEAR_ALL_PROMPT));
    assert_eq!(ctl.store().tasks().len(), 2);

    assert!(ctl.on_clear_all(&|_: &str| true).expect("confirmed"));
    assert!(ctl.store().tasks().is_empty());
    assert_eq!(ctl.rendered().stats.total, 0);
}

#[test]
fn theme_is_restored_and_persisted_separately() {
    let storage = MemoryStorage::new().with_item(THEME_KEY, "dark");
    let mut ctl = Controller::start(storage, Categories::default(), FixedClock(today()));
    assert_eq!(ctl.theme(), Theme::Dark);

    assert_eq!(ctl.on_theme_toggle(false), Theme::Light);
    assert_eq!(
        ctl.store()
            .storage()
            .get_item(THEME_KEY)
            .expect("read")
            .as_deref(),
        Some("light")
    );
    assert!(ctl.store().tasks().is_empty());
}

#[test]
fn startup_with_corrupt_storage_starts_empty() {
    let storage = MemoryStorage::new().with_item(taskboard_core::storage::TASKS_KEY, "[{\"id\":1}]");
    let ctl = Controller::start(storage, Categories::default(), FixedClock(today()));
    assert!(ctl.store().tasks().is_empty());
    assert_eq!(ctl.theme(), Theme::Light);
}
