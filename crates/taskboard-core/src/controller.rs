use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{ControllerError, FormKind, StoreError, ValidationError};
use crate::filter::{CategoryFilter, Filters, StatusFilter};
use crate::storage::KeyValueStorage;
use crate::store::Store;
use crate::task::{Categories, Category, TaskId, TaskPatch};
use crate::theme::{Theme, load_theme, save_theme};
use crate::view::{DeleteOutcome, Rendered, View};

pub const CLEAR_ALL_PROMPT: &str =
    "Are you sure you want to remove ALL tasks? This cannot be undone.";

/// Asks the user to approve a destructive action.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// Raw values of the add form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub category: String,
    pub due: String,
}

/// Raw values of the edit form, pre-filled from the task being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub id: TaskId,
    pub title: String,
    pub category: String,
    pub due: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    AddTitle,
}

/// Translates user events into store mutations and view refreshes.
///
/// Every `on_*` method is a binding point for a UI adapter. Mutating
/// handlers persist through the store and re-render before returning.
#[derive(Debug)]
pub struct Controller<S, C = SystemClock> {
    store: Store<S>,
    view: View,
    clock: C,
    categories: Categories,
    filters: Filters,
    theme: Theme,
    add_form: TaskForm,
    edit_form: Option<EditForm>,
    focus: Focus,
}

impl<S: KeyValueStorage, C: Clock> Controller<S, C> {
    /// Opens the store, restores the theme and performs the first render.
    pub fn start(storage: S, categories: Categories, clock: C) -> Self {
        let store = Store::open(storage);
        let mut controller = Self {
            store,
            view: View::default(),
            clock,
            categories,
            filters: Filters::default(),
            theme: Theme::Light,
            add_form: TaskForm::default(),
            edit_form: None,
            focus: Focus::None,
        };

        let theme = load_theme(controller.store.storage());
        controller.apply_theme(theme);
        controller.refresh();
        info!(
            tasks = controller.store.tasks().len(),
            theme = theme.storage_value(),
            "controller started"
        );
        controller
    }

    pub fn with_fade_delay(mut self, fade_delay: Duration) -> Self {
        self.view = View::new(fade_delay);
        self.refresh();
        self
    }

    pub fn refresh(&mut self) -> &Rendered {
        self.view.render(&mut self.store, &self.filters)
    }

    #[tracing::instrument(skip_all)]
    pub fn on_submit_create(&mut self, form: TaskForm) -> Result<TaskId, ControllerError> {
        let (title, category, due) = self.validate(
            FormKind::Create,
            &form.title,
            &form.category,
            &form.due,
        )?;

        let today = self.clock.today();
        let result = self.store.add(title, category, due, today);

        self.add_form = TaskForm::default();
        self.focus = Focus::AddTitle;
        self.refresh();
        Ok(result?)
    }

    pub fn on_open_edit(&mut self, id: &TaskId) -> Option<&EditForm> {
        let Some(task) = self.store.get(id) else {
            debug!(%id, "edit requested for unknown task");
            return None;
        };
        self.edit_form = Some(EditForm {
            id: task.id.clone(),
            title: task.title.clone(),
            category: task.category.to_string(),
            due: task.due.format("%Y-%m-%d").to_string(),
            completed: task.completed,
        });
        self.edit_form.as_ref()
    }

    #[tracing::instrument(skip_all, fields(id = %form.id))]
    pub fn on_submit_edit(&mut self, form: EditForm) -> Result<(), ControllerError> {
        let (title, category, due) =
            self.validate(FormKind::Edit, &form.title, &form.category, &form.due)?;

        let patch = TaskPatch {
            title: Some(title),
            category: Some(category),
            due: Some(due),
            completed: Some(form.completed),
        };
        let result = self.store.update(&form.id, patch);

        self.edit_form = None;
        self.refresh();
        Ok(result?)
    }

    pub fn on_cancel_edit(&mut self) {
        self.edit_form = None;
    }

    pub fn on_toggle(&mut self, id: &TaskId) -> Result<(), StoreError> {
        let result = self.store.toggle_completed(id);
        self.refresh();
        result
    }

    /// Starts the fade-out of a card. When this returns
    /// [`DeleteOutcome::Deferred`] the caller finalizes with
    /// [`Controller::on_delete_elapsed`] once the delay has passed.
    pub fn on_delete(&mut self, id: &TaskId) -> Result<DeleteOutcome, StoreError> {
        match self.view.begin_delete(id) {
            DeleteOutcome::Immediate => {
                self.on_delete_elapsed(id)?;
                Ok(DeleteOutcome::Immediate)
            }
            deferred => Ok(deferred),
        }
    }

    pub fn on_delete_elapsed(&mut self, id: &TaskId) -> Result<(), StoreError> {
        let result = self.store.remove(id);
        if self.edit_form.as_ref().is_some_and(|form| form.id == *id) {
            self.edit_form = None;
        }
        self.refresh();
        result
    }

    pub fn on_clear_completed(&mut self) -> Result<(), StoreError> {
        let result = self.store.clear_completed();
        self.refresh();
        result
    }

    /// Returns whether the collection was cleared.
    pub fn on_clear_all(&mut self, confirm: &impl Confirm) -> Result<bool, StoreError> {
        if !confirm.confirm(CLEAR_ALL_PROMPT) {
            info!("clear all declined");
            return Ok(false);
        }
        let result = self.store.clear_all();
        self.refresh();
        result.map(|()| true)
    }

    pub fn on_filter_category(&mut self, category: CategoryFilter) -> &Rendered {
        self.filters.category = category;
        self.refresh()
    }

    pub fn on_filter_status(&mut self, status: StatusFilter) -> &Rendered {
        self.filters.status = status;
        self.refresh()
    }

    pub fn on_theme_toggle(&mut self, dark: bool) -> Theme {
        self.apply_theme(Theme::from_dark(dark));
        self.theme
    }

    pub fn on_show_add_task(&mut self) {
        self.focus = Focus::AddTitle;
    }

    pub fn on_reset_form(&mut self) {
        self.add_form = TaskForm::default();
        self.focus = Focus::AddTitle;
    }

    /// Clears the pending focus request once the adapter has honored it.
    pub fn take_focus(&mut self) -> Focus {
        std::mem::take(&mut self.focus)
    }

    pub fn rendered(&self) -> &Rendered {
        self.view.rendered()
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn add_form(&self) -> &TaskForm {
        &self.add_form
    }

    pub fn edit_form(&self) -> Option<&EditForm> {
        self.edit_form.as_ref()
    }

    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
        save_theme(self.store.storage_mut(), theme);
    }

    fn validate(
        &self,
        form: FormKind,
        title: &str,
        category: &str,
        due: &str,
    ) -> Result<(String, Category, NaiveDate), ValidationError> {
        let title = title.trim();
        let category = category.trim();
        let due = due.trim();

        let mut missing = Vec::new();
        if title.is_empty() {
            missing.push("title");
        }
        if category.is_empty() {
            missing.push("category");
        }
        if due.is_empty() {
            missing.push("due");
        }
        if !missing.is_empty() {
            warn!(?form, ?missing, "rejected task form");
            return Err(ValidationError::MissingFields {
                form,
                fields: missing,
            });
        }

        let category = self
            .categories
            .find(category)
            .cloned()
            .ok_or_else(|| ValidationError::UnknownCategory(category.to_string()))?;
        let due = NaiveDate::parse_from_str(due, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(due.to_string()))?;

        Ok((title.to_string(), category, due))
    }
}
