use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::storage::{KeyValueStorage, TASKS_KEY};
use crate::task::{Category, Task, TaskId, TaskPatch};
use crate::view::Stats;

/// The task collection and its persistence mirror.
///
/// Every mutation is applied in memory first and then written through with
/// [`Store::save`]. A failed write is reported but never rolled back.
#[derive(Debug)]
pub struct Store<S> {
    storage: S,
    tasks: Vec<Task>,
}

impl<S: KeyValueStorage> Store<S> {
    /// Wraps `storage` and loads whatever collection it already holds.
    pub fn open(storage: S) -> Self {
        let mut store = Self {
            storage,
            tasks: Vec::new(),
        };
        store.load();
        store
    }

    #[tracing::instrument(skip(self))]
    pub fn load(&mut self) {
        self.tasks = match self.storage.get_item(TASKS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Task>>(&raw) {
                Ok(tasks) => tasks,
                Err(err) => {
                    warn!(error = %err, "stored task collection is malformed; starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "failed reading task collection; starting empty");
                Vec::new()
            }
        };
        debug!(count = self.tasks.len(), "loaded task collection");
    }

    #[tracing::instrument(skip(self), fields(count = self.tasks.len()))]
    pub fn save(&mut self) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(&self.tasks)?;
        self.storage.set_item(TASKS_KEY, &serialized)
    }

    #[tracing::instrument(skip(self, title))]
    pub fn add(
        &mut self,
        title: String,
        category: Category,
        due: NaiveDate,
        today: NaiveDate,
    ) -> Result<TaskId, StoreError> {
        let task = Task::new(title, category, due, today);
        let id = task.id.clone();
        self.tasks.insert(0, task);
        info!(%id, "added task");
        self.save()?;
        Ok(id)
    }

    #[tracing::instrument(skip(self, id), fields(id = %id))]
    pub fn toggle_completed(&mut self, id: &TaskId) -> Result<(), StoreError> {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == *id) {
            task.completed = !task.completed;
            debug!(completed = task.completed, "toggled task");
        } else {
            debug!("toggle for unknown task ignored");
        }
        self.save()
    }

    #[tracing::instrument(skip(self, id, patch), fields(id = %id))]
    pub fn update(&mut self, id: &TaskId, patch: TaskPatch) -> Result<(), StoreError> {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == *id) {
            task.apply(patch);
            debug!("updated task");
        } else {
            debug!("update for unknown task ignored");
        }
        self.save()
    }

    #[tracing::instrument(skip(self, id), fields(id = %id))]
    pub fn remove(&mut self, id: &TaskId) -> Result<(), StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != *id);
        info!(removed = before - self.tasks.len(), "removed task");
        self.save()
    }

    #[tracing::instrument(skip(self))]
    pub fn clear_completed(&mut self) -> Result<(), StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        info!(
            before,
            after = self.tasks.len(),
            "cleared completed tasks"
        );
        self.save()
    }

    #[tracing::instrument(skip(self))]
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        info!(count = self.tasks.len(), "clearing all tasks");
        self.tasks.clear();
        self.save()
    }

    /// Drops the one-time highlight flag once the cards have been shown.
    pub fn acknowledge_new(&mut self, ids: &[TaskId]) -> Result<(), StoreError> {
        let mut changed = false;
        for task in self.tasks.iter_mut().filter(|t| t.is_new) {
            if ids.contains(&task.id) {
                task.is_new = false;
                changed = true;
            }
        }
        if changed { self.save() } else { Ok(()) }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == *id)
    }

    /// Resolves a full id or any prefix that matches exactly one task.
    pub fn resolve(&self, prefix: &str) -> Option<&TaskId> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return None;
        }
        if let Some(task) = self.tasks.iter().find(|t| t.id.as_str() == prefix) {
            return Some(&task.id);
        }

        let mut matches = self
            .tasks
            .iter()
            .filter(|t| t.id.as_str().starts_with(prefix));
        let first = matches.next()?;
        if matches.next().is_some() {
            None
        } else {
            Some(&first.id)
        }
    }

    pub fn stats(&self) -> Stats {
        Stats::of(&self.tasks)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
