use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_CATEGORIES: [&str; 5] = ["Work", "Personal", "Shopping", "Health", "Other"];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed set of categories a task may be filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categories(Vec<Category>);

impl Categories {
    pub fn new<I, T>(names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut out: Vec<Category> = Vec::new();
        for name in names {
            let name: String = name.into();
            let trimmed = name.trim();
            if trimmed.is_empty() || out.iter().any(|c| c.as_str() == trimmed) {
                continue;
            }
            out.push(Category::new(trimmed));
        }
        Self(out)
    }

    pub fn contains(&self, category: &Category) -> bool {
        self.0.iter().any(|c| c == category)
    }

    pub fn find(&self, name: &str) -> Option<&Category> {
        self.0.iter().find(|c| c.as_str() == name.trim())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Categories {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,

    pub title: String,

    pub category: Category,

    pub due: NaiveDate,

    #[serde(default)]
    pub completed: bool,

    pub created_at: NaiveDate,

    /// Set on creation so the next render can highlight the card once.
    #[serde(skip)]
    pub is_new: bool,
}

impl Task {
    pub fn new(title: String, category: Category, due: NaiveDate, today: NaiveDate) -> Self {
        Self {
            id: TaskId::generate(),
            title,
            category,
            due,
            completed: false,
            created_at: today,
            is_new: true,
        }
    }

    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(due) = patch.due {
            self.due = due;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub category: Option<Category>,
    pub due: Option<NaiveDate>,
    pub completed: Option<bool>,
}
