use std::fmt;
use std::str::FromStr;

use crate::task::{Category, Task};

pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

/// The (category, status) pair selecting which cards are visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filters {
    pub category: CategoryFilter,
    pub status: StatusFilter,
}

impl CategoryFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => task.category == *category,
        }
    }
}

impl StatusFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.completed,
            Self::Completed => task.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => ALL,
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl Filters {
    pub fn new(category: CategoryFilter, status: StatusFilter) -> Self {
        Self { category, status }
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.category.matches(task) && self.status.matches(task)
    }

    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            Ok(Self::All)
        } else {
            Ok(Self::Only(Category::new(trimmed)))
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | ALL => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(format!(
                "unknown status filter `{other}`; expected all, pending or completed"
            )),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(category) => write!(f, "{category}"),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn task(title: &str, category: &str, completed: bool) -> Task {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        let mut task = Task::new(title.to_string(), Category::new(category), day, day);
        task.completed = completed;
        task
    }

    #[test]
    fn personal_pending_keeps_only_matching_tasks_in_order() {
        let tasks = vec![
            task("a", "Personal", false),
            task("b", "Work", false),
            task("c", "Personal", true),
            task("d", "Personal", false),
        ];
        let filters = Filters::new(
            CategoryFilter::Only(Category::new("Personal")),
            StatusFilter::Pending,
        );

        let titles: Vec<&str> = filters
            .apply(&tasks)
            .into_iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["a", "d"]);
    }

    #[test]
    fn wildcards_match_everything() {
        let tasks = vec![task("a", "Work", true), task("b", "Health", false)];
        assert_eq!(Filters::default().apply(&tasks).len(), 2);
    }

    #[test]
    fn parses_ui_values() {
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "Work".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(Category::new("Work")))
        );
        assert_eq!("Completed".parse::<StatusFilter>(), Ok(StatusFilter::Completed));
        assert!("done".parse::<StatusFilter>().is_err());
        assert_eq!(StatusFilter::Pending.to_string(), "pending");
    }
}
