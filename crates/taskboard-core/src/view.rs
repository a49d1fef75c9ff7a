use std::fmt::Write as _;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::filter::Filters;
use crate::storage::KeyValueStorage;
use crate::store::Store;
use crate::task::{Task, TaskId};

pub const FADE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl Stats {
    pub fn of(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total,
            completed,
            pending: total - completed,
        }
    }
}

/// One visible task. Text fields are raw; [`Rendered::to_html`] escapes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub id: TaskId,
    pub title: String,
    pub category: String,
    pub due: String,
    pub created: String,
    pub completed: bool,
    pub highlight: bool,
    pub fading: bool,
}

impl TaskCard {
    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            category: task.category.to_string(),
            due: format_date(task.due),
            created: format_date(task.created_at),
            completed: task.completed,
            highlight: task.is_new,
            fading: false,
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.completed { "Completed" } else { "Mark Done" }
    }

    pub fn toggle_class(&self) -> &'static str {
        if self.completed {
            "btn-outline-success"
        } else {
            "btn-outline-warning"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rendered {
    pub cards: Vec<TaskCard>,
    pub stats: Stats,
}

impl Rendered {
    pub fn card(&self, id: &TaskId) -> Option<&TaskCard> {
        self.cards.iter().find(|card| card.id == *id)
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for card in &self.cards {
            let id = escape_html(card.id.as_str());
            let mut card_class = String::from("card h-100");
            if card.highlight {
                card_class.push_str(" new-pulse");
            }
            if card.fading {
                card_class.push_str(" fade-out");
            }
            let _ = write!(
                out,
                concat!(
                    "<div class=\"col-12 col-sm-6 col-md-4 task-card\">",
                    "<div class=\"{card_class}\" data-id=\"{id}\">",
                    "<div class=\"card-body d-flex flex-column\">",
                    "<div class=\"d-flex justify-content-between align-items-start mb-2\">",
                    "<h6 class=\"card-title mb-0\">{title}</h6>",
                    "<span class=\"badge badge-category bg-secondary\">{category}</span>",
                    "</div>",
                    "<p class=\"card-text text-muted mb-2\">Due: {due}</p>",
                    "<div class=\"mt-auto d-flex justify-content-between align-items-center\">",
                    "<div class=\"btn-group\" role=\"group\" aria-label=\"Task actions\">",
                    "<button class=\"btn btn-sm btn-outline-primary btn-edit\" data-id=\"{id}\">Edit</button>",
                    "<button class=\"btn btn-sm {toggle_class} btn-toggle\" data-id=\"{id}\">{toggle_label}</button>",
                    "</div>",
                    "<div><button class=\"btn btn-sm btn-danger btn-delete\" data-id=\"{id}\" title=\"Delete task\">Delete</button></div>",
                    "</div></div>",
                    "<div class=\"card-footer text-end\"><small class=\"text-muted\">Created: {created}</small></div>",
                    "</div></div>\n",
                ),
                card_class = card_class,
                id = id,
                title = escape_html(&card.title),
                category = escape_html(&card.category),
                due = escape_html(&card.due),
                toggle_class = card.toggle_class(),
                toggle_label = card.toggle_label(),
                created = escape_html(&card.created),
            );
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The card is fading out; finalize the removal after the delay.
    Deferred(Duration),
    /// Nothing on screen to animate; remove now.
    Immediate,
}

/// Derives the visible cards from the collection and the active filters.
#[derive(Debug, Clone)]
pub struct View {
    rendered: Rendered,
    fade_delay: Duration,
}

impl Default for View {
    fn default() -> Self {
        Self::new(FADE_DELAY)
    }
}

impl View {
    pub fn new(fade_delay: Duration) -> Self {
        Self {
            rendered: Rendered::default(),
            fade_delay,
        }
    }

    /// Replaces the previous output wholesale, then clears the highlight flag
    /// of every task that was just shown highlighted.
    #[tracing::instrument(skip_all, fields(category = %filters.category, status = %filters.status))]
    pub fn render<S: KeyValueStorage>(&mut self, store: &mut Store<S>, filters: &Filters) -> &Rendered {
        let cards: Vec<TaskCard> = filters
            .apply(store.tasks())
            .into_iter()
            .map(TaskCard::from_task)
            .collect();
        let highlighted: Vec<TaskId> = cards
            .iter()
            .filter(|card| card.highlight)
            .map(|card| card.id.clone())
            .collect();

        self.rendered.cards = cards;
        self.update_stats(store.tasks());
        debug!(
            visible = self.rendered.cards.len(),
            total = self.rendered.stats.total,
            "rendered task cards"
        );

        if !highlighted.is_empty()
            && let Err(err) = store.acknowledge_new(&highlighted)
        {
            warn!(error = %err, "failed persisting cleared highlight flags");
        }

        &self.rendered
    }

    pub fn rendered(&self) -> &Rendered {
        &self.rendered
    }

    pub fn begin_delete(&mut self, id: &TaskId) -> DeleteOutcome {
        match self.rendered.cards.iter_mut().find(|card| card.id == *id) {
            Some(card) => {
                card.fading = true;
                DeleteOutcome::Deferred(self.fade_delay)
            }
            None => DeleteOutcome::Immediate,
        }
    }

    pub fn update_stats(&mut self, tasks: &[Task]) -> Stats {
        self.rendered.stats = Stats::of(tasks);
        self.rendered.stats
    }
}

pub fn escape_html(unsafe_text: &str) -> String {
    let mut out = String::with_capacity(unsafe_text.len());
    for ch in unsafe_text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// `Jan 1, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
