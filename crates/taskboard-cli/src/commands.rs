use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, anyhow};
use taskboard_core::{
    CategoryFilter, Clock, Confirm, Controller, DeleteOutcome, KeyValueStorage, StatusFilter,
    TaskForm, TaskId, Theme,
};
use tracing::{debug, info, instrument, warn};

use crate::cli::{Command, FilterArgs, ThemeArg};
use crate::render::Renderer;

/// Asks on the terminal before destructive commands.
#[derive(Debug, Clone, Copy)]
pub struct PromptConfirm {
    pub assume_yes: bool,
}

impl Confirm for PromptConfirm {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        if !io::stdin().is_terminal() {
            warn!("stdin is not a terminal; refusing without --yes");
            return false;
        }

        let mut err = io::stderr().lock();
        if write!(err, "{message} [y/N] ").and_then(|()| err.flush()).is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

#[instrument(skip(ctl, renderer, command))]
pub fn dispatch<S, C>(
    ctl: &mut Controller<S, C>,
    renderer: &Renderer,
    command: Command,
    today: chrono::NaiveDate,
) -> anyhow::Result<()>
where
    S: KeyValueStorage,
    C: Clock,
{
    debug!(?command, "dispatching command");

    match command {
        Command::Add {
            title,
            category,
            due,
        } => cmd_add(ctl, title.join(" "), category, due),
        Command::List(filters) => cmd_list(ctl, renderer, &filters, today),
        Command::Toggle { id } => cmd_toggle(ctl, &id),
        Command::Edit {
            id,
            title,
            category,
            due,
            completed,
        } => cmd_edit(ctl, &id, title, category, due, completed),
        Command::Delete { id } => cmd_delete(ctl, &id),
        Command::ClearCompleted => cmd_clear_completed(ctl),
        Command::ClearAll { yes } => cmd_clear_all(ctl, &PromptConfirm { assume_yes: yes }),
        Command::Stats => renderer.write_stats(io::stdout().lock(), ctl.rendered().stats),
        Command::Theme { mode } => cmd_theme(ctl, renderer, mode),
        Command::Html(filters) => cmd_html(ctl, &filters),
        Command::Categories => cmd_categories(ctl),
    }
}

fn resolve_id<S: KeyValueStorage, C: Clock>(
    ctl: &Controller<S, C>,
    raw: &str,
) -> anyhow::Result<TaskId> {
    ctl.store()
        .resolve(raw)
        .cloned()
        .ok_or_else(|| anyhow!("no single task matches id `{raw}`"))
}

fn apply_filters<S: KeyValueStorage, C: Clock>(
    ctl: &mut Controller<S, C>,
    filters: &FilterArgs,
) -> anyhow::Result<()> {
    let Ok(category) = filters.category.parse::<CategoryFilter>();
    if let CategoryFilter::Only(name) = &category
        && !ctl.categories().contains(name)
    {
        return Err(anyhow!("unknown category `{name}`"));
    }
    let status = filters
        .status
        .parse::<StatusFilter>()
        .map_err(|err| anyhow!(err))?;

    ctl.on_filter_category(category);
    ctl.on_filter_status(status);
    Ok(())
}

fn cmd_add<S: KeyValueStorage, C: Clock>(
    ctl: &mut Controller<S, C>,
    title: String,
    category: String,
    due: String,
) -> anyhow::Result<()> {
    let id = ctl.on_submit_create(TaskForm {
        title,
        category,
        due,
    })?;
    info!(%id, "task created");
    println!("Created task {id}.");
    Ok(())
}

fn cmd_list<S: KeyValueStorage, C: Clock>(
    ctl: &mut Controller<S, C>,
    renderer: &Renderer,
    filters: &FilterArgs,
    today: chrono::NaiveDate,
) -> anyhow::Result<()> {
    apply_filters(ctl, filters)?;
    renderer.print_task_table(ctl.rendered(), ctl.store(), today)
}

fn cmd_toggle<S: KeyValueStorage, C: Clock>(
    ctl: &mut Controller<S, C>,
    raw_id: &str,
) -> anyhow::Result<()> {
    let id = resolve_id(ctl, raw_id)?;
    ctl.on_toggle(&id)
        .with_context(|| format!("failed to save task {id}"))?;

    let state = match ctl.store().get(&id) {
        Some(task) if task.completed => "completed",
        _ => "pending",
    };
    println!("Task {id} is now {state}.");
    Ok(())
}

fn cmd_edit<S: KeyValueStorage, C: Clock>(
    ctl: &mut Controller<S, C>,
    raw_id: &str,
    title: Option<String>,
    category: Option<String>,
    due: Option<String>,
    completed: Option<bool>,
) -> anyhow::Result<()> {
    let id = resolve_id(ctl, raw_id)?;
    let mut form = ctl
        .on_open_edit(&id)
        .cloned()
        .ok_or_else(|| anyhow!("task {id} disappeared"))?;

    if let Some(title) = title {
        form.title = title;
    }
    if let Some(category) = category {
        form.category = category;
    }
    if let Some(due) = due {
        form.due = due;
    }
    if let Some(completed) = completed {
        form.completed = completed;
    }

    ctl.on_submit_edit(form)?;
    println!("Updated task {id}.");
    Ok(())
}

fn cmd_delete<S: KeyValueStorage, C: Clock>(
    ctl: &mut Controller<S, C>,
    raw_id: &str,
) -> anyhow::Result<()> {
    let id = resolve_id(ctl, raw_id)?;
    // A terminal has no card to fade, so the removal is finalized right away.
    if let DeleteOutcome::Deferred(delay) = ctl.on_delete(&id)? {
        debug!(?delay, "skipping fade delay");
        ctl.on_delete_elapsed(&id)?;
    }
    println!("Deleted task {id}.");
    Ok(())
}

fn cmd_clear_completed<S: KeyValueStorage, C: Clock>(
    ctl: &mut Controller<S, C>,
) -> anyhow::Result<()> {
    let before = ctl.store().tasks().len();
    ctl.on_clear_completed()?;
    println!(
        "Removed {} completed task(s).",
        before - ctl.store().tasks().len()
    );
    Ok(())
}

fn cmd_clear_all<S: KeyValueStorage, C: Clock>(
    ctl: &mut Controller<S, C>,
    confirm: &impl Confirm,
) -> anyhow::Result<()> {
    if ctl.on_clear_all(confirm)? {
        println!("Removed all tasks.");
    } else {
        println!("Nothing removed.");
    }
    Ok(())
}

fn cmd_theme<S: KeyValueStorage, C: Clock>(
    ctl: &mut Controller<S, C>,
    renderer: &Renderer,
    mode: Option<ThemeArg>,
) -> anyhow::Result<()> {
    let theme = match mode {
        None => ctl.theme(),
        Some(ThemeArg::Light) => ctl.on_theme_toggle(false),
        Some(ThemeArg::Dark) => ctl.on_theme_toggle(true),
        Some(ThemeArg::Toggle) => {
            let next: Theme = ctl.theme().next();
            ctl.on_theme_toggle(next.is_dark())
        }
    };
    renderer.print_theme(theme)
}

fn cmd_html<S: KeyValueStorage, C: Clock>(
    ctl: &mut Controller<S, C>,
    filters: &FilterArgs,
) -> anyhow::Result<()> {
    apply_filters(ctl, filters)?;
    print!("{}", ctl.rendered().to_html());
    Ok(())
}

fn cmd_categories<S: KeyValueStorage, C: Clock>(ctl: &Controller<S, C>) -> anyhow::Result<()> {
    for category in ctl.categories().iter() {
        println!("{category}");
    }
    Ok(())
}
