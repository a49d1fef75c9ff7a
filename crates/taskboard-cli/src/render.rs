use std::io::{self, IsTerminal, Write};

use chrono::NaiveDate;
use taskboard_core::{KeyValueStorage, Rendered, Stats, Store, Theme};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

const SHORT_ID_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> Self {
        Self {
            color: cfg.get_bool("color").unwrap_or(true),
        }
    }

    #[tracing::instrument(skip_all)]
    pub fn print_task_table<S: KeyValueStorage>(
        &self,
        rendered: &Rendered,
        store: &Store<S>,
        today: NaiveDate,
    ) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_task_table(&mut out, rendered, store, today)?;
        self.write_stats(&mut out, rendered.stats)
    }

    pub fn write_task_table<W: Write, S: KeyValueStorage>(
        &self,
        mut out: W,
        rendered: &Rendered,
        store: &Store<S>,
        today: NaiveDate,
    ) -> anyhow::Result<()> {
        if rendered.cards.is_empty() {
            writeln!(out, "No tasks.")?;
            return Ok(());
        }

        let headers = vec![
            "ID".to_string(),
            "Due".to_string(),
            "Category".to_string(),
            "Title".to_string(),
            "Status".to_string(),
            "Created".to_string(),
        ];

        let mut rows = Vec::with_capacity(rendered.cards.len());
        for card in &rendered.cards {
            let id: String = card.id.as_str().chars().take(SHORT_ID_LEN).collect();
            let id = self.paint(&id, "33");

            let overdue = store
                .get(&card.id)
                .is_some_and(|task| !task.completed && task.due < today);
            let due = if overdue {
                self.paint(&card.due, "31")
            } else {
                card.due.clone()
            };

            let status = if card.completed {
                self.paint("done", "2")
            } else {
                "pending".to_string()
            };

            rows.push(vec![
                id,
                due,
                card.category.clone(),
                card.title.clone(),
                status,
                card.created.clone(),
            ]);
        }

        write_table(out, headers, rows)
    }

    pub fn write_stats<W: Write>(&self, mut out: W, stats: Stats) -> anyhow::Result<()> {
        writeln!(
            out,
            "{} total, {} completed, {} pending",
            stats.total, stats.completed, stats.pending
        )?;
        Ok(())
    }

    pub fn print_theme(&self, theme: Theme) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", theme.storage_value())?;
        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color || !io::stdout().is_terminal() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
