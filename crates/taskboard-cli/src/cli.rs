use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        Ok(Self {
            key: k.trim().to_string(),
            value: v.trim().to_string(),
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "taskboard",
    version,
    about = "taskboard: a small categorized task list",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(
        long = "rc",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append,
        global = true
    )]
    pub rc_overrides: Vec<KeyVal>,

    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[arg(long = "data", global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add a task to the top of the list.
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
        #[arg(short = 'c', long)]
        category: String,
        #[arg(short = 'd', long)]
        due: String,
    },
    /// Show the tasks matching the filters.
    List(FilterArgs),
    /// Flip a task between pending and completed.
    Toggle { id: String },
    /// Change fields of an existing task.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        completed: Option<bool>,
    },
    Delete { id: String },
    ClearCompleted,
    /// Remove every task. Asks first unless --yes is given.
    ClearAll {
        #[arg(short = 'y', long)]
        yes: bool,
    },
    Stats,
    /// Show or change the light/dark preference.
    Theme { mode: Option<ThemeArg> },
    /// Print the task cards as HTML.
    Html(FilterArgs),
    Categories,
}

#[derive(clap::Args, Debug, Clone)]
pub struct FilterArgs {
    #[arg(short = 'c', long, default_value = "all")]
    pub category: String,
    #[arg(short = 's', long, default_value = "all")]
    pub status: String,
}

impl FilterArgs {
    pub fn default_all() -> Self {
        Self {
            category: "all".to_string(),
            status: "all".to_string(),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    Light,
    Dark,
    Toggle,
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn add_joins_title_words() {
        let cli = GlobalCli::parse_from([
            "taskboard",
            "add",
            "Buy",
            "milk",
            "--category",
            "Personal",
            "--due",
            "2024-01-01",
        ]);
        match cli.command {
            Some(Command::Add { title, category, due }) => {
                assert_eq!(title.join(" "), "Buy milk");
                assert_eq!(category, "Personal");
                assert_eq!(due, "2024-01-01");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = GlobalCli::parse_from([
            "taskboard",
            "list",
            "--status",
            "pending",
            "-vv",
            "--rc",
            "color=off",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.rc_overrides[0].key, "color");
        assert!(matches!(cli.command, Some(Command::List(ref f)) if f.status == "pending"));
    }
}
