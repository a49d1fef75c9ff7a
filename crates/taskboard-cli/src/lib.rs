pub mod cli;
pub mod commands;
pub mod config;
pub mod datastore;
pub mod render;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use taskboard_core::{Clock, Controller, SystemClock};
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting taskboard CLI"
  );

  let mut cfg = config::Config::load(
    cli.config.as_deref()
  )?;
  cfg.apply_overrides(
    cli
      .rc_overrides
      .into_iter()
      .map(|kv| (kv.key, kv.value))
  );

  let data_dir =
    config::resolve_data_dir(
      &cfg,
      cli.data.as_deref()
    )
    .context(
      "failed to resolve data \
       directory"
    )?;

  let storage =
    datastore::FileStorage::open(
      &data_dir
    )
    .with_context(|| {
      format!(
        "failed to open datastore at \
         {}",
        data_dir.display()
      )
    })?;

  let categories = cfg.categories()?;
  let clock = SystemClock;
  let today = clock.today();

  let mut ctl = Controller::start(
    storage, categories, clock
  );
  let renderer =
    render::Renderer::new(&cfg);

  let command = cli.command.unwrap_or(
    cli::Command::List(
      cli::FilterArgs::default_all()
    )
  );
  debug!(?command, "resolved command");

  commands::dispatch(
    &mut ctl, &renderer, command, today
  )?;

  info!("done");
  Ok(())
}
