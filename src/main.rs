use std::{
    io::{self, stdin, stdout},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tasker::{Config, Controller, LogFormat, TaskList};

#[derive(Parser)]
#[command(about = "Keep a task list with undo and redo")]
struct Args {
    /// Task file to open. Falls back to `tasks_file` from the config.
    path: Option<PathBuf>,

    /// Config file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

/// `TASKER_LOG` overrides the configured filter. Logs go to stderr so they
/// never interleave with the task list on stdout.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_env("TASKER_LOG").unwrap_or_else(|_| EnvFilter::new(&config.log));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => {
            let layer = fmt::layer().json().with_ansi(false).with_writer(io::stderr);
            registry.with(layer).init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer().compact().with_ansi(config.color).with_writer(io::stderr);
            registry.with(layer).init();
        }
    }
}

fn open(path: Option<PathBuf>) -> anyhow::Result<Controller> {
    let Some(path) = path else {
        return Ok(Controller::new(TaskList::new(), None));
    };

    if !path.exists() {
        info!(path = %path.display(), "starting a new task file");
        return Ok(Controller::new(TaskList::new(), Some(path)));
    }

    let list =
        TaskList::load(&path).with_context(|| format!("Could not open {}", path.display()))?;
    debug!(tasks = list.len(), "opened task file");
    Ok(Controller::new(list, Some(path)))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref()).context("Could not load config")?;
    if args.no_color {
        config.color = false;
    }
    init_tracing(&config);

    let mut controller = open(args.path.or_else(|| config.tasks_file.clone()))?;
    controller.listen(stdin().lock(), &mut stdout(), &config)?;
    Ok(())
}
