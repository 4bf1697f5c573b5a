mod output;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{bail, Result};
use calendar_tasks_core::{AgendaUseCase, AgendaWindow, Config, EmptySourcePolicy};
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::output::Format;

#[derive(Parser)]
#[command(name = "calendar-tasks", version)]
#[command(about = "Show recurring and one-time tasks due around a date", long_about = None)]
struct Cli {
    /// Days after the date to show (0 shows only the date)
    #[arg(default_value_t = 0)]
    days: u32,

    /// Days before the date to also show
    #[arg(short, long, default_value_t = 0)]
    back: u32,

    /// Reference date as YYYY-MM-DD (default: today)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// JSON config file (default: ~/.calendar-tasks/config.json when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::List)]
    format: Format,

    /// Treat a source file with no tasks as an error
    #[arg(long)]
    strict: bool,

    /// Disable colours (also disabled when NO_COLOR is set)
    #[arg(long)]
    no_color: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "calendar_tasks_core=debug,calendar_tasks_cli=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn use_color(no_color: bool) -> bool {
    !no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env();
    if cli.strict {
        config.empty_source = EmptySourcePolicy::Error;
    }
    if config.source_count() == 0 {
        bail!("no source files provided, use --help for usage");
    }

    let date = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let window = AgendaWindow::new(date, &Local, cli.days, cli.back);
    tracing::debug!(
        "showing {} days from {}",
        window.num_days + 1,
        window.start.format("%Y-%m-%d")
    );

    let groups = AgendaUseCase::new(&config)
        .collect(window.start.clone(), window.num_days)
        .await?;

    let days = output::day_groups(&groups, &window);
    let rendered = output::render(cli.format, &days, date, use_color(cli.no_color))?;
    print!("{rendered}");
    Ok(())
}
