//! `mjolk` runs the Knox space-time interaction test over event files.

mod cli;
mod load;
mod logging;
mod progress;
mod report;
mod signal;

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use galaxy::{CancelToken, ClusterConfig, NoProgress, cluster};

use crate::cli::Cli;
use crate::progress::ConsoleProgress;
use crate::report::{Format, Report};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = ClusterConfig::from_days(cli.dist, cli.time)
        .context("invalid distance thresholds")?
        .with_workers(cli.workers);
    signal::install().context("failed to install signal handlers")?;

    let mut stdout = std::io::stdout().lock();
    for (i, path) in cli.files.iter().enumerate() {
        if i > 0 && cli.format == Format::Text {
            writeln!(stdout)?;
        }
        let report = process_file(path, config, cli.verbose > 0)?;
        report.write(cli.format, &mut stdout)?;
        stdout.flush()?;
        if report.partial {
            let skipped = cli.files.len() - i - 1;
            if skipped > 0 {
                tracing::warn!(skipped, "interrupted, remaining files are not processed");
            }
            break;
        }
    }
    Ok(())
}

fn process_file(
    path: &Path,
    config: ClusterConfig,
    show_progress: bool,
) -> anyhow::Result<Report<'_>> {
    let events =
        load::load_events(path).with_context(|| format!("failed to load {}", path.display()))?;
    tracing::info!(file = %path.display(), n_events = events.len(), "loaded events");

    let cancel = CancelToken::new();
    let _watch = signal::watch(cancel.clone());
    let counts = if show_progress {
        cluster(events.view(), &config, &cancel, &ConsoleProgress::new())
    } else {
        cluster(events.view(), &config, &cancel, &NoProgress)
    };
    Ok(Report::new(path, config, counts))
}
