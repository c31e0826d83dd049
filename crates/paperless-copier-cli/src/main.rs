use std::io::IsTerminal;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use console::style;
use paperless_copier_core::{Copier, RunReport, Settings};
use tracing::level_filters::LevelFilter;

/// How long a failure message stays on screen before the process exits.
const FAILURE_PAUSE: Duration = Duration::from_secs(6);

/// Copies newly seen documents into the Paperless consume folder.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Folder tree scanned for new documents.
    source_dir: PathBuf,

    /// Folder the documents are copied into. Defaults to the NAS consume folder.
    dest_dir: Option<PathBuf>,

    /// Set the verbosity level. Use -v for debug, -vv for trace.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            println!("{}", e.render());
            pause_for_operator();
            return;
        }
    };
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        println!("{} {:#}", style("Unexpected error:").red().bold(), e);
        pause_for_operator();
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::from_args(&cli.source_dir, cli.dest_dir.as_deref())
        .context("Failed to load settings")?;
    let copier = Copier::new(settings)?;
    let report = copier.run().context("The import process failed")?;
    print_report(&report);
    Ok(())
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(std::io::stdout().is_terminal())
        .init();
}

fn print_report(report: &RunReport) {
    if !report.summary.failures.is_empty() {
        println!("{}", style("Files that could not be copied:").bold());
        for failure in &report.summary.failures {
            println!(
                "- {} ({})",
                style(failure.destination.display()).red(),
                failure.message
            );
        }
    }
    println!("{}", style(&report.summary).bold());
    if report.trim.removed > 0 || report.trim.failed > 0 {
        println!(
            "Trimmed {} empty folder(s), {} could not be deleted.",
            report.trim.removed, report.trim.failed
        );
    }
    println!("{}", style("Import process complete.").green().bold());
}

/// Gives an operator watching the console time to read the failure. Scheduled runs
/// with redirected output exit straight away.
fn pause_for_operator() {
    if std::io::stdout().is_terminal() {
        thread::sleep(FAILURE_PAUSE);
    }
}
