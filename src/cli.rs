//! Command-line interface module for yearsort.
//!
//! This module wires argument parsing to the pipeline:
//! - Scan the source tree into a snapshot
//! - Date each file and compute its year destination
//! - Move or copy it there
//! - Prune directories the move emptied
//!
//! All console output happens here; the worker modules stay silent.

use crate::file_dates::{FsTimestamper, Timestamper, creation_year};
use crate::output::OutputFormatter;
use crate::reconciler::Reconciler;
use crate::relocator::{Mode, Outcome, Relocator, RunStats};
use crate::remapper::{Anchor, Remapper};
use crate::scanner::Scanner;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Organize files into year subdirectories based on their creation date.
///
/// Each file moves under a directory named after its creation year while
/// keeping its original relative path. Creation dates are best-effort:
/// platforms without real birth-time metadata fall back to the
/// modification time.
#[derive(Debug, Parser)]
#[command(name = "yearsort", version, about)]
pub struct Cli {
    /// Directory to organize.
    pub directory: PathBuf,

    /// Show what would be done without touching the filesystem.
    #[arg(long)]
    pub dry_run: bool,

    /// Copy files into the year structure instead of moving them.
    #[arg(long)]
    pub copy: bool,

    /// Print absolute paths in status lines instead of anchor-relative ones.
    #[arg(long)]
    pub full_path: bool,

    /// Create year directories beside the source directory instead of
    /// inside it.
    #[arg(long)]
    pub sibling: bool,
}

/// Runs yearsort with real filesystem timestamps.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use yearsort::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["yearsort", "/path/to/photos", "--dry-run"]);
/// match run_cli(&cli) {
///     Ok(stats) => println!("{} files processed", stats.processed),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(cli: &Cli) -> Result<RunStats, String> {
    run_cli_with_timestamper(cli, &FsTimestamper)
}

/// Runs yearsort with an injected timestamp source.
///
/// Returns the run's aggregate counters. The error branch is reserved for
/// fatal startup problems (missing or invalid source directory); per-file
/// failures are reported, counted, and never stop the remaining files.
pub fn run_cli_with_timestamper(
    cli: &Cli,
    timestamper: &dyn Timestamper,
) -> Result<RunStats, String> {
    let scanner = Scanner::new(&cli.directory).map_err(|e| e.to_string())?;

    let anchor = if cli.sibling {
        Anchor::Beside
    } else {
        Anchor::Inside
    };
    let anchor_dir = anchor.resolve(scanner.root()).ok_or_else(|| {
        format!(
            "Cannot create year directories beside {}: it has no parent",
            scanner.root().display()
        )
    })?;
    let remapper = Remapper::new(anchor_dir);

    OutputFormatter::info(&format!(
        "Organizing files in: {}",
        scanner.root().display()
    ));
    if cli.dry_run {
        OutputFormatter::dry_run("No files will be moved");
    }

    let snapshot = scanner.snapshot();
    for name in &snapshot.skipped_year_dirs {
        OutputFormatter::plain(&format!("Skipping year directory: {}", name));
    }
    OutputFormatter::plain(&format!("Found {} files to process", snapshot.files.len()));

    let mode = if cli.copy { Mode::Copy } else { Mode::Move };
    let relocator = Relocator::new(mode, cli.dry_run);
    let mut stats = RunStats::default();

    for file in &snapshot.files {
        process_file(file, cli, timestamper, &remapper, &relocator, &mut stats);
    }

    OutputFormatter::header("Job complete");
    OutputFormatter::plain(&format!("Files processed: {}", stats.processed));
    if stats.skipped > 0 {
        OutputFormatter::plain(&format!("Already in place: {}", stats.skipped));
    }
    if stats.errors > 0 {
        OutputFormatter::warning(&format!("Errors encountered: {}", stats.errors));
    }

    // Copying leaves source directories populated and a dry run changes
    // nothing, so in both cases there is nothing to reconcile.
    if mode == Mode::Move && !cli.dry_run {
        let reconciler = Reconciler::new(scanner.root(), remapper.anchor());
        for dir in reconciler.prune() {
            OutputFormatter::plain(&format!(
                "Removing empty directory: {}",
                remapper.display_path(&dir)
            ));
        }
    }

    Ok(stats)
}

/// Dates, remaps, and relocates one file, recording exactly one outcome.
fn process_file(
    file: &Path,
    cli: &Cli,
    timestamper: &dyn Timestamper,
    remapper: &Remapper,
    relocator: &Relocator,
    stats: &mut RunStats,
) {
    let year = match creation_year(timestamper, file) {
        Ok(year) => year,
        Err(e) => {
            OutputFormatter::error(&format!("Error processing {}: {}", file.display(), e));
            stats.record_error();
            return;
        }
    };

    let Some(destination) = remapper.destination(file, year) else {
        OutputFormatter::error(&format!(
            "Error processing {}: not under {}",
            file.display(),
            remapper.anchor().display()
        ));
        stats.record_error();
        return;
    };

    // Already at its year-anchored location: nothing to do, nothing to log.
    if destination == *file {
        stats.record_skipped();
        return;
    }

    let (from, to) = if cli.full_path {
        (file.display().to_string(), destination.display().to_string())
    } else {
        (
            remapper.display_path(file),
            remapper.display_path(&destination),
        )
    };

    match relocator.relocate(file, &destination) {
        Ok(Outcome::Transferred) => {
            let verb = if cli.copy { "Copying" } else { "Moving" };
            OutputFormatter::plain(&format!("{}: {} -> {}", verb, from, to));
            stats.record_processed();
        }
        Ok(Outcome::WouldTransfer { missing_dir }) => {
            let verb = if cli.copy { "Would copy" } else { "Would move" };
            OutputFormatter::dry_run(&format!("{}: {} -> {}", verb, from, to));
            if let Some(dir) = missing_dir {
                let dir = if cli.full_path {
                    dir.display().to_string()
                } else {
                    remapper.display_path(&dir)
                };
                OutputFormatter::dry_run(&format!("Would create directory: {}", dir));
            }
            stats.record_processed();
        }
        Err(e) => {
            OutputFormatter::error(&format!("Error processing {}: {}", file.display(), e));
            stats.record_error();
        }
    }
}
