//! dupescan - Duplicate File Finder
//!
//! A cross-platform Rust CLI application for finding and removing duplicate
//! files. Detection is a two-phase pipeline: files are grouped by size, then
//! confirmed by BLAKE3 content hashing with a fingerprint cache to skip
//! re-hashing unchanged files across runs.

pub mod actions;
pub mod cache;
pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Context;

use crate::actions::{delete_discards, select, DeleteConfig, Retention};
use crate::cache::HashCache;
use crate::cli::{Cli, OutputFormat};
use crate::duplicates::{DuplicateFinder, FinderConfig};
use crate::error::ExitCode;
use crate::output::{text, JsonOutput, TextReport};
use crate::progress::Progress;
use crate::scanner::WalkerConfig;

/// Run the scan pipeline for a parsed CLI invocation.
///
/// Walks the target directory, reports duplicate sets, drives optional
/// deletion, and persists the fingerprint cache. Per-file failures are
/// reported inline; only setup failures surface as errors.
///
/// # Errors
///
/// Returns an error when the scan root is missing or not a directory, or
/// when the report cannot be written to stdout.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    if cli.no_color {
        yansi::disable();
    }

    // Setup phase: a bad root is the only fatal error
    let root = cli
        .directory
        .canonicalize()
        .with_context(|| format!("directory does not exist: {}", cli.directory.display()))?;
    if !root.is_dir() {
        anyhow::bail!("not a directory: {}", root.display());
    }

    let shutdown = signal::install_handler().unwrap_or_else(|e| {
        log::warn!("Could not install Ctrl+C handler: {e}");
        signal::ShutdownHandler::new()
    });

    let cache = (!cli.no_cache).then(|| Arc::new(HashCache::load(&root)));

    let walker_config = WalkerConfig::new(
        cli.recursive,
        cli.include_hidden,
        cli.min_size.unwrap_or(0),
        cli.max_size,
        cli.extension_list(),
    );

    let mut finder_config = FinderConfig::default()
        .with_io_threads(cli.io_threads)
        .with_hash_enabled(cli.hash_enabled())
        .with_walker_config(walker_config)
        .with_shutdown_flag(shutdown.get_flag());
    if let Some(ref cache) = cache {
        finder_config = finder_config.with_cache(Arc::clone(cache));
    }
    if cli.output == OutputFormat::Text && !cli.quiet {
        finder_config = finder_config.with_progress_callback(Arc::new(Progress::new(false)));
    }

    let finder = DuplicateFinder::new(finder_config);
    let (mut groups, summary) = finder.find_duplicates(&root)?;

    // Write the cache back regardless of how the scan ended; failures are
    // reported but never change the outcome.
    if let Some(ref cache) = cache {
        if let Err(e) = cache.persist() {
            log::warn!("Failed to persist cache: {e}");
        }
    }

    output::sort_groups(&mut groups, cli.sort);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.output {
        OutputFormat::Json => {
            let json = JsonOutput::new(&groups, &summary).to_json_pretty()?;
            writeln!(out, "{json}")?;
        }
        OutputFormat::Text => {
            TextReport::new(&groups, &summary).write_to(&mut out)?;
        }
    }

    if cli.delete || cli.dry_run {
        let retentions: Vec<Retention> = groups
            .iter()
            .filter_map(|group| select(group, cli.keep))
            .collect();

        if cli.dry_run {
            // Dry-run wins over --delete: plan only, zero mutations
            if cli.output == OutputFormat::Text {
                text::write_retention_plan(&mut out, &retentions, true)?;
            }
        } else if cli.delete {
            let delete_config = if cli.trash {
                DeleteConfig::trash()
            } else {
                DeleteConfig::permanent()
            };
            let result = delete_discards(&retentions, delete_config);
            if cli.output == OutputFormat::Text {
                text::write_delete_result(&mut out, &result)?;
            } else {
                log::info!("{}", result.summary());
            }
        }
    }

    Ok(if summary.interrupted {
        ExitCode::Interrupted
    } else {
        ExitCode::Success
    })
}
