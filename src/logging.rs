//! Logging infrastructure.
//!
//! This module provides structured logging using the `log` facade and
//! `env_logger` backend. Log levels are determined by (in priority order):
//!
//! 1. `RUST_LOG` environment variable (if set)
//! 2. CLI flags: `--quiet` (error only) or `--verbose` (debug/trace)
//! 3. Default: warn level, keeping the report itself uncluttered
//!
//! # Build-specific Formatting
//!
//! - **Debug builds**: Include timestamp, level, and module path
//! - **Release builds**: Compact format with level and message only

use env_logger::Builder;
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Initialize the logging subsystem based on CLI verbosity flags.
///
/// Call once at application start, before any logging calls.
///
/// # Priority
///
/// 1. If `RUST_LOG` is set, it takes precedence
/// 2. If `quiet` is true: Error level only
/// 3. If `verbose >= 2`: Trace level
/// 4. If `verbose == 1`: Debug level
/// 5. Default: Warn level
///
/// # Arguments
///
/// * `verbose` - Verbosity count from CLI (0=normal, 1=debug, 2+=trace)
/// * `quiet` - If true, only show errors (overridden by RUST_LOG)
pub fn init_logging(verbose: u8, quiet: bool) {
    let use_env = env::var("RUST_LOG").is_ok();

    let mut builder = Builder::new();

    if use_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    configure_format(&mut builder, verbose);

    // A second initialization (e.g. library callers running several scans in
    // one process) keeps the first logger.
    let _ = builder.try_init();

    log::debug!("Logging initialized at level: {:?}", log::max_level());
}

/// Determine the log level from CLI flags.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Configure the log format based on build type and verbosity.
fn configure_format(builder: &mut Builder, verbose: u8) {
    // In debug builds, include more information
    #[cfg(debug_assertions)]
    {
        builder.format(move |buf, record| {
            let timestamp = buf.timestamp_seconds();
            let level = record.level();
            let level_style = buf.default_level_style(level);

            if verbose >= 1 {
                writeln!(
                    buf,
                    "{} {level_style}{:<5}{level_style:#} [{}] {}",
                    timestamp,
                    level,
                    record.module_path().unwrap_or("unknown"),
                    record.args()
                )
            } else {
                writeln!(
                    buf,
                    "{} {level_style}{:<5}{level_style:#} {}",
                    timestamp,
                    level,
                    record.args()
                )
            }
        });
    }

    // In release builds, use compact format
    #[cfg(not(debug_assertions))]
    {
        let _ = verbose; // Suppress unused variable warning in release
        builder.format(|buf, record| {
            let level = record.level();
            let level_style = buf.default_level_style(level);
            writeln!(
                buf,
                "{level_style}{:<5}{level_style:#} {}",
                level,
                record.args()
            )
        });
    }
}
