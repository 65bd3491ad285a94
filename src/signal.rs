//! Signal handling for graceful shutdown.
//!
//! This module provides centralized Ctrl+C handling. It uses an `AtomicBool`
//! flag shared across threads to signal when shutdown has been requested.
//! On cancellation the pipeline stops issuing new hash computations and
//! proceeds to reporting with the sets completed so far.
//!
//! # Usage
//!
//! ```rust,no_run
//! use dupescan::signal::install_handler;
//!
//! let handler = install_handler().expect("Failed to install signal handler");
//!
//! if handler.is_shutdown_requested() {
//!     println!("Shutdown requested, finishing up...");
//!     return;
//! }
//!
//! // Get the flag to pass to worker threads
//! let shutdown_flag = handler.get_flag();
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Centralized shutdown handler for graceful application termination.
///
/// Wraps an `AtomicBool` flag that is set when a Ctrl+C signal is received.
/// The flag can be shared with worker threads for coordinated shutdown.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    /// The shared atomic flag indicating shutdown was requested.
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a new shutdown handler with the flag initially set to `false`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check if shutdown has been requested.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Manually request a shutdown.
    ///
    /// Sets the flag to `true`, observed by any code holding the flag from
    /// [`get_flag`](Self::get_flag).
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Get a clone of the shutdown flag for passing to worker threads.
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}

/// Install the Ctrl+C handler and return the shared shutdown handler.
///
/// The first signal sets the flag and lets the pipeline wind down cleanly;
/// the process then exits with code 130 after reporting.
///
/// # Errors
///
/// Returns an error if the OS-level handler could not be installed (for
/// example when one is already registered in this process).
pub fn install_handler() -> Result<ShutdownHandler, ctrlc::Error> {
    let handler = ShutdownHandler::new();
    let flag = handler.get_flag();

    ctrlc::set_handler(move || {
        if !flag.swap(true, Ordering::SeqCst) {
            eprintln!("Interrupted. Finishing up...");
        }
    })?;

    Ok(handler)
}
