//! Progress reporting utilities using indicatif.
//!
//! This module provides the [`Progress`] struct which implements
//! [`ProgressCallback`] to display a spinner for the walking phase and a
//! progress bar for the hashing phase. Quiet mode suppresses all bars.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Progress callback for duplicate finding phases.
///
/// Implement this trait to receive progress updates during
/// the duplicate detection pipeline.
pub trait ProgressCallback: Send + Sync {
    /// Called when a phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase` - Name of the phase (e.g., "walking", "hashing")
    /// * `total` - Total number of items to process (0 if unknown)
    fn on_phase_start(&self, phase: &str, total: usize);

    /// Called for each item processed.
    ///
    /// # Arguments
    ///
    /// * `current` - Current item number (1-based)
    /// * `path` - Path being processed
    fn on_progress(&self, current: usize, path: &str);

    /// Called when an item has been processed, providing its size.
    ///
    /// Can be used to track byte-based throughput.
    fn on_item_completed(&self, _bytes: u64) {}

    /// Called when a phase completes.
    fn on_phase_end(&self, phase: &str);

    /// Called to update the progress message.
    fn on_message(&self, _message: &str) {}
}

/// Progress reporter using indicatif.
///
/// Manages the per-phase bars for the duplicate detection pipeline.
pub struct Progress {
    multi: MultiProgress,
    walking: Mutex<Option<ProgressBar>>,
    hashing: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, no progress bars will be displayed.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            multi: MultiProgress::new(),
            walking: Mutex::new(None),
            hashing: Mutex::new(None),
            quiet,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn slot(&self, phase: &str) -> Option<&Mutex<Option<ProgressBar>>> {
        match phase {
            "walking" => Some(&self.walking),
            "hashing" => Some(&self.hashing),
            _ => None,
        }
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, total: usize) {
        if self.quiet {
            return;
        }
        let Some(slot) = self.slot(phase) else { return };

        let bar = if total == 0 {
            let spinner = self.multi.add(ProgressBar::new_spinner());
            spinner.set_style(Self::spinner_style());
            spinner.enable_steady_tick(Duration::from_millis(120));
            spinner
        } else {
            let bar = self.multi.add(ProgressBar::new(total as u64));
            bar.set_style(Self::bar_style());
            bar
        };
        bar.set_message(phase.to_string());

        if let Ok(mut guard) = slot.lock() {
            *guard = Some(bar);
        }
    }

    fn on_progress(&self, current: usize, path: &str) {
        if self.quiet {
            return;
        }
        if let Ok(guard) = self.hashing.lock() {
            if let Some(bar) = guard.as_ref() {
                bar.set_position(current as u64);
                // Keep messages short enough for one terminal line
                let tail: String = path.chars().rev().take(48).collect::<Vec<_>>().into_iter().rev().collect();
                bar.set_message(tail);
            }
        }
    }

    fn on_phase_end(&self, phase: &str) {
        if self.quiet {
            return;
        }
        let Some(slot) = self.slot(phase) else { return };
        if let Ok(mut guard) = slot.lock() {
            if let Some(bar) = guard.take() {
                bar.finish_and_clear();
            }
        }
    }

    fn on_message(&self, message: &str) {
        if self.quiet {
            return;
        }
        if let Ok(guard) = self.walking.lock() {
            if let Some(bar) = guard.as_ref() {
                bar.set_message(message.to_string());
            }
        }
    }
}
