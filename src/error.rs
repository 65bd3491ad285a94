//! Exit codes for the dupescan process.

/// Process exit codes.
///
/// Non-zero status is reserved for unrecoverable setup errors; per-file read
/// or delete failures are reported inline and never change the exit code.
///
/// - 0: Scan completed and results were reported
/// - 1: Setup error (missing or invalid scan root)
/// - 130: Interrupted by user (128 + SIGINT, Unix convention)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Scan completed normally; results (including per-file failures) reported.
    Success = 0,
    /// Unrecoverable setup error before scanning started.
    SetupError = 1,
    /// Scan was interrupted by the user; partial results reported.
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix used in error output.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DS000",
            Self::SetupError => "DS001",
            Self::Interrupted => "DS130",
        }
    }
}
