//! dupescan - Duplicate File Finder
//!
//! Entry point for the dupescan CLI application.

use clap::Parser;
use dupescan::{cli::Cli, error::ExitCode};

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Run the application logic
    match dupescan::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            // Only unrecoverable setup errors reach this point; per-file
            // failures were reported inline with a zero exit status.
            let code = ExitCode::SetupError;
            eprintln!("[{}] Error: {:#}", code.code_prefix(), err);
            std::process::exit(code.as_i32());
        }
    }
}
