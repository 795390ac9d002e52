//! CLI entry handlers.
//!
//! Separated from main.rs so orchestration failures surface as values
//! and exit codes, not process termination inside the library.

use std::process::ExitCode;

use colored::Colorize;
use tracing::error;

use crate::config::Config;
use crate::error::Error;
use crate::run::{run_delete, run_scan_sequence};

/// Handle the default invocation: the full upload→scan→report run.
pub fn handle_run() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => return fail(&e),
    };
    match run_scan_sequence(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

/// Handle `--delete <hash>`: delete one scan record and exit.
pub fn handle_delete(hash: &str) -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => return fail(&e),
    };
    match run_delete(&config, hash) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn fail(e: &Error) -> ExitCode {
    error!(error = %e, "run aborted");
    eprintln!("{} {}", "error:".red().bold(), e);
    ExitCode::from(1)
}
