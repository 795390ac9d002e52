pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod report;
pub mod run;

pub use cli::Cli;
pub use client::{RecentScan, ReportFormat, ScanClient};
pub use config::{Config, Endpoints};
pub use error::{Error, Operation, Result};
pub use handlers::{handle_delete, handle_run};
pub use run::{run_delete, run_scan_sequence};
