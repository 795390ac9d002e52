//! The fixed-order scan sequence.
//!
//! Health check, upload, scan trigger, and the recent-scans query abort
//! the run on any failure. Report downloads are deliberately non-fatal:
//! a missing report leaves the scan record on the server, where it can
//! be fetched again later.

use colored::Colorize;
use tracing::{info, warn};

use crate::client::{ReportFormat, ScanClient};
use crate::config::Config;
use crate::error::{Error, Operation, Result};
use crate::report::write_report;

/// Run the full sequence: health → upload → scan → recent hash → reports.
pub fn run_scan_sequence(config: &Config) -> Result<()> {
    let client = ScanClient::new(config.clone())?;

    if !client.server_up()? {
        return Err(Error::ServerUnavailable);
    }
    info!(server = %config.server, "server is up");

    let upload_body = client.upload()?;
    println!("Uploaded {}", config.app_path.display());

    let payload: serde_json::Value = serde_json::from_str(&upload_body)
        .map_err(|e| Error::malformed(Operation::Upload, e.to_string()))?;
    client.request_scan(&payload)?;
    println!("Scan requested");

    let (hash, scan_count) = match client.recent_scan_hash() {
        Ok(found) => found,
        Err(e) => {
            mark_server_down(config);
            return Err(e);
        }
    };
    info!(%hash, scans = scan_count, "fetched most recent scan");
    println!("Most recent scan hash: {hash}");

    fetch_report(&client, config, &hash, ReportFormat::Pdf);
    fetch_report(&client, config, &hash, ReportFormat::Json);

    Ok(())
}

/// Delete one scan record. Standalone operation, not part of the default run.
pub fn run_delete(config: &Config, hash: &str) -> Result<()> {
    let client = ScanClient::new(config.clone())?;
    client.delete_scan(hash)?;
    println!("Scan record {hash} deleted");
    Ok(())
}

/// Download one report and write it to the report directory. Failures are
/// logged and swallowed so the run can still finish with partial output.
fn fetch_report(client: &ScanClient, config: &Config, hash: &str, format: ReportFormat) {
    let outcome = client
        .download_report(hash, format)
        .and_then(|body| write_report(&config.report_dir, format, &body));
    match outcome {
        Ok(path) => println!("{} report written to {}", format, path.display()),
        Err(e) => {
            warn!(%format, error = %e, "report fetch failed");
            eprintln!(
                "{} Failed to fetch {} report: {}",
                "warning:".yellow().bold(),
                format,
                e
            );
        }
    }
}

/// Best-effort notification that the server looks down, run before the
/// fatal exit on the recent-scans failure path.
fn mark_server_down(config: &Config) {
    warn!(server = %config.server, "marking server as down");
    eprintln!(
        "{} Scan server at {} appears to be down",
        "warning:".yellow().bold(),
        config.server
    );
}
