//! Blocking REST client for the MobSF server API.
//!
//! One [`ScanClient`] is built per run and drives every server call in
//! sequence. The run is synchronous end to end, so a single
//! `reqwest::blocking::Client` instance is all the transport state there is.

use std::time::Duration;

use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use reqwest::{header, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Operation, Result};

/// Fixed timeout for the health check; other calls use transport defaults.
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(30);

/// Bounded connection-level retry for transient connect failures.
/// No backoff and no retry of requests that reached the server.
const CONNECT_RETRIES: u32 = 5;

/// One entry of the recent-scans listing. Only the hash is consumed;
/// the server sends more fields, which serde ignores.
#[derive(Debug, Deserialize)]
pub struct RecentScan {
    #[serde(rename = "MD5")]
    pub md5: String,
}

#[derive(Debug, Deserialize)]
struct RecentScansPage {
    content: Vec<RecentScan>,
}

/// Report output format requested from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Pdf,
    Json,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pdf => write!(f, "PDF"),
            Self::Json => write!(f, "JSON"),
        }
    }
}

/// Client for the scan server, holding the HTTP transport and credentials.
pub struct ScanClient {
    http: Client,
    config: Config,
}

impl ScanClient {
    pub fn new(config: Config) -> Result<Self> {
        let http = Client::builder().build().map_err(Error::ClientInit)?;
        Ok(Self { http, config })
    }

    /// Health-check the server base URL. `Ok(true)` means it answered 200.
    ///
    /// The only call that does not carry the API key, and the only one
    /// with an explicit timeout.
    pub fn server_up(&self) -> Result<bool> {
        let response = self.send_with_retry(Operation::HealthCheck, || {
            Ok(self
                .http
                .get(&self.config.server)
                .timeout(HEALTH_CHECK_TIMEOUT))
        })?;
        Ok(response.status() == StatusCode::OK)
    }

    /// Upload the configured artifact as a multipart `file` field with an
    /// octet-stream content type. Returns the raw response body, which the
    /// caller feeds into [`Self::request_scan`].
    pub fn upload(&self) -> Result<String> {
        let response = self.send_with_retry(Operation::Upload, || {
            let part = multipart::Part::file(&self.config.app_path)
                .map_err(|e| Error::Artifact {
                    path: self.config.app_path.clone(),
                    source: e,
                })?
                .mime_str("application/octet-stream")
                .map_err(|e| Error::transport(Operation::Upload, e))?;
            let form = multipart::Form::new().part("file", part);
            Ok(self.post(&self.config.endpoints.upload).multipart(form))
        })?;
        let response = expect_ok(Operation::Upload, response)?;
        response
            .text()
            .map_err(|e| Error::transport(Operation::Upload, e))
    }

    /// Trigger a scan of the uploaded artifact. The payload is the parsed
    /// upload response, posted back verbatim as the JSON body. Does not
    /// wait for scan completion.
    pub fn request_scan(&self, payload: &serde_json::Value) -> Result<()> {
        let response = self.send_with_retry(Operation::ScanRequest, || {
            Ok(self.post(&self.config.endpoints.scan).json(payload))
        })?;
        expect_ok(Operation::ScanRequest, response)?;
        Ok(())
    }

    /// Fetch the hash of the most recent scan, plus the number of entries
    /// the server listed. An empty listing is [`Error::NoRecentScans`],
    /// distinct from a transport failure.
    pub fn recent_scan_hash(&self) -> Result<(String, usize)> {
        let response = self.send_with_retry(Operation::RecentScans, || {
            Ok(self.get(&self.config.endpoints.recent_scans))
        })?;
        let response = expect_ok(Operation::RecentScans, response)?;
        let page: RecentScansPage = response
            .json()
            .map_err(|e| Error::malformed(Operation::RecentScans, e.to_string()))?;
        match page.content.first() {
            Some(entry) => Ok((entry.md5.clone(), page.content.len())),
            None => Err(Error::NoRecentScans),
        }
    }

    /// Download a report for the given scan hash. Returns the raw body
    /// bytes; the caller decides where they land on disk.
    pub fn download_report(&self, hash: &str, format: ReportFormat) -> Result<Vec<u8>> {
        let endpoint = match format {
            ReportFormat::Pdf => &self.config.endpoints.download_pdf,
            ReportFormat::Json => &self.config.endpoints.download_json,
        };
        let response = self.send_with_retry(Operation::ReportDownload, || {
            Ok(self.post(endpoint).form(&[("hash", hash)]))
        })?;
        let response = expect_ok(Operation::ReportDownload, response)?;
        let bytes = response
            .bytes()
            .map_err(|e| Error::transport(Operation::ReportDownload, e))?;
        Ok(bytes.to_vec())
    }

    /// Delete the scan record for the given hash from the server database.
    pub fn delete_scan(&self, hash: &str) -> Result<()> {
        let response = self.send_with_retry(Operation::ScanDelete, || {
            Ok(self
                .post(&self.config.endpoints.delete_scan)
                .form(&[("hash", hash)]))
        })?;
        expect_ok(Operation::ScanDelete, response)?;
        Ok(())
    }

    fn get(&self, endpoint: &str) -> RequestBuilder {
        self.http
            .get(self.config.url(endpoint))
            .header(header::AUTHORIZATION, self.config.api_key.as_str())
    }

    fn post(&self, endpoint: &str) -> RequestBuilder {
        self.http
            .post(self.config.url(endpoint))
            .header(header::AUTHORIZATION, self.config.api_key.as_str())
    }

    /// Send a request, rebuilding and resending it on connection-level
    /// failures up to [`CONNECT_RETRIES`] times. Errors that reached the
    /// server (status errors, body errors) are never retried.
    fn send_with_retry(
        &self,
        operation: Operation,
        build: impl Fn() -> Result<RequestBuilder>,
    ) -> Result<Response> {
        let mut attempt = 0;
        loop {
            match build()?.send() {
                Ok(response) => return Ok(response),
                Err(e) if e.is_connect() && attempt < CONNECT_RETRIES => {
                    attempt += 1;
                    debug!(%operation, attempt, "connection failed, retrying");
                }
                Err(e) => return Err(Error::transport(operation, e)),
            }
        }
    }
}

/// Require a 200 response; anything else is a status error for the caller.
fn expect_ok(operation: Operation, response: Response) -> Result<Response> {
    let status = response.status();
    if status == StatusCode::OK {
        Ok(response)
    } else {
        Err(Error::Status { operation, status })
    }
}
