//! Environment-resolved runtime configuration.
//!
//! All settings come from environment variables and are read exactly once
//! into an immutable [`Config`] that is passed to every operation. Every
//! variable is required; resolution fails before any network call is made.

use std::path::PathBuf;

use crate::error::{Error, Result};

pub const ENV_API_KEY: &str = "MOBSF_API_KEY";
pub const ENV_SERVER: &str = "MOBSF_SERVER";
pub const ENV_APP_PATH: &str = "APP_PATH";
pub const ENV_REPORT_PATH: &str = "REPORT_PATH";
pub const ENV_ENDPOINT_UPLOAD: &str = "ENDPOINT_UPLOAD_APP";
pub const ENV_ENDPOINT_SCAN: &str = "ENDPOINT_SCAN_APP";
pub const ENV_ENDPOINT_RECENT_SCANS: &str = "ENDPOINT_RECENT_SCANS";
pub const ENV_ENDPOINT_DOWNLOAD_PDF: &str = "ENDPOINT_DOWNLOAD_PDF_REPORT";
pub const ENV_ENDPOINT_DOWNLOAD_JSON: &str = "ENDPOINT_DOWNLOAD_JSON_REPORT";
pub const ENV_ENDPOINT_DELETE_SCAN: &str = "ENDPOINT_DELETE_SCAN";

/// All required variables, in resolution order.
pub const REQUIRED_VARS: &[&str] = &[
    ENV_API_KEY,
    ENV_SERVER,
    ENV_APP_PATH,
    ENV_REPORT_PATH,
    ENV_ENDPOINT_UPLOAD,
    ENV_ENDPOINT_SCAN,
    ENV_ENDPOINT_RECENT_SCANS,
    ENV_ENDPOINT_DOWNLOAD_PDF,
    ENV_ENDPOINT_DOWNLOAD_JSON,
    ENV_ENDPOINT_DELETE_SCAN,
];

/// Server endpoint paths, joined onto the base URL per request.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub upload: String,
    pub scan: String,
    pub recent_scans: String,
    pub download_pdf: String,
    pub download_json: String,
    pub delete_scan: String,
}

/// Immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Static API key sent as the `Authorization` header.
    pub api_key: String,
    /// Server base URL, e.g. `http://mobsf.internal:8000`.
    pub server: String,
    /// Local path of the binary to upload (APK, IPA, or zip).
    pub app_path: PathBuf,
    /// Directory the downloaded reports are written into.
    pub report_dir: PathBuf,
    pub endpoints: Endpoints,
}

impl Config {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup.
    ///
    /// Tests pass a map-backed closure here instead of mutating the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |name: &'static str| -> Result<String> {
            match lookup(name) {
                Some(value) if !value.is_empty() => Ok(value),
                _ => Err(Error::MissingEnv(name)),
            }
        };

        Ok(Self {
            api_key: require(ENV_API_KEY)?,
            server: require(ENV_SERVER)?,
            app_path: PathBuf::from(require(ENV_APP_PATH)?),
            report_dir: PathBuf::from(require(ENV_REPORT_PATH)?),
            endpoints: Endpoints {
                upload: require(ENV_ENDPOINT_UPLOAD)?,
                scan: require(ENV_ENDPOINT_SCAN)?,
                recent_scans: require(ENV_ENDPOINT_RECENT_SCANS)?,
                download_pdf: require(ENV_ENDPOINT_DOWNLOAD_PDF)?,
                download_json: require(ENV_ENDPOINT_DOWNLOAD_JSON)?,
                delete_scan: require(ENV_ENDPOINT_DELETE_SCAN)?,
            },
        })
    }

    /// Join the server base URL with an endpoint path, with exactly one
    /// slash between them regardless of how either side is written.
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.server.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}
