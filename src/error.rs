//! Error types for mobsast.
//!
//! Every REST operation returns an explicit `Result` so the top-level
//! handlers can decide the process exit code. The variants mirror the
//! failure taxonomy of the run: configuration problems, transport
//! failures, unexpected HTTP statuses, an empty recent-scans listing,
//! and local report-write failures.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The REST operation that was in flight when a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    HealthCheck,
    Upload,
    ScanRequest,
    RecentScans,
    ReportDownload,
    ScanDelete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HealthCheck => write!(f, "health check"),
            Self::Upload => write!(f, "upload"),
            Self::ScanRequest => write!(f, "scan request"),
            Self::RecentScans => write!(f, "recent scans query"),
            Self::ReportDownload => write!(f, "report download"),
            Self::ScanDelete => write!(f, "scan delete"),
        }
    }
}

/// Unified error type for all mobsast operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Required environment variable is missing or empty.
    #[error("Missing required environment variable: {0}")]
    MissingEnv(&'static str),

    /// The HTTP client itself could not be constructed.
    #[error("Failed to construct HTTP client: {0}")]
    ClientInit(#[source] reqwest::Error),

    /// Transport-level failure (timeout, connection refused, TLS, ...).
    #[error("Request failed during {operation}: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but not with 200 OK.
    #[error("Server returned {status} during {operation}")]
    Status {
        operation: Operation,
        status: reqwest::StatusCode,
    },

    /// The server answered the health check with something other than 200.
    #[error("Server did not answer the health check with 200 OK")]
    ServerUnavailable,

    /// The server's response body did not match the expected shape.
    #[error("Malformed {operation} response: {message}")]
    MalformedResponse {
        operation: Operation,
        message: String,
    },

    /// The recent-scans listing came back empty.
    #[error("No recent scans in the server database")]
    NoRecentScans,

    /// The artifact to upload could not be read.
    #[error("Failed to read artifact {path}: {source}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A downloaded report could not be written to disk.
    #[error("Failed to write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap a reqwest error with the operation it interrupted.
    pub fn transport(operation: Operation, source: reqwest::Error) -> Self {
        Self::Transport { operation, source }
    }

    /// Wrap an unexpected response body with the operation that produced it.
    pub fn malformed(operation: Operation, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            operation,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_display() {
        let err = Error::MissingEnv("MOBSF_API_KEY");
        assert!(err.to_string().contains("MOBSF_API_KEY"));
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::HealthCheck.to_string(), "health check");
        assert_eq!(Operation::RecentScans.to_string(), "recent scans query");
    }

    #[test]
    fn test_status_display() {
        let err = Error::Status {
            operation: Operation::Upload,
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("upload"));
    }

    #[test]
    fn test_malformed_display() {
        let err = Error::malformed(Operation::Upload, "not valid JSON");
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_no_recent_scans_display() {
        assert!(Error::NoRecentScans.to_string().contains("No recent scans"));
    }
}
