//! Report file writing.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::client::ReportFormat;
use crate::error::{Error, Result};

/// Filename timestamp layout. Second resolution, so two reports of the
/// same format written within the same second overwrite each other.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H%M%S";

/// Write report bytes into `dir` as `sast_report_<timestamp>.<ext>` and
/// return the full path.
pub fn write_report(dir: &Path, format: ReportFormat, body: &[u8]) -> Result<PathBuf> {
    let name = format!(
        "sast_report_{}.{}",
        Utc::now().format(TIMESTAMP_FORMAT),
        format.extension()
    );
    let path = dir.join(name);
    fs::write(&path, body).map_err(|e| Error::ReportWrite {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_timestamped_pdf() {
        let dir = TempDir::new().unwrap();
        let path = write_report(dir.path(), ReportFormat::Pdf, b"%PDF-1.4").unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("sast_report_"));
        assert!(name.ends_with(".pdf"));
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_writes_json_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_report(dir.path(), ReportFormat::Json, b"{}").unwrap();
        assert!(path.to_str().unwrap().ends_with(".json"));
    }

    #[test]
    fn test_missing_directory_is_report_write_error() {
        let err = write_report(
            Path::new("/nonexistent/reports"),
            ReportFormat::Pdf,
            b"data",
        )
        .unwrap_err();
        assert!(matches!(err, Error::ReportWrite { .. }));
    }
}
