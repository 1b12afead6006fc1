use rust_xlsxwriter::XlsxError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to build HTTP client for icon downloads")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Failed to download icon from {0}")]
    ImageFetch(String, #[source] reqwest::Error),

    #[error("Icon download from {url} failed with status {status}")]
    ImageStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Spreadsheet operation failed")]
    Workbook(#[from] XlsxError),

    #[error("Failed to create output directory '{0}'")]
    OutputDir(PathBuf, #[source] std::io::Error),

    #[error("Failed to create temporary report file in '{0}'")]
    TempFile(PathBuf, #[source] std::io::Error),

    #[error("Failed to move finished report to '{0}'")]
    Persist(PathBuf, #[source] std::io::Error),
}

impl ReportError {
    /// True when the failure happened while downloading an icon.
    pub fn is_image_fetch(&self) -> bool {
        matches!(
            self,
            ReportError::ImageFetch(..) | ReportError::ImageStatus { .. }
        )
    }
}
