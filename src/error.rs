use std::path::PathBuf;
use thiserror::Error;

/// Lỗi của 1 dataset. Batch log lỗi rồi chạy tiếp dataset sau.
#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("invalid dataset id {0:?} (expected e.g. 00.00)")]
    InvalidDatasetId(String),

    #[error("download failed: {url} returned {status}")]
    Download { url: String, status: u16 },

    #[error("HTTP request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("cannot extract {archive}: {reason}")]
    Extract { archive: PathBuf, reason: String },

    #[error("no images directory found under {0}")]
    MissingImagesDir(PathBuf),

    #[error("frame file name is not valid UTF-8: {0}")]
    NonUtf8FrameName(PathBuf),

    #[error("malformed regions file {path}")]
    Regions {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
