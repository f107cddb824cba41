use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FrameLimit {
    Max(usize),
    All,
}

impl FrameLimit {
    /// Số frame sẽ copy khi dataset có `available` frame.
    pub fn take(self, available: usize) -> usize {
        match self {
            FrameLimit::Max(n) => n.min(available),
            FrameLimit::All => available,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub index: usize,
    pub filename: String,

    /// đường dẫn tương đối trong publish_dir: <id>/images/<filename>
    pub path: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub dataset_id: String,
    pub frame_count: usize,
    pub frames: Vec<Frame>,

    /// copy nguyên văn từ regions.json trong archive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<serde_json::Value>,
}

/// Toàn bộ path của 1 dataset.
#[derive(Clone, Debug)]
pub struct DatasetPaths {
    pub archive: PathBuf,
    pub extract_dir: PathBuf,
    pub manifest: PathBuf,
    pub publish_images: PathBuf,
}

impl DatasetPaths {
    pub fn new(work_dir: &Path, publish_dir: &Path, id: &str) -> Self {
        Self {
            archive: work_dir.join(format!("{id}.zip")),
            extract_dir: work_dir.join(id),
            manifest: publish_dir.join(format!("{id}.json")),
            publish_images: publish_dir.join(id).join("images"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Prepared,
    Skipped,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub prepared: Vec<String>,
    pub skipped: Vec<String>,

    /// (dataset id, error message)
    pub failed: Vec<(String, String)>,
}

impl RunSummary {
    pub fn record(&mut self, id: &str, result: anyhow::Result<Outcome>) {
        match result {
            Ok(Outcome::Prepared) => self.prepared.push(id.to_string()),
            Ok(Outcome::Skipped) => self.skipped.push(id.to_string()),
            Err(e) => self.failed.push((id.to_string(), format!("{:#}", e))),
        }
    }
}
