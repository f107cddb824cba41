use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::Level;

pub const DEFAULT_BASE_URL: &str =
    "https://s3.amazonaws.com/neuro.datasets/challenges/neurofinder";

pub const DEFAULT_CONFIG_FILE: &str = "neurofinder.yaml";
pub const CONFIG_ENV: &str = "NEUROFINDER_CONFIG";

pub const DEFAULT_FRAMES: usize = 100;

/// 19 dataset training của Neurofinder.
pub const DEFAULT_DATASETS: [&str; 19] = [
    "00.00", "00.01", "00.02", "00.03", "00.04", "00.05", "00.06", "00.07", "00.08", "00.09",
    "00.10", "00.11", "01.00", "01.01", "02.00", "02.01", "03.00", "04.00", "04.01",
];

/// neurofinder.yaml, mọi key đều optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YamlConfig {
    pub base_url: Option<String>,
    pub work_dir: Option<PathBuf>,
    pub publish_dir: Option<PathBuf>,
    pub datasets: Option<Vec<String>>,
    pub log_level: Option<String>,
    pub http_timeout_secs: Option<u64>,
}

/// Config đã resolve, truyền thẳng vào pipeline.
#[derive(Debug, Clone)]
pub struct PrepareConfig {
    pub base_url: String,
    pub work_dir: PathBuf,
    pub publish_dir: PathBuf,
    pub datasets: Vec<String>,
    pub http_timeout: Option<Duration>,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            work_dir: PathBuf::from("data/neurofinder"),
            publish_dir: PathBuf::from("public/data/neurofinder"),
            datasets: DEFAULT_DATASETS.iter().map(|s| s.to_string()).collect(),
            http_timeout: None,
        }
    }
}

impl PrepareConfig {
    pub fn from_yaml(y: YamlConfig) -> Self {
        let d = Self::default();
        Self {
            base_url: y
                .base_url
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(d.base_url),
            work_dir: y.work_dir.unwrap_or(d.work_dir),
            publish_dir: y.publish_dir.unwrap_or(d.publish_dir),
            datasets: y.datasets.unwrap_or(d.datasets),
            http_timeout: y.http_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn archive_url(&self, id: &str) -> String {
        format!("{}/neurofinder.{}.zip", self.base_url, id)
    }
}

/// File không tồn tại => None. File hỏng => lỗi (không âm thầm dùng default).
pub fn load_yaml(path: &Path) -> Result<Option<YamlConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let cfg = serde_yaml::from_reader(file).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(cfg))
}

pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

pub fn parse_log_level(s: Option<&str>) -> Level {
    match s.map(|s| s.trim().to_lowercase()).as_deref() {
        Some("trace") => Level::TRACE,
        Some("debug") => Level::DEBUG,
        Some("warn") | Some("warning") => Level::WARN,
        Some("error") => Level::ERROR,
        _ => Level::INFO,
    }
}
