use crate::error::PrepareError;
use anyhow::{Context, Result};
use reqwest::StatusCode;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

fn part_path(archive: &Path) -> PathBuf {
    let mut s = archive.as_os_str().to_owned();
    s.push(".part");
    PathBuf::from(s)
}

pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::blocking::Client> {
    // reqwest blocking mặc định timeout 30s, archive lớn cần tắt
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .context("build HTTP client")?;
    Ok(client)
}

/// Tải archive về `dest` nếu chưa có. Trả true nếu đã tải mới.
///
/// Body ghi vào `<dest>.part` rồi rename, nên lỗi giữa chừng không để lại `dest`.
pub fn download_archive(
    client: &reqwest::blocking::Client,
    url: &str,
    dest: &Path,
) -> Result<bool> {
    if dest.exists() {
        debug!("archive exists, skip download: {}", dest.display());
        return Ok(false);
    }

    info!("Downloading {}", url);
    let mut resp = client.get(url).send().map_err(|e| PrepareError::Http {
        url: url.to_string(),
        source: e,
    })?;

    // chỉ nhận 200: 204/206 không phải archive đầy đủ
    let status = resp.status();
    if status != StatusCode::OK {
        return Err(PrepareError::Download {
            url: url.to_string(),
            status: status.as_u16(),
        }
        .into());
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let part = part_path(dest);
    let r: Result<u64> = (|| {
        let f = File::create(&part).with_context(|| format!("create {}", part.display()))?;
        let mut w = BufWriter::new(f);
        let n = resp.copy_to(&mut w).map_err(|e| PrepareError::Http {
            url: url.to_string(),
            source: e,
        })?;
        w.flush()?;
        Ok(n)
    })();

    let bytes = match r {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&part);
            return Err(e);
        }
    };

    fs::rename(&part, dest)
        .with_context(|| format!("rename {} -> {}", part.display(), dest.display()))?;
    info!("Wrote: {} ({} bytes)", dest.display(), bytes);
    Ok(true)
}
