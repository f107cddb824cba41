use crate::types::FrameLimit;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Copy N frame đầu (đúng thứ tự manifest) từ `src_dir` sang `dest_dir`.
///
/// `dest_dir` đã tồn tại => không copy gì, kể cả khi `limit` khác lần trước.
/// Trả None khi bỏ qua, Some(n) là số file đã copy.
pub fn copy_sample(
    src_dir: &Path,
    filenames: &[String],
    dest_dir: &Path,
    limit: FrameLimit,
) -> Result<Option<usize>> {
    if dest_dir.exists() {
        debug!("publish dir exists, skip copy: {}", dest_dir.display());
        return Ok(None);
    }

    let mut staging = dest_dir.as_os_str().to_owned();
    staging.push(".partial");
    let staging = PathBuf::from(staging);
    if staging.exists() {
        fs::remove_dir_all(&staging)
            .with_context(|| format!("remove stale {}", staging.display()))?;
    }
    fs::create_dir_all(&staging).with_context(|| format!("create {}", staging.display()))?;

    let n = limit.take(filenames.len());
    let r: Result<()> = (|| {
        for name in &filenames[..n] {
            let from = src_dir.join(name);
            let to = staging.join(name);
            fs::copy(&from, &to)
                .with_context(|| format!("copy {} -> {}", from.display(), to.display()))?;
        }
        Ok(())
    })();

    if let Err(e) = r {
        let _ = fs::remove_dir_all(&staging);
        return Err(e);
    }

    fs::rename(&staging, dest_dir)
        .with_context(|| format!("rename {} -> {}", staging.display(), dest_dir.display()))?;
    info!("Copied {} of {} frame(s) -> {}", n, filenames.len(), dest_dir.display());
    Ok(Some(n))
}
