use crate::error::PrepareError;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::ZipArchive;

fn staging_dir(target: &Path) -> PathBuf {
    let mut s = target.as_os_str().to_owned();
    s.push(".partial");
    PathBuf::from(s)
}

fn extract_err(archive: &Path, reason: impl ToString) -> PrepareError {
    PrepareError::Extract {
        archive: archive.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Giải nén toàn bộ entry vào `out_dir`. Trả số file đã ghi.
fn unpack_into(archive_path: &Path, out_dir: &Path) -> Result<usize> {
    let file = File::open(archive_path)
        .with_context(|| format!("open {}", archive_path.display()))?;
    let mut zip = ZipArchive::new(file).map_err(|e| extract_err(archive_path, e))?;

    let mut files = 0usize;
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(|e| extract_err(archive_path, e))?;

        // chặn zip-slip (../, path tuyệt đối)
        let Some(rel) = entry.enclosed_name() else {
            return Err(extract_err(
                archive_path,
                format!("unsafe entry name {:?}", entry.name()),
            )
            .into());
        };
        let out = out_dir.join(rel);

        if entry.is_dir() {
            fs::create_dir_all(&out)?;
            continue;
        }

        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut w = File::create(&out).with_context(|| format!("create {}", out.display()))?;
        io::copy(&mut entry, &mut w).map_err(|e| extract_err(archive_path, e))?;
        files += 1;
    }

    Ok(files)
}

/// Giải nén `archive` vào `target` nếu `target` chưa tồn tại. Trả true nếu đã giải nén.
///
/// Ghi vào thư mục staging rồi rename, lỗi thì xoá staging.
pub fn extract_archive(archive: &Path, target: &Path) -> Result<bool> {
    if target.exists() {
        debug!("already extracted, skip: {}", target.display());
        return Ok(false);
    }

    let staging = staging_dir(target);
    if staging.exists() {
        // còn sót từ lần chạy bị crash
        fs::remove_dir_all(&staging)
            .with_context(|| format!("remove stale {}", staging.display()))?;
    }
    fs::create_dir_all(&staging)?;

    info!("Extracting {} -> {}", archive.display(), target.display());
    match unpack_into(archive, &staging) {
        Ok(n) => {
            fs::rename(&staging, target).with_context(|| {
                format!("rename {} -> {}", staging.display(), target.display())
            })?;
            info!("Extracted {} file(s)", n);
            Ok(true)
        }
        Err(e) => {
            let _ = fs::remove_dir_all(&staging);
            Err(e)
        }
    }
}
