use crate::error::PrepareError;
use crate::fs_scan;
use crate::types::{Frame, Manifest};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Dựng manifest từ danh sách frame đã sort + regions (nếu có trong archive).
///
/// regions.json hỏng => lỗi cả dataset, không thử candidate tiếp theo.
pub fn build_manifest(id: &str, filenames: &[String], extract_dir: &Path) -> Result<Manifest> {
    let frames: Vec<Frame> = filenames
        .iter()
        .enumerate()
        .map(|(index, filename)| Frame {
            index,
            filename: filename.clone(),
            path: format!("{id}/images/{filename}"),
        })
        .collect();

    let regions = match fs_scan::find_regions_file(extract_dir, id) {
        Some(p) => Some(read_regions(&p)?),
        None => None,
    };

    Ok(Manifest {
        dataset_id: id.to_string(),
        frame_count: frames.len(),
        frames,
        regions,
    })
}

fn read_regions(path: &Path) -> Result<serde_json::Value> {
    let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let v = serde_json::from_str(&s).map_err(|e| PrepareError::Regions {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(v)
}

pub fn load_manifest(path: &Path) -> Option<Manifest> {
    let s = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&s).ok()
}

/// Ghi `<id>.json` qua file tạm + rename: người đọc chỉ thấy file đầy đủ.
pub fn save_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let s = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&tmp, s).with_context(|| format!("write {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}
