use crate::error::PrepareError;
use anyhow::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

const IMAGE_EXTS: [&str; 5] = ["tif", "tiff", "png", "jpg", "jpeg"];

fn dataset_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}\.\d{2}(\.test)?$").expect("static regex"))
}

/// id được ghép vào path + URL nên chỉ nhận dạng 00.00 / 00.00.test
pub fn validate_dataset_id(id: &str) -> Result<(), PrepareError> {
    if dataset_id_re().is_match(id) {
        Ok(())
    } else {
        Err(PrepareError::InvalidDatasetId(id.to_string()))
    }
}

/// Layout trong archive không thống nhất: thử lần lượt.
pub fn images_dir_candidates(extract_dir: &Path, id: &str) -> Vec<PathBuf> {
    vec![
        extract_dir.join("images"),
        extract_dir.join(format!("neurofinder.{id}")).join("images"),
    ]
}

pub fn regions_file_candidates(extract_dir: &Path, id: &str) -> Vec<PathBuf> {
    vec![
        extract_dir.join("regions").join("regions.json"),
        extract_dir
            .join(format!("neurofinder.{id}"))
            .join("regions")
            .join("regions.json"),
    ]
}

pub fn find_images_dir(extract_dir: &Path, id: &str) -> Result<PathBuf, PrepareError> {
    images_dir_candidates(extract_dir, id)
        .into_iter()
        .find(|p| p.is_dir())
        .ok_or_else(|| PrepareError::MissingImagesDir(extract_dir.to_path_buf()))
}

/// Match đầu tiên thắng, các candidate sau bị bỏ qua.
pub fn find_regions_file(extract_dir: &Path, id: &str) -> Option<PathBuf> {
    regions_file_candidates(extract_dir, id)
        .into_iter()
        .find(|p| p.is_file())
}

fn is_image_file(p: &Path) -> bool {
    let ext = p
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    IMAGE_EXTS.contains(&ext.as_str())
}

/// Tên file ảnh (top-level) trong `images_dir`, sort tăng dần.
///
/// Tên không phải UTF-8 => lỗi, vì manifest và bước copy đều dùng đúng tên này.
pub fn list_frames(images_dir: &Path) -> Result<Vec<String>> {
    let mut out = Vec::new();

    for entry in WalkDir::new(images_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_image_file(entry.path()) {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            return Err(PrepareError::NonUtf8FrameName(entry.path().to_path_buf()).into());
        };
        out.push(name.to_string());
    }

    out.sort();
    Ok(out)
}
