use crate::config::PrepareConfig;
use crate::types::{DatasetPaths, FrameLimit, Outcome, RunSummary};
use crate::{fetch, fs_scan, manifest, publish, unzip};

use anyhow::Result;
use tracing::{error, info, warn};

/* =========================
   1 dataset
   ========================= */

/// Chạy đủ các stage cho 1 dataset. Mỗi stage tự skip nếu output đã có.
///
/// Manifest được ghi cuối cùng: có `<id>.json` nghĩa là dataset đã xong hết.
pub fn prepare_dataset(
    cfg: &PrepareConfig,
    client: &reqwest::blocking::Client,
    id: &str,
    limit: FrameLimit,
) -> Result<Outcome> {
    fs_scan::validate_dataset_id(id)?;
    let paths = DatasetPaths::new(&cfg.work_dir, &cfg.publish_dir, id);

    if paths.manifest.exists() {
        match manifest::load_manifest(&paths.manifest) {
            Some(m) => info!("Manifest exists ({} frames) => skip.", m.frame_count),
            None => warn!(
                "Manifest exists but unreadable => skip anyway: {}",
                paths.manifest.display()
            ),
        }
        return Ok(Outcome::Skipped);
    }

    fetch::download_archive(client, &cfg.archive_url(id), &paths.archive)?;
    unzip::extract_archive(&paths.archive, &paths.extract_dir)?;

    let images_dir = fs_scan::find_images_dir(&paths.extract_dir, id)?;
    let filenames = fs_scan::list_frames(&images_dir)?;
    if filenames.is_empty() {
        warn!("No image files in {}", images_dir.display());
    }

    let m = manifest::build_manifest(id, &filenames, &paths.extract_dir)?;

    if publish::copy_sample(&images_dir, &filenames, &paths.publish_images, limit)?.is_none() {
        info!(
            "Publish images already present => not copied: {}",
            paths.publish_images.display()
        );
    }

    manifest::save_manifest(&paths.manifest, &m)?;
    info!(
        "Wrote: {} (frames={}, regions={})",
        paths.manifest.display(),
        m.frame_count,
        m.regions.is_some()
    );

    Ok(Outcome::Prepared)
}

/* =========================
   RUN ALL
   ========================= */

/// Chạy tuần tự từng dataset. Lỗi 1 dataset chỉ log, không dừng batch.
pub fn run_all(cfg: &PrepareConfig, ids: &[String], limit: FrameLimit) -> Result<RunSummary> {
    let client = fetch::build_client(cfg.http_timeout)?;
    let mut summary = RunSummary::default();

    info!(
        "=== PREPARE {} dataset(s), frames={:?} ===",
        ids.len(),
        limit
    );
    for id in ids {
        info!("--- dataset={} ---", id);
        let r = prepare_dataset(cfg, &client, id, limit);
        if let Err(e) = &r {
            error!("dataset {} failed: {:#}", id, e);
        }
        summary.record(id, r);
    }

    if summary.failed.is_empty() {
        info!(
            "DONE: prepared={}, skipped={}",
            summary.prepared.len(),
            summary.skipped.len()
        );
    } else {
        warn!(
            "DONE WITH ERRORS: prepared={}, skipped={}, failed={}",
            summary.prepared.len(),
            summary.skipped.len(),
            summary.failed.len()
        );
        for (id, err) in &summary.failed {
            warn!("  - {}: {}", id, err);
        }
    }

    Ok(summary)
}
