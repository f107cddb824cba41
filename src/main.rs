mod app;
mod config;
mod error;
mod fetch;
mod fs_scan;
mod manifest;
mod publish;
mod types;
mod unzip;

use clap::Parser;
use config::PrepareConfig;
use tracing_subscriber::FmtSubscriber;
use types::FrameLimit;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Download Neurofinder datasets, build frame manifests and publish sample frames"
)]
struct Cli {
    /// Dataset ids (vd 00.00). Bỏ trống => toàn bộ catalog.
    datasets: Vec<String>,

    /// Max frames copied per dataset
    #[arg(long, default_value_t = config::DEFAULT_FRAMES)]
    frames: usize,

    /// Copy every frame (overrides --frames)
    #[arg(long)]
    all_frames: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg_path = config::config_path();
    let yaml = config::load_yaml(&cfg_path)?;
    let log_level = config::parse_log_level(yaml.as_ref().and_then(|y| y.log_level.as_deref()));

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let from_file = yaml.is_some();
    let cfg = yaml
        .map(PrepareConfig::from_yaml)
        .unwrap_or_default();

    if from_file {
        tracing::info!("CONFIG = {}", cfg_path.display());
    }
    tracing::info!("WORK DIR    = {}", cfg.work_dir.display());
    tracing::info!("PUBLISH DIR = {}", cfg.publish_dir.display());

    let limit = if cli.all_frames {
        FrameLimit::All
    } else {
        FrameLimit::Max(cli.frames)
    };

    let ids = if cli.datasets.is_empty() {
        cfg.datasets.clone()
    } else {
        cli.datasets
    };

    // lỗi từng dataset đã log trong run_all, process vẫn exit 0
    app::run_all(&cfg, &ids, limit)?;
    Ok(())
}
