//! File logging. The terminal belongs to the game, so nothing goes to stderr.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};

/// Install a debug-level file logger appending to `path`
pub fn init_file_logger(path: &Path) -> Result<()> {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    simplelog::WriteLogger::init(log::LevelFilter::Debug, config, file)
        .context("initialize logger")?;
    Ok(())
}
