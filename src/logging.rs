//! Tracing setup
//!
//! `--debug` sends everything from DEBUG up to stderr. Otherwise events go
//! to a log file so nothing interleaves with the chat view.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;

use crate::error::AppError;
use crate::utils::paths;

const DEFAULT_LEVEL: LevelFilter = LevelFilter::WARN;

pub(crate) fn parse_level(raw: Option<&str>) -> Result<LevelFilter, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(DEFAULT_LEVEL);
    };
    raw.parse::<LevelFilter>()
        .map_err(|_| AppError::InvalidLogLevel {
            input: raw.to_string(),
        })
}

/// Where file logging goes when enabled
pub(crate) fn log_path(configured: Option<&Path>) -> Option<PathBuf> {
    configured
        .map(Path::to_path_buf)
        .or_else(paths::default_log_path)
}

fn open_log(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

pub(crate) fn init(debug: bool, level: Option<&str>, file: Option<&Path>) -> Result<(), AppError> {
    if debug {
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(LevelFilter::DEBUG)
            .with_target(false)
            .try_init();
        return Ok(());
    }

    let level = parse_level(level)?;
    if level == LevelFilter::OFF {
        return Ok(());
    }
    let Some(path) = log_path(file) else {
        return Ok(());
    };
    match open_log(&path) {
        Ok(file) => {
            let _ = tracing_subscriber::fmt()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_max_level(level)
                .with_target(false)
                .try_init();
        }
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {}", path.display(), e);
        }
    }
    Ok(())
}
