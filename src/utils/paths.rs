//! Filesystem locations for config, store and log

use std::path::PathBuf;

use crate::consts::HOME_ENV;

/// Directory set through `CHATLINE_HOME`, if any
pub(crate) fn home_override() -> Option<PathBuf> {
    let raw = std::env::var_os(HOME_ENV)?;
    if raw.is_empty() {
        return None;
    }
    Some(PathBuf::from(raw))
}

/// Directory holding the store and the log file
pub(crate) fn data_dir() -> Option<PathBuf> {
    if let Some(dir) = home_override() {
        return Some(dir);
    }
    if let Some(dir) = dirs::data_local_dir() {
        return Some(dir.join("chatline"));
    }
    let home = dirs::home_dir()?;
    Some(home.join(".local").join("share").join("chatline"))
}

pub(crate) fn store_path() -> Option<PathBuf> {
    Some(data_dir()?.join("store.json"))
}

pub(crate) fn default_log_path() -> Option<PathBuf> {
    Some(data_dir()?.join("chatline.log"))
}
