//! Local key-value persistence
//!
//! A flat JSON object on disk. Reads never fail: a missing or unreadable
//! file is treated as empty.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::AppError;
use crate::utils::paths;

pub(crate) trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

pub(crate) struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default data location
    pub(crate) fn open_default() -> Result<Self, AppError> {
        let path = paths::store_path().ok_or(AppError::NoDataDir)?;
        Ok(Self::new(path))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Whole store object; values this crate does not own are kept as-is
    fn load(&self) -> Map<String, Value> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(_) => return Map::new(),
        };
        match serde_json::from_reader(file) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring corrupt store");
                Map::new()
            }
        }
    }

    fn save(&self, map: &Map<String, Value>) -> Result<(), AppError> {
        let wrap = |source: std::io::Error| AppError::Store {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(wrap)?;
        }
        let data = serde_json::to_vec_pretty(map).map_err(|e| wrap(e.into()))?;
        fs::write(&self.path, data).map_err(wrap)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.load().remove(key)? {
            Value::String(value) => Some(value),
            other => {
                tracing::debug!(key, value = %other, "ignoring non-string store value");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut map = self.load();
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.save(&map)
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut map = self.load();
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.save(&map)
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryStore;
