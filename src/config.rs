use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::utils::paths;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigTimeStyle {
    Clock,
    Relative,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) endpoint: Option<String>,
    #[serde(default)]
    pub(crate) peer: Option<String>,
    /// Opening message from the peer; empty disables it
    #[serde(default)]
    pub(crate) greeting: Option<String>,
    #[serde(default)]
    pub(crate) time: Option<ConfigTimeStyle>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) width: Option<usize>,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) log_level: Option<String>,
    #[serde(default)]
    pub(crate) log_file: Option<PathBuf>,

    /// File this config was read from
    #[serde(skip)]
    pub(crate) source: Option<PathBuf>,
    /// Files that existed but failed to parse, reported once logging is up
    #[serde(skip)]
    pub(crate) warnings: Vec<String>,
}

impl Config {
    pub(crate) fn load() -> Self {
        let mut warnings = Vec::new();

        // Try config locations in order of priority
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(mut config) => {
                        config.source = Some(path);
                        config.warnings = warnings;
                        return config;
                    }
                    Err(e) => {
                        warnings.push(format!("Failed to parse {}: {}", path.display(), e));
                    }
                }
            }
        }

        Self {
            warnings,
            ..Self::default()
        }
    }

    /// Log where the config came from and anything that was skipped
    pub(crate) fn report(&self) {
        for warning in &self.warnings {
            tracing::warn!("{warning}");
        }
        match &self.source {
            Some(path) => tracing::debug!(path = %path.display(), "loaded config"),
            None => tracing::debug!("no config file, using defaults"),
        }
    }

    /// Greeting to seed the thread with, `None` when disabled
    pub(crate) fn greeting(&self) -> Option<&str> {
        let greeting = self
            .greeting
            .as_deref()
            .unwrap_or(crate::consts::DEFAULT_GREETING);
        if greeting.trim().is_empty() {
            None
        } else {
            Some(greeting)
        }
    }

    pub(crate) fn get_config_paths() -> Vec<PathBuf> {
        // CHATLINE_HOME pins everything to one directory
        if let Some(dir) = paths::home_override() {
            return vec![dir.join("config.toml")];
        }

        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/chatline/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("chatline").join("config.toml"));
        }

        // 2. Platform config dir, e.g. ~/Library/Application Support/chatline/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("chatline").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.chatline.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".chatline.toml"));
        }

        paths
    }
}
