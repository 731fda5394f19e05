//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode, ConfigTimeStyle};
use crate::consts::{DEFAULT_ENDPOINT, DEFAULT_PEER, DEFAULT_WIDTH, MAX_WIDTH};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum TimeStyle {
    /// Wall clock time, e.g. 14:05 (default)
    #[default]
    Clock,
    /// Time since the message, e.g. "5 minutes ago"
    Relative,
}

impl TimeStyle {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            TimeStyle::Clock => "clock",
            TimeStyle::Relative => "relative",
        }
    }
}

#[derive(Parser)]
#[command(name = "chatline")]
#[command(about = "Chat with a remote persona from the terminal", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Chat endpoint URL (POST, JSON)
    #[arg(long, global = true, value_name = "URL")]
    pub(crate) endpoint: Option<String>,

    /// Display name of the remote party
    #[arg(long, global = true, value_name = "NAME")]
    pub(crate) peer: Option<String>,

    /// How message times are shown [default: clock]
    #[arg(long, global = true, value_enum)]
    pub(crate) time: Option<TimeStyle>,

    /// Timezone for message times (e.g., "Asia/Shanghai", "UTC", "America/New_York")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Width of the rendered thread in columns
    #[arg(long, global = true, value_name = "COLUMNS")]
    pub(crate) width: Option<usize>,

    /// Color output mode [default: auto]
    #[arg(long, global = true, value_enum)]
    pub(crate) color: Option<ColorMode>,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Give up on a reply after this many seconds (no limit by default)
    #[arg(long, global = true, value_name = "SECS")]
    pub(crate) timeout: Option<u64>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Log debug output to stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }

        if self.time.is_none() {
            self.time = config.time.map(|time| match time {
                ConfigTimeStyle::Clock => TimeStyle::Clock,
                ConfigTimeStyle::Relative => TimeStyle::Relative,
            });
        }

        if self.color.is_none() {
            self.color = config.color.map(|color| match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            });
        }

        if self.endpoint.is_none() {
            self.endpoint = config.endpoint.clone();
        }
        if self.peer.is_none() {
            self.peer = config.peer.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        if self.width.is_none() {
            self.width = config.width;
        }
        if self.timeout.is_none() {
            self.timeout = config.timeout_secs;
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color.unwrap_or_default() {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    pub(crate) fn time_style(&self) -> TimeStyle {
        self.time.unwrap_or_default()
    }

    pub(crate) fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub(crate) fn peer(&self) -> &str {
        self.peer
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PEER)
    }

    pub(crate) fn width(&self) -> usize {
        self.width
            .filter(|w| *w > 0)
            .map_or(DEFAULT_WIDTH, |w| w.min(MAX_WIDTH))
    }

    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.timeout.filter(|s| *s > 0).map(Duration::from_secs)
    }
}
