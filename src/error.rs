use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Name must be at least {min} characters long")]
    NameTooShort { min: usize },

    #[error("No display name set. Run `chatline name set <NAME>` or start `chatline chat` first.")]
    NoName,

    #[error("Message is empty")]
    EmptyMessage,

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Invalid log level: {input}")]
    InvalidLogLevel { input: String },

    #[error("Failed to write store {}: {source}", path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No data directory available for the local store")]
    NoDataDir,

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single chat round-trip. Never surfaced to the user.
#[derive(Debug, Error)]
pub(crate) enum ChatError {
    #[error("request failed: {0}")]
    Transport(#[from] ureq::Error),

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("chat worker panicked")]
    WorkerPanicked,
}
