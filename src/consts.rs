use std::time::Duration;

/// Default chat endpoint (POST, JSON in / JSON out)
pub(crate) const DEFAULT_ENDPOINT: &str = "https://sarah-ai-01.onrender.com/chat";

/// Display name of the remote party
pub(crate) const DEFAULT_PEER: &str = "Sarah";

/// Opening message from the remote party, shown before the first turn
pub(crate) const DEFAULT_GREETING: &str = "Hey, Hi";

/// How far in the past the greeting is stamped
pub(crate) const GREETING_AGE: Duration = Duration::from_secs(10 * 60);

/// Minimum display name length, counted after trimming
pub(crate) const MIN_NAME_LEN: usize = 2;

/// Store key holding the session display name
pub(crate) const NAME_KEY: &str = "userName";

/// Clock format used for message times: "14:05"
pub(crate) const CLOCK_FORMAT: &str = "%H:%M";

/// Default render width when the config does not set one
pub(crate) const DEFAULT_WIDTH: usize = 72;

/// Widest render width honoured; larger values are clamped
pub(crate) const MAX_WIDTH: usize = 1000;

/// Environment variable that relocates config, store and log into one directory
pub(crate) const HOME_ENV: &str = "CHATLINE_HOME";
