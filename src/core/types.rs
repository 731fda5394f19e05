//! Message model shared by the thread, the dispatcher and the views

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Message identifier, derived from the creation time in epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub(crate) struct MessageId(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Sender {
    /// The person at this terminal
    User,
    /// The remote chat party
    Other,
}

/// Static delivery marker, only ever set on locally sent messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum DeliveryStatus {
    Seen,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct Message {
    pub(crate) id: MessageId,
    pub(crate) text: String,
    pub(crate) sender: Sender,
    pub(crate) timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) status: Option<DeliveryStatus>,
}

impl Message {
    pub(crate) fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// Reply text returned by the remote party
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChatReply {
    pub(crate) text: String,
    /// Mood label some endpoints attach to a reply
    pub(crate) mood: Option<String>,
}

impl ChatReply {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mood: None,
        }
    }
}
