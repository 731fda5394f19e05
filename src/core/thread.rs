//! Append-only message thread
//!
//! Messages are only ever appended. Ids strictly increase and timestamps
//! never go backwards, so append order, id order and chronological order
//! are the same order.

use chrono::{DateTime, Utc};

use super::types::{DeliveryStatus, Message, MessageId, Sender};

#[derive(Debug, Default)]
pub(crate) struct MessageThread {
    messages: Vec<Message>,
}

impl MessageThread {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Append a locally sent message, marked as seen
    pub(crate) fn push_user(&mut self, text: &str, now: DateTime<Utc>) -> &Message {
        self.push(text, Sender::User, Some(DeliveryStatus::Seen), now)
    }

    /// Append a message from the remote party
    pub(crate) fn push_other(&mut self, text: &str, now: DateTime<Utc>) -> &Message {
        self.push(text, Sender::Other, None, now)
    }

    fn push(
        &mut self,
        text: &str,
        sender: Sender,
        status: Option<DeliveryStatus>,
        now: DateTime<Utc>,
    ) -> &Message {
        let (id, timestamp) = self.next_stamp(now);
        self.messages.push(Message {
            id,
            text: text.to_string(),
            sender,
            timestamp,
            status,
        });
        &self.messages[self.messages.len() - 1]
    }

    fn next_stamp(&self, now: DateTime<Utc>) -> (MessageId, DateTime<Utc>) {
        let Some(last) = self.messages.last() else {
            return (MessageId(millis(now)), now);
        };
        let timestamp = now.max(last.timestamp);
        let id = millis(timestamp).max(last.id.0 + 1);
        (MessageId(id), timestamp)
    }
}

fn millis(ts: DateTime<Utc>) -> u64 {
    u64::try_from(ts.timestamp_millis()).unwrap_or(0)
}
