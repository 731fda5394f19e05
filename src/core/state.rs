use chrono::{DateTime, Utc};

use super::thread::MessageThread;
use super::types::Message;

/// Everything the chat view needs, owned by the controller
#[derive(Debug)]
pub(crate) struct ChatState {
    pub(super) user_name: String,
    pub(super) thread: MessageThread,
    /// A reply is outstanding
    pub(super) typing: bool,
}

impl ChatState {
    pub(crate) fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            thread: MessageThread::new(),
            typing: false,
        }
    }

    /// Seed the thread with an opening message from the remote party.
    /// Blank greetings are skipped.
    pub(crate) fn with_greeting(mut self, greeting: &str, at: DateTime<Utc>) -> Self {
        if !greeting.trim().is_empty() {
            self.thread.push_other(greeting, at);
        }
        self
    }

    pub(crate) fn user_name(&self) -> &str {
        &self.user_name
    }

    pub(crate) fn messages(&self) -> &[Message] {
        self.thread.messages()
    }

    pub(crate) fn is_typing(&self) -> bool {
        self.typing
    }
}
