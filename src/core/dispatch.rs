//! Sending a message and folding the reply back into the thread
//!
//! A turn has two halves. `begin_turn` appends the user's message right
//! away and raises the typing flag. `settle_turn` appends the reply, or
//! drops the turn on failure, and lowers the flag. Only the controller
//! calls either half; the network call itself may run on a worker thread.
//!
//! Turns are not correlated. With several in flight, replies land in the
//! order they arrive and the first one to settle clears the flag.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use chrono::{DateTime, Utc};

use crate::api::{ChatBackend, ChatRequest};
use crate::error::ChatError;

use super::state::ChatState;
use super::types::{ChatReply, Message};

/// Result of one network round-trip, handed back to the controller
#[derive(Debug)]
pub(crate) struct TurnOutcome {
    pub(crate) request: ChatRequest,
    pub(crate) result: Result<ChatReply, ChatError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TurnResult {
    Replied,
    Dropped,
}

impl ChatState {
    /// Append the user's message and mark the peer as typing.
    ///
    /// Returns the outbound request, or `None` if the text is blank.
    pub(crate) fn begin_turn(&mut self, text: &str) -> Option<ChatRequest> {
        self.begin_turn_at(text, Utc::now())
    }

    pub(crate) fn begin_turn_at(&mut self, text: &str, now: DateTime<Utc>) -> Option<ChatRequest> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.thread.push_user(text, now);
        self.typing = true;
        Some(ChatRequest {
            user_input: text.to_string(),
            user_id: self.user_name.clone(),
        })
    }

    /// Fold a finished round-trip into the thread.
    ///
    /// Failures are logged and otherwise dropped.
    pub(crate) fn settle_turn(&mut self, outcome: TurnOutcome) -> Option<&Message> {
        self.settle_turn_at(outcome, Utc::now())
    }

    pub(crate) fn settle_turn_at(
        &mut self,
        outcome: TurnOutcome,
        now: DateTime<Utc>,
    ) -> Option<&Message> {
        self.typing = false;
        match outcome.result {
            Ok(reply) => {
                if let Some(mood) = &reply.mood {
                    tracing::debug!(mood = %mood, "reply mood");
                }
                Some(self.thread.push_other(&reply.text, now))
            }
            Err(e) => {
                tracing::warn!(
                    user_input = %outcome.request.user_input,
                    error = %e,
                    "chat request failed, dropping turn"
                );
                None
            }
        }
    }
}

/// Run a whole turn on the calling thread
pub(crate) fn dispatch(
    state: &mut ChatState,
    backend: &dyn ChatBackend,
    text: &str,
) -> Option<TurnResult> {
    let request = state.begin_turn(text)?;
    let result = backend.reply(&request);
    let settled = state.settle_turn(TurnOutcome { request, result });
    Some(if settled.is_some() {
        TurnResult::Replied
    } else {
        TurnResult::Dropped
    })
}

/// Run the network half of a turn on a worker thread.
///
/// The outcome is posted to `events`; if the receiver is gone the reply is
/// discarded. A panicking backend still posts an outcome, so the controller
/// never waits on a turn that cannot finish.
pub(crate) fn spawn_turn<E>(
    backend: Arc<dyn ChatBackend>,
    request: ChatRequest,
    events: mpsc::Sender<E>,
) -> JoinHandle<()>
where
    E: From<TurnOutcome> + Send + 'static,
{
    thread::spawn(move || {
        let result = panic::catch_unwind(AssertUnwindSafe(|| backend.reply(&request)))
            .unwrap_or(Err(ChatError::WorkerPanicked));
        if events.send(TurnOutcome { request, result }.into()).is_err() {
            tracing::debug!("controller gone, discarding reply");
        }
    })
}
