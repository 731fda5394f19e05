//! Core module - chat session state and the send/reply cycle

mod dispatch;
mod gate;
mod state;
mod thread;
mod types;

pub(crate) use dispatch::{TurnOutcome, TurnResult, dispatch, spawn_turn};
pub(crate) use gate::NameGate;
pub(crate) use state::ChatState;
pub(crate) use types::{ChatReply, DeliveryStatus, Message};
