//! Outbound chat call
//!
//! A single POST/JSON request-response exchange per turn.

mod client;
mod types;

pub(crate) use client::{ChatBackend, HttpBackend};
pub(crate) use types::ChatRequest;
