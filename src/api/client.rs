use std::time::Duration;

use crate::core::ChatReply;
use crate::error::ChatError;

use super::types::{ChatRequest, ChatResponse};

/// Something that turns one user message into one reply
pub(crate) trait ChatBackend: Send + Sync {
    fn reply(&self, request: &ChatRequest) -> Result<ChatReply, ChatError>;
}

/// Chat endpoint reached over HTTP: one POST per turn, no retry
pub(crate) struct HttpBackend {
    agent: ureq::Agent,
    endpoint: String,
}

impl HttpBackend {
    pub(crate) fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .build()
            .into();
        Self {
            agent,
            endpoint: endpoint.into(),
        }
    }

    pub(crate) fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ChatBackend for HttpBackend {
    fn reply(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            user_id = %request.user_id,
            user_input = %request.user_input,
            "sending chat request"
        );
        let mut response = self.agent.post(self.endpoint.as_str()).send_json(request)?;
        let body = response.body_mut().read_to_vec()?;
        let parsed: ChatResponse = serde_json::from_slice(&body)?;
        tracing::debug!(response = %parsed.response, "chat response received");
        Ok(ChatReply {
            mood: parsed.mood,
            ..ChatReply::new(parsed.response)
        })
    }
}
