use serde::{Deserialize, Serialize};

/// Body of the outbound chat call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ChatRequest {
    pub(crate) user_input: String,
    /// Session display name, used by the endpoint as a correlation key
    pub(crate) user_id: String,
}

/// Body the endpoint answers with
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub(crate) response: String,
    #[serde(default)]
    pub(crate) mood: Option<String>,
}
