use crate::core::ChatState;

/// Thread snapshot for programmatic consumption
pub(crate) fn output_thread_json(state: &ChatState, peer: &str) -> String {
    let output = serde_json::json!({
        "user": state.user_name(),
        "peer": peer,
        "typing": state.is_typing(),
        "messages": state.messages(),
    });

    serde_json::to_string_pretty(&output).unwrap_or_else(|e| {
        eprintln!("Failed to serialize JSON output: {}", e);
        "{}".to_string()
    })
}
