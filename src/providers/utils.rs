use serde_json::Value;

/// Pulls the first choice's message content out of an OpenAI-compatible
/// chat completion body.
pub fn extract_chat_content(body: &Value) -> Option<String> {
    body.get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_first_choice() {
        let body = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "[{\"title\":\"Soup\"}]" } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        });
        assert_eq!(extract_chat_content(&body).as_deref(), Some("[{\"title\":\"Soup\"}]"));
    }

    #[test]
    fn test_missing_content_is_none() {
        assert!(extract_chat_content(&json!({ "choices": [] })).is_none());
        assert!(extract_chat_content(&json!({ "error": "quota" })).is_none());
    }
}
