use serde_json::Value;

/// The reply returned by an LLM provider
///
/// Chat completion endpoints normally return a message with a text `content` field, but
/// some replies (tool-only turns, unexpected payloads) do not. Those are kept as the raw
/// JSON so the caller still gets something to show.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Structured { content: String },
    Raw(Value),
}

impl Reply {
    pub fn structured<S: Into<String>>(content: S) -> Self {
        Reply::Structured {
            content: content.into(),
        }
    }

    /// Extract the reply text, stringifying the raw form when no content field exists
    pub fn into_text(self) -> String {
        match self {
            Reply::Structured { content } => content,
            Reply::Raw(value) => value_to_text(&value),
        }
    }
}

/// String form of a JSON value: strings without quotes, everything else as JSON
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_reply_returns_content() {
        assert_eq!(Reply::structured("hello").into_text(), "hello");
    }

    #[test]
    fn test_raw_reply_returns_string_form() {
        let raw = json!({"role": "assistant", "tool_calls": []});
        let expected = raw.to_string();
        assert_eq!(Reply::Raw(raw).into_text(), expected);
        assert_eq!(Reply::Raw(json!("plain")).into_text(), "plain");
    }
}
