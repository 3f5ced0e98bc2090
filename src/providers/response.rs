use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    /// Wire label used by OpenAI-compatible chat APIs.
    pub fn as_wire_str(self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// One entry of the conversation history, as sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// One assistant completion, plus whatever usage metadata the provider sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReply {
    pub text: String,
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    pub model: Option<String>,
}

impl ProviderReply {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            input_tokens: None,
            output_tokens: None,
            model: None,
        }
    }

    pub fn total_tokens(&self) -> Option<u64> {
        match (self.input_tokens, self.output_tokens) {
            (Some(input), Some(output)) => Some(input + output),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_map_to_wire_labels() {
        assert_eq!(MessageRole::System.as_wire_str(), "system");
        assert_eq!(MessageRole::User.as_wire_str(), "user");
        assert_eq!(MessageRole::Assistant.as_wire_str(), "assistant");
    }

    #[test]
    fn total_tokens_requires_both_counts() {
        let mut reply = ProviderReply::text_only("hi");
        assert_eq!(reply.total_tokens(), None);
        reply.input_tokens = Some(10);
        assert_eq!(reply.total_tokens(), None);
        reply.output_tokens = Some(5);
        assert_eq!(reply.total_tokens(), Some(15));
    }
}
