use super::response::{ChatMessage, ProviderReply};
use async_trait::async_trait;

/// The chat-completion boundary.
///
/// The session loop sends the full accumulated history on every call (no
/// truncation or windowing) and expects exactly one assistant reply back.
/// A reply with no textual content is an error at this seam, never an empty
/// string smuggled upward.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name, used in logs and error messages.
    fn name(&self) -> &str;

    async fn complete(
        &self,
        messages: &[ChatMessage],
        model: &str,
        temperature: f64,
    ) -> anyhow::Result<ProviderReply>;
}
