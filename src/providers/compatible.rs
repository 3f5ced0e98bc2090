//! Generic OpenAI-compatible provider.
//! Every endpoint codeloom talks to follows the same `/chat/completions`
//! shape, so a single implementation parameterized by base URL and auth
//! style covers OpenAI, OpenRouter, Groq, and local Ollama alike.

use super::response::{ChatMessage, ProviderReply};
use super::scrub::api_error;
use super::traits::Provider;
use crate::LlmError;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The session performs one blocking completion per turn, so the client only
/// needs a single warm connection; the generous request timeout covers slow
/// long-form completions.
fn build_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(120))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(1)
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// How the provider expects the API key to be sent.
#[derive(Debug, Clone)]
pub enum AuthStyle {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// `x-api-key: <key>`
    XApiKey,
    /// Custom header name
    Custom(String),
}

pub struct OpenAiCompatibleProvider {
    name: String,
    /// Pre-computed `(header_name, header_value)` for auth.
    cached_auth: Option<(String, String)>,
    /// Pre-computed chat completions URL.
    cached_chat_url: String,
    client: Client,
}

impl OpenAiCompatibleProvider {
    pub fn new(name: &str, base_url: &str, api_key: Option<&str>, auth_style: AuthStyle) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let cached_chat_url = if base_url.contains("chat/completions") {
            base_url
        } else {
            format!("{base_url}/chat/completions")
        };

        let cached_auth = api_key.map(|k| match &auth_style {
            AuthStyle::Bearer => ("Authorization".to_string(), format!("Bearer {k}")),
            AuthStyle::XApiKey => ("x-api-key".to_string(), k.to_string()),
            AuthStyle::Custom(header) => (header.clone(), k.to_string()),
        });

        Self {
            name: name.to_string(),
            cached_auth,
            cached_chat_url,
            client: build_client(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<ChatUsage>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl Provider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        model: &str,
        temperature: f64,
    ) -> anyhow::Result<ProviderReply> {
        let request = ChatRequest {
            model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_wire_str(),
                    content: &m.content,
                })
                .collect(),
            temperature,
        };

        let mut builder = self.client.post(&self.cached_chat_url).json(&request);
        if let Some((header, value)) = &self.cached_auth {
            builder = builder.header(header, value);
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("{} request failed", self.name))?;

        if !response.status().is_success() {
            return Err(api_error(&self.name, response).await);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .with_context(|| format!("{} response JSON decode failed", self.name))?;

        // A choice with null content is a protocol violation; the session
        // loop treats it as unrecoverable.
        let text = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::EmptyMessage {
                provider: self.name.clone(),
            })?;

        let mut reply = ProviderReply::text_only(text);
        if let Some(usage) = chat_response.usage {
            reply.input_tokens = Some(usage.prompt_tokens);
            reply.output_tokens = Some(usage.completion_tokens);
        }
        reply.model = chat_response.model;
        Ok(reply)
    }
}
