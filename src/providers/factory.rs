use super::compatible::{AuthStyle, OpenAiCompatibleProvider};
use super::traits::Provider;

/// Resolve the API key for a provider from config and environment variables.
///
/// Resolution order:
/// 1. Explicitly provided `api_key` (trimmed, filtered if empty)
/// 2. Provider-specific environment variable (e.g. `OPENAI_API_KEY`)
/// 3. Generic fallback variables (`CODELOOM_API_KEY`, `API_KEY`)
pub fn resolve_api_key(name: &str, explicit_api_key: Option<&str>) -> Option<String> {
    if let Some(key) = explicit_api_key.map(str::trim).filter(|k| !k.is_empty()) {
        return Some(key.to_string());
    }

    let provider_env = match name {
        "openai" => Some("OPENAI_API_KEY"),
        "openrouter" => Some("OPENROUTER_API_KEY"),
        "groq" => Some("GROQ_API_KEY"),
        _ => None,
    };

    let candidates = provider_env
        .into_iter()
        .chain(["CODELOOM_API_KEY", "API_KEY"]);

    for env_var in candidates {
        if let Ok(value) = std::env::var(env_var) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    None
}

/// Build a chat provider by name.
///
/// `base_url_override` points the provider at a non-default endpoint
/// (self-hosted gateways, proxies); it also lets tests aim at a local mock.
pub fn create_provider(
    name: &str,
    api_key: Option<&str>,
    base_url_override: Option<&str>,
) -> anyhow::Result<Box<dyn Provider>> {
    let resolved_key = resolve_api_key(name, api_key);
    let api_key = resolved_key.as_deref();

    let provider = match name {
        "openai" => OpenAiCompatibleProvider::new(
            "OpenAI",
            base_url_override.unwrap_or("https://api.openai.com/v1"),
            api_key,
            AuthStyle::Bearer,
        ),
        "openrouter" => OpenAiCompatibleProvider::new(
            "OpenRouter",
            base_url_override.unwrap_or("https://openrouter.ai/api/v1"),
            api_key,
            AuthStyle::Bearer,
        ),
        "groq" => OpenAiCompatibleProvider::new(
            "Groq",
            base_url_override.unwrap_or("https://api.groq.com/openai/v1"),
            api_key,
            AuthStyle::Bearer,
        ),
        // Local inference needs no key.
        "ollama" => OpenAiCompatibleProvider::new(
            "Ollama",
            base_url_override.unwrap_or("http://localhost:11434/v1"),
            None,
            AuthStyle::Bearer,
        ),
        other => anyhow::bail!(
            "unknown provider: {other} (expected one of: openai, openrouter, groq, ollama)"
        ),
    };

    Ok(Box::new(provider))
}
