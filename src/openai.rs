//! OpenAI-compatible client configuration.
//!
//! The generation provider is reached through its OpenAI-compatible endpoint,
//! so the same client works for Gemini, OpenAI or a local server.

use crate::config::GenerationSettings;
use crate::error::{LibrisError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create a chat client for the configured provider.
///
/// Fails when the API key environment variable is missing or empty.
pub fn create_client(settings: &GenerationSettings) -> Result<Client<OpenAIConfig>> {
    let api_key = crate::config::Settings::api_key(&settings.api_key_env).ok_or_else(|| {
        LibrisError::Config(format!(
            "{} not set. Add it to your environment or a .env file.",
            settings.api_key_env
        ))
    })?;

    create_client_with_key(
        &settings.api_base,
        &api_key,
        Duration::from_secs(settings.timeout_seconds),
    )
}

/// Create a chat client with an explicit base URL, key and timeout.
pub fn create_client_with_key(
    api_base: &str,
    api_key: &str,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder().timeout(timeout).build()?;

    let config = OpenAIConfig::new()
        .with_api_base(api_base.trim_end_matches('/'))
        .with_api_key(api_key);

    Ok(Client::with_config(config).with_http_client(http_client))
}
