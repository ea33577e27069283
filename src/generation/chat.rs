//! Chat-completions generator.

use super::Generator;
use crate::config::GenerationSettings;
use crate::error::{LibrisError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Generator backed by an OpenAI-compatible chat completions endpoint.
pub struct ChatGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    system_prompt: Option<String>,
}

impl ChatGenerator {
    /// Create a generator from settings. Fails if the API key is missing.
    pub fn from_settings(settings: &GenerationSettings) -> Result<Self> {
        Ok(Self::with_client(
            create_client(settings)?,
            &settings.model,
            settings.temperature,
        ))
    }

    /// Create a generator around an existing client.
    pub fn with_client(
        client: async_openai::Client<async_openai::config::OpenAIConfig>,
        model: &str,
        temperature: f32,
    ) -> Self {
        Self {
            client,
            model: model.to_string(),
            temperature,
            system_prompt: None,
        }
    }

    /// Send a system message before every prompt. Empty strings are ignored.
    pub fn with_system_prompt(mut self, system: &str) -> Self {
        self.system_prompt = Some(system.to_string()).filter(|s| !s.trim().is_empty());
        self
    }
}

#[async_trait]
impl Generator for ChatGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<Option<String>> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        if let Some(system) = &self.system_prompt {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system.clone())
                    .build()
                    .map_err(|e| LibrisError::Generation(e.to_string()))?
                    .into(),
            );
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.to_string())
                .build()
                .map_err(|e| LibrisError::Generation(e.to_string()))?
                .into(),
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| LibrisError::Generation(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| LibrisError::Generation(e.to_string()))?;

        let text = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        debug!("Generation returned {} chars", text.as_ref().map_or(0, |t| t.len()));
        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::create_client_with_key;
    use std::time::Duration;

    #[test]
    fn test_blank_system_prompt_ignored() {
        let client =
            create_client_with_key("http://localhost:1", "test", Duration::from_secs(1)).unwrap();
        let generator = ChatGenerator::with_client(client, "test-model", 0.2).with_system_prompt("  ");
        assert!(generator.system_prompt.is_none());
        assert_eq!(generator.model(), "test-model");
    }
}
