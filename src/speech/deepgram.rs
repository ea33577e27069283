//! Deepgram pre-recorded audio transcription.

use super::SpeechToText;
use crate::config::{Settings, SpeechSettings};
use crate::error::{LibrisError, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Transcriber for the Deepgram `listen` endpoint.
pub struct DeepgramTranscriber {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    language: String,
    smart_format: bool,
}

#[derive(Debug, Deserialize)]
struct ListenResponse {
    results: ListenResults,
}

#[derive(Debug, Deserialize)]
struct ListenResults {
    channels: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
struct Channel {
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    transcript: String,
}

impl DeepgramTranscriber {
    /// Create a transcriber with explicit parameters.
    pub fn new(
        endpoint: &str,
        api_key: &str,
        model: &str,
        language: &str,
        smart_format: bool,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            language: language.to_string(),
            smart_format,
        })
    }

    /// Create a transcriber from settings. Fails if the API key is missing.
    pub fn from_settings(settings: &SpeechSettings, language: &str) -> Result<Self> {
        let api_key = Settings::api_key(&settings.api_key_env).ok_or_else(|| {
            LibrisError::Config(format!("{} not set", settings.api_key_env))
        })?;

        Self::new(
            &settings.endpoint,
            &api_key,
            &settings.model,
            language,
            settings.smart_format,
            Duration::from_secs(settings.timeout_seconds),
        )
    }
}

#[async_trait]
impl SpeechToText for DeepgramTranscriber {
    #[instrument(skip(self, audio), fields(bytes = audio.len(), model = %self.model))]
    async fn transcribe(&self, audio: Vec<u8>, content_type: &str) -> Result<String> {
        debug!("Sending audio to {}", self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Token {}", self.api_key))
            .header(CONTENT_TYPE, content_type)
            .query(&[
                ("model", self.model.as_str()),
                ("language", self.language.as_str()),
                ("smart_format", if self.smart_format { "true" } else { "false" }),
            ])
            .body(audio)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LibrisError::Speech(format!("status {}", status.as_u16())));
        }

        let body: ListenResponse = response
            .json()
            .await
            .map_err(|e| LibrisError::Speech(format!("unexpected response: {}", e)))?;

        let transcript = body
            .results
            .channels
            .into_iter()
            .next()
            .and_then(|c| c.alternatives.into_iter().next())
            .map(|a| a.transcript.trim().to_string())
            .ok_or_else(|| LibrisError::Speech("response has no transcript".to_string()))?;

        debug!("Transcribed {} chars", transcript.len());
        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_config_error() {
        let settings = SpeechSettings {
            api_key_env: "LIBRIS_TEST_NO_DEEPGRAM_KEY".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            DeepgramTranscriber::from_settings(&settings, "es"),
            Err(LibrisError::Config(_))
        ));
    }

    #[test]
    fn test_parse_listen_response() {
        let json = r#"{"metadata":{},"results":{"channels":[{"alternatives":[{"transcript":"hola","confidence":0.9}]}]}}"#;
        let parsed: ListenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.results.channels[0].alternatives[0].transcript, "hola");
    }
}
