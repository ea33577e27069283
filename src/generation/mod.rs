//! Recommendation text generation through a chat-completions API.

mod chat;

pub use chat::ChatGenerator;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for text generation services.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion for a prompt.
    ///
    /// Returns `Ok(None)` when the service answered without any text.
    async fn generate(&self, prompt: &str) -> Result<Option<String>>;

    /// Model identifier, for display.
    fn model(&self) -> &str;
}
