//! Speech-to-text for spoken reading preferences.

mod deepgram;

pub use deepgram::DeepgramTranscriber;

use crate::error::{LibrisError, Result};
use async_trait::async_trait;
use std::path::Path;

/// Audio formats accepted for transcription.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "m4a"];

/// Trait for speech-to-text services.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe raw audio bytes of the given MIME type.
    async fn transcribe(&self, audio: Vec<u8>, content_type: &str) -> Result<String>;

    /// Transcribe an audio file, deriving the MIME type from its extension.
    async fn transcribe_file(&self, path: &Path) -> Result<String> {
        let content_type = content_type_for_path(path)?;
        let audio = tokio::fs::read(path).await?;
        self.transcribe(audio, &content_type).await
    }
}

/// MIME type for a supported audio file.
///
/// `m4a` files are sent as `audio/mp4`; everything else as `audio/<ext>`.
pub fn content_type_for_path(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !AUDIO_EXTENSIONS.contains(&ext.as_str()) {
        return Err(LibrisError::UnsupportedFormat(format!(
            "{} (expected one of: {})",
            path.display(),
            AUDIO_EXTENSIONS.join(", ")
        )));
    }

    Ok(content_type_for_extension(&ext))
}

/// MIME type sent to the transcription service for a supported extension.
pub fn content_type_for_extension(ext: &str) -> String {
    match ext {
        "m4a" => "audio/mp4".to_string(),
        other => format!("audio/{}", other),
    }
}

/// Audio extension for an uploaded body's MIME type, if the format is supported.
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    match mime.split(';').next().unwrap_or("").trim() {
        "audio/wav" | "audio/x-wav" | "audio/wave" => Some("wav"),
        "audio/mp3" | "audio/mpeg" => Some("mp3"),
        "audio/mp4" | "audio/m4a" | "audio/x-m4a" => Some("m4a"),
        _ => None,
    }
}
