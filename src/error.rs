//! Error types for Libris.

use thiserror::Error;

/// Library-level error type for Libris operations.
#[derive(Error, Debug)]
pub enum LibrisError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Model not found: {0}. Run 'libris train' first.")]
    ModelNotFound(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("Speech-to-text failed: {0}")]
    Speech(String),

    #[error("Generation API error: {0}")]
    Generation(String),

    #[error("No legible text detected in the image")]
    NoTextDetected,

    #[error("No speech detected in the audio")]
    NoSpeechDetected,

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),
}

/// Result type alias for Libris operations.
pub type Result<T> = std::result::Result<T, LibrisError>;
