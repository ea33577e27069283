//! Text extraction from photographed book descriptions.

mod tesseract;

pub use tesseract::TesseractOcr;

use crate::error::{LibrisError, Result};
use async_trait::async_trait;
use std::path::Path;

/// Image formats accepted for OCR.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Trait for OCR engines.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Extract the text of an image as a single space-separated string.
    async fn extract_text(&self, image_path: &Path) -> Result<String>;

    /// Engine name, for display.
    fn name(&self) -> &str;
}

/// Check that a path has a supported image extension.
pub fn check_image_path(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(LibrisError::UnsupportedFormat(format!(
            "{} (expected one of: {})",
            path.display(),
            IMAGE_EXTENSIONS.join(", ")
        )))
    }
}

/// File extension for an image MIME type.
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    match mime.split(';').next().unwrap_or("").trim() {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        _ => None,
    }
}

/// First `max_chars` characters of extracted text, for echoing back to the user.
pub fn preview(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_image_path() {
        assert!(check_image_path(Path::new("cover.JPG")).is_ok());
        assert!(check_image_path(Path::new("/tmp/back.png")).is_ok());
        assert!(check_image_path(Path::new("notes.txt")).is_err());
        assert!(check_image_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_extension_for_mime() {
        assert_eq!(extension_for_mime("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for_mime("image/png; charset=binary"), Some("png"));
        assert_eq!(extension_for_mime("image/gif"), None);
    }

    #[test]
    fn test_preview_is_char_safe() {
        assert_eq!(preview("  corto  ", 10), "corto");
        assert_eq!(preview("canción de cuna", 6), "canció...");
    }
}
