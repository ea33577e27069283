//! Tesseract command-line OCR.

use super::{check_image_path, OcrEngine};
use crate::config::OcrSettings;
use crate::error::{LibrisError, Result};
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, instrument};

/// OCR through the `tesseract` executable.
pub struct TesseractOcr {
    command: String,
    language: String,
}

impl TesseractOcr {
    pub fn new(command: &str, language: &str) -> Self {
        Self {
            command: command.to_string(),
            language: language.to_string(),
        }
    }

    pub fn from_settings(settings: &OcrSettings) -> Self {
        Self::new(&settings.command, &settings.language)
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::from_settings(&OcrSettings::default())
    }
}

/// Join non-empty output lines with single spaces.
fn join_lines(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    #[instrument(skip(self), fields(image = %image_path.display()))]
    async fn extract_text(&self, image_path: &Path) -> Result<String> {
        check_image_path(image_path)?;
        if !image_path.exists() {
            return Err(LibrisError::Ocr(format!(
                "image not found: {}",
                image_path.display()
            )));
        }

        let output = tokio::process::Command::new(&self.command)
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    LibrisError::ToolNotFound(self.command.clone())
                } else {
                    LibrisError::Ocr(format!("Failed to run {}: {}", self.command, e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LibrisError::ToolFailed(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        let text = join_lines(&String::from_utf8_lossy(&output.stdout));
        debug!("Extracted {} chars of text", text.len());
        Ok(text)
    }

    fn name(&self) -> &str {
        &self.command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_lines() {
        // tesseract ends its output with a form feed
        assert_eq!(
            join_lines("Una novela\n\n  de dragones  \n\x0c"),
            "Una novela de dragones"
        );
        assert_eq!(join_lines("\n\n"), "");
    }

    #[tokio::test]
    async fn test_missing_binary_is_tool_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("cover.png");
        std::fs::write(&image, b"not really a png").unwrap();

        let ocr = TesseractOcr::new("libris-no-such-ocr-binary", "spa");
        let err = ocr.extract_text(&image).await.unwrap_err();
        assert!(matches!(err, LibrisError::ToolNotFound(_)));
    }

    #[tokio::test]
    async fn test_rejects_unsupported_extension() {
        let ocr = TesseractOcr::default();
        let err = ocr.extract_text(Path::new("scan.bmp")).await.unwrap_err();
        assert!(matches!(err, LibrisError::UnsupportedFormat(_)));
    }
}
