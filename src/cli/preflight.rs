//! Pre-flight checks before operations that call external services.
//!
//! Validates that required tools and API keys are available before starting
//! work that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{LibrisError, Result};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Text recommendations need the generation API key.
    RecommendText,
    /// Image recommendations also need the OCR tool.
    RecommendImage,
    /// Audio recommendations also need the speech API key.
    RecommendAudio,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::RecommendText => {
            check_api_key(&settings.generation.api_key_env)?;
        }
        Operation::RecommendImage => {
            check_api_key(&settings.generation.api_key_env)?;
            check_tool(&settings.ocr.command)?;
        }
        Operation::RecommendAudio => {
            check_api_key(&settings.generation.api_key_env)?;
            check_api_key(&settings.speech.api_key_env)?;
        }
    }
    Ok(())
}

/// Check if an API key environment variable is set and non-empty.
fn check_api_key(env_var: &str) -> Result<()> {
    match std::env::var(env_var) {
        Ok(key) if !key.trim().is_empty() => Ok(()),
        Ok(_) => Err(LibrisError::Config(format!(
            "{} is empty. Set it in your environment or a .env file.",
            env_var
        ))),
        Err(_) => Err(LibrisError::Config(format!(
            "{} not set. Set it in your environment or a .env file.",
            env_var
        ))),
    }
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(LibrisError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(LibrisError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(LibrisError::ToolNotFound(format!("{}: {}", name, e))),
    }
}
