//! Configuration settings for Libris.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub classifier: ClassifierSettings,
    pub generation: GenerationSettings,
    pub ocr: OcrSettings,
    pub speech: SpeechSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Directory for temporary files (uploaded images in serve mode).
    pub temp_dir: String,
    /// Language of the reader's input (ISO 639-1).
    pub language: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.libris".to_string(),
            temp_dir: "/tmp/libris".to_string(),
            language: "es".to_string(),
        }
    }
}

/// Genre classifier settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Where the trained model is written and loaded from.
    pub model_path: String,
    /// Genre reported when no trained model is available.
    pub fallback_genre: String,
    /// Genre reported when prediction fails.
    pub unknown_genre: String,
    /// Additive smoothing for the Naive Bayes classifier.
    pub alpha: f64,
    /// Smallest word n-gram used as a feature.
    pub ngram_min: usize,
    /// Largest word n-gram used as a feature.
    pub ngram_max: usize,
    /// Words ignored during vectorization.
    pub stop_words: Vec<String>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            model_path: "~/.libris/genre_model.json".to_string(),
            fallback_genre: "Literatura General".to_string(),
            unknown_genre: "Desconocido".to_string(),
            alpha: 0.1,
            ngram_min: 1,
            ngram_max: 2,
            stop_words: ["de", "la", "el", "un", "una", "y", "en", "con"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Recommendation generation (LLM) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Base URL of an OpenAI-compatible chat completions API.
    pub api_base: String,
    /// Model used to write recommendations.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key_env: "API_KEY".to_string(),
            timeout_seconds: 300,
            temperature: 0.7,
        }
    }
}

/// OCR settings for photographed book descriptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// OCR executable.
    pub command: String,
    /// OCR language pack (tesseract naming).
    pub language: String,
    /// Number of characters of extracted text echoed back to the user.
    pub preview_chars: usize,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            command: "tesseract".to_string(),
            language: "spa".to_string(),
            preview_chars: 200,
        }
    }
}

/// Speech-to-text settings for spoken descriptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    /// Listen endpoint of the speech-to-text API.
    pub endpoint: String,
    /// Speech model.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Ask the API for punctuation and formatting.
    pub smart_format: bool,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.deepgram.com/v1/listen".to_string(),
            model: "nova-2".to_string(),
            api_key_env: "DEEPGRAM_API_KEY".to_string(),
            smart_format: true,
            timeout_seconds: 60,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::LibrisError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("libris")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded temp directory path.
    pub fn temp_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.temp_dir)
    }

    /// Get the expanded classifier model path.
    pub fn model_path(&self) -> PathBuf {
        Self::expand_path(&self.classifier.model_path)
    }

    /// Read an API key from the named environment variable.
    ///
    /// Empty values count as missing.
    pub fn api_key(env_var: &str) -> Option<String> {
        std::env::var(env_var).ok().filter(|k| !k.trim().is_empty())
    }
}
