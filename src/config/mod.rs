//! Configuration module for Libris.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, RecommendPrompts};
pub use settings::{
    ClassifierSettings, GeneralSettings, GenerationSettings, OcrSettings, PromptSettings,
    Settings, SpeechSettings,
};
