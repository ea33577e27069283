//! Request processing: validate, pre-classify, prompt, generate.
//!
//! Failures of the generation call never hide the genre: the caller always
//! gets the genre back together with either the recommendation text or a
//! message describing what went wrong.

mod validation;

pub use validation::{validate_input, Rejection, MIN_INPUT_CHARS};

use crate::classifier::GenreClassifier;
use crate::config::{ClassifierSettings, Prompts};
use crate::generation::Generator;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// What the generation service returned.
#[derive(Debug, Clone, PartialEq)]
pub enum Advice {
    /// Recommendation text.
    Generated(String),
    /// The service answered with no text.
    Empty,
    /// The call failed.
    Failed(String),
}

impl Advice {
    pub fn is_generated(&self) -> bool {
        matches!(self, Advice::Generated(_))
    }
}

impl std::fmt::Display for Advice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Advice::Generated(text) => write!(f, "{}", text),
            Advice::Empty => write!(f, "Sorry, the AI could not generate a response right now."),
            Advice::Failed(err) => write!(f, "Connection error with the generation API: {}", err),
        }
    }
}

/// Genre label plus recommendation for one description.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub genre: String,
    pub advice: Advice,
}

/// Combines the local classifier with the generation service.
pub struct Recommender {
    classifier: Option<GenreClassifier>,
    generator: Arc<dyn Generator>,
    prompts: Prompts,
    fallback_genre: String,
    unknown_genre: String,
}

impl Recommender {
    /// Create a recommender. `classifier` may be `None` when no model has been trained.
    pub fn new(classifier: Option<GenreClassifier>, generator: Arc<dyn Generator>) -> Self {
        let defaults = ClassifierSettings::default();
        Self {
            classifier,
            generator,
            prompts: Prompts::default(),
            fallback_genre: defaults.fallback_genre,
            unknown_genre: defaults.unknown_genre,
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Set the labels used when no model is loaded or prediction fails.
    pub fn with_genre_labels(mut self, fallback: &str, unknown: &str) -> Self {
        self.fallback_genre = fallback.to_string();
        self.unknown_genre = unknown.to_string();
        self
    }

    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    /// Genre for a description, falling back when there is no usable model.
    pub fn classify(&self, text: &str) -> String {
        match &self.classifier {
            None => self.fallback_genre.clone(),
            Some(classifier) => match classifier.predict(text) {
                Ok(genre) => genre,
                Err(e) => {
                    warn!("Genre prediction failed: {}", e);
                    self.unknown_genre.clone()
                }
            },
        }
    }

    /// Render the recommendation prompt.
    pub fn build_prompt(&self, text: &str, genre: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("input".to_string(), text.to_string());
        vars.insert("genre".to_string(), genre.to_string());
        self.prompts
            .render_with_custom(&self.prompts.recommend.user, &vars)
    }

    /// Process one description.
    ///
    /// Invalid input is rejected before any classification or network call.
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn recommend(&self, text: &str) -> Result<Recommendation, Rejection> {
        validate_input(text)?;

        let genre = self.classify(text);
        info!("Pre-classified genre: {}", genre);

        let prompt = self.build_prompt(text, &genre);
        debug!("Requesting recommendations from {}", self.generator.model());

        let advice = match self.generator.generate(&prompt).await {
            Ok(Some(answer)) => Advice::Generated(answer),
            Ok(None) => Advice::Empty,
            Err(e) => {
                warn!("Generation failed: {}", e);
                Advice::Failed(e.to_string())
            }
        };

        Ok(Recommendation { genre, advice })
    }
}
