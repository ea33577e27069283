//! Genre classifier: TF-IDF features fed into multinomial Naive Bayes.
//!
//! The fitted pipeline is persisted as a single JSON file so the recommender
//! can load it at startup without retraining.

mod dataset;
mod naive_bayes;
pub mod text;
mod tfidf;

pub use dataset::{Dataset, Sample};
pub use naive_bayes::MultinomialNb;
pub use text::Analyzer;
pub use tfidf::TfidfVectorizer;

use crate::config::ClassifierSettings;
use crate::error::{LibrisError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Version of the on-disk model format.
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// Hyperparameters for training.
#[derive(Debug, Clone)]
pub struct TrainingParams {
    pub alpha: f64,
    pub ngram_min: usize,
    pub ngram_max: usize,
    pub stop_words: Vec<String>,
}

impl From<&ClassifierSettings> for TrainingParams {
    fn from(settings: &ClassifierSettings) -> Self {
        Self {
            alpha: settings.alpha,
            ngram_min: settings.ngram_min,
            ngram_max: settings.ngram_max,
            stop_words: settings.stop_words.clone(),
        }
    }
}

impl Default for TrainingParams {
    fn default() -> Self {
        (&ClassifierSettings::default()).into()
    }
}

/// Probability assigned to one genre.
#[derive(Debug, Clone)]
pub struct GenreScore {
    pub genre: String,
    pub probability: f64,
}

/// A trained genre classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreClassifier {
    format_version: u32,
    trained_at: DateTime<Utc>,
    num_samples: usize,
    vectorizer: TfidfVectorizer,
    model: MultinomialNb,
}

impl GenreClassifier {
    /// Fit the vectorizer and classifier on a dataset.
    #[instrument(skip(dataset, params), fields(samples = dataset.len()))]
    pub fn train(dataset: &Dataset, params: &TrainingParams) -> Result<Self> {
        if dataset.is_empty() {
            return Err(LibrisError::Dataset("dataset is empty".to_string()));
        }
        if params.ngram_min == 0 || params.ngram_min > params.ngram_max {
            return Err(LibrisError::Classifier(format!(
                "invalid n-gram range ({}, {})",
                params.ngram_min, params.ngram_max
            )));
        }

        let analyzer = Analyzer::new(params.ngram_min, params.ngram_max, &params.stop_words);
        let texts = dataset.texts();
        let vectorizer = TfidfVectorizer::fit(analyzer, &texts)?;

        let features: Vec<Vec<f64>> = texts.iter().map(|t| vectorizer.transform(t)).collect();
        let model = MultinomialNb::fit(&features, &dataset.labels(), params.alpha)?;

        info!(
            "Trained classifier: {} genres, {} features",
            model.classes().len(),
            vectorizer.num_features()
        );

        Ok(Self {
            format_version: MODEL_FORMAT_VERSION,
            trained_at: Utc::now(),
            num_samples: dataset.len(),
            vectorizer,
            model,
        })
    }

    /// Predict the most likely genre for a text.
    pub fn predict(&self, text: &str) -> Result<String> {
        let row = self.vectorizer.transform(text);
        let genre = self.model.predict(&row)?;
        debug!("Predicted genre: {}", genre);
        Ok(genre.to_string())
    }

    /// Probability of every genre, most likely first.
    pub fn predict_proba(&self, text: &str) -> Result<Vec<GenreScore>> {
        let row = self.vectorizer.transform(text);
        let proba = self.model.predict_proba(&row)?;

        let mut scores: Vec<GenreScore> = self
            .model
            .classes()
            .iter()
            .zip(proba)
            .map(|(genre, probability)| GenreScore {
                genre: genre.clone(),
                probability,
            })
            .collect();
        scores.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        Ok(scores)
    }

    pub fn genres(&self) -> &[String] {
        self.model.classes()
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn num_features(&self) -> usize {
        self.vectorizer.num_features()
    }

    /// Write the model as JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!("Saved classifier to {}", path.display());
        Ok(())
    }

    /// Load a model written by [`GenreClassifier::save`].
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LibrisError::ModelNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let classifier: GenreClassifier = serde_json::from_str(&content)?;

        if classifier.format_version != MODEL_FORMAT_VERSION {
            return Err(LibrisError::Classifier(format!(
                "unsupported model format version {} (expected {})",
                classifier.format_version, MODEL_FORMAT_VERSION
            )));
        }
        classifier.vectorizer.validate()?;
        classifier.model.validate()?;
        if classifier.vectorizer.num_features() != classifier.model.num_features() {
            return Err(LibrisError::Classifier(
                "vectorizer and model feature counts differ".to_string(),
            ));
        }

        debug!("Loaded classifier from {}", path.display());
        Ok(classifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trained() -> GenreClassifier {
        GenreClassifier::train(&Dataset::builtin(), &TrainingParams::default()).unwrap()
    }

    #[test]
    fn test_predicts_builtin_genres() {
        let classifier = trained();
        assert_eq!(
            classifier.predict("Me encantan las historias de naves espaciales y robots").unwrap(),
            "Ciencia Ficcion"
        );
        assert_eq!(
            classifier.predict("un detective investiga un asesinato").unwrap(),
            "Policial"
        );
        assert_eq!(
            classifier.predict("casa maldita con fantasmas").unwrap(),
            "Terror"
        );
        assert_eq!(classifier.predict("dragones y magia").unwrap(), "Fantasia");
    }

    #[test]
    fn test_accented_input_matches() {
        let classifier = trained();
        assert_eq!(
            classifier.predict("Una BODA romántica y mucha PASIÓN").unwrap(),
            "Romance"
        );
    }

    #[test]
    fn test_stop_words_only_falls_back_to_priors() {
        let classifier = trained();

        // The built-in dataset is balanced, so every genre has the same prior
        // and the first one in sorted order wins.
        assert_eq!(classifier.predict("de la el y").unwrap(), "Ciencia Ficcion");
        assert_eq!(classifier.predict("").unwrap(), "Ciencia Ficcion");

        let scores = classifier.predict_proba("de la el y").unwrap();
        assert!(scores
            .iter()
            .all(|s| (s.probability - 1.0 / 6.0).abs() < 1e-9));
    }

    #[test]
    fn test_proba_sorted() {
        let classifier = trained();
        let scores = classifier.predict_proba("batalla medieval del imperio").unwrap();
        assert_eq!(scores.len(), 6);
        assert_eq!(scores[0].genre, "Historica");
        assert!(scores.windows(2).all(|w| w[0].probability >= w[1].probability));
    }

    #[test]
    fn test_invalid_ngram_range() {
        let params = TrainingParams {
            ngram_min: 3,
            ngram_max: 1,
            ..Default::default()
        };
        assert!(GenreClassifier::train(&Dataset::builtin(), &params).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models").join("genre_model.json");

        let classifier = trained();
        classifier.save(&path).unwrap();
        let loaded = GenreClassifier::load(&path).unwrap();

        assert_eq!(loaded.genres(), classifier.genres());
        assert_eq!(loaded.num_samples(), 12);
        for text in ["robots en marte", "amor y besos", "huellas del culpable"] {
            assert_eq!(loaded.predict(text).unwrap(), classifier.predict(text).unwrap());
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = GenreClassifier::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, LibrisError::ModelNotFound(_)));
    }

    #[test]
    fn test_load_rejects_other_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        let mut value = serde_json::to_value(trained()).unwrap();
        value["format_version"] = serde_json::json!(99);
        std::fs::write(&path, value.to_string()).unwrap();

        assert!(matches!(
            GenreClassifier::load(&path),
            Err(LibrisError::Classifier(_))
        ));
    }
}
