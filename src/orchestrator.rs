//! Request orchestrator for Libris.
//!
//! Turns each kind of input (text, image, audio) into a description and hands
//! it to the recommender.

use crate::classifier::GenreClassifier;
use crate::config::{Prompts, Settings};
use crate::error::{LibrisError, Result};
use crate::generation::{ChatGenerator, Generator};
use crate::ocr::{self, OcrEngine, TesseractOcr};
use crate::recommend::{Recommendation, Recommender, Rejection};
use crate::speech::{self, DeepgramTranscriber, SpeechToText};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Where a description came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Image,
    Audio,
}

/// Result of processing one input.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub kind: InputKind,
    /// Text read from the image or transcribed from the audio.
    pub extracted_text: Option<String>,
    pub result: std::result::Result<Recommendation, Rejection>,
}

/// The main orchestrator for the Libris pipeline.
pub struct Orchestrator {
    settings: Settings,
    recommender: Recommender,
    ocr: Arc<dyn OcrEngine>,
    speech: Option<Arc<dyn SpeechToText>>,
    temp_dir: PathBuf,
}

impl Orchestrator {
    /// Create an orchestrator from settings.
    ///
    /// Fails when the generation API key is missing. A missing classifier
    /// model or speech API key only degrades the affected feature.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let generator: Arc<dyn Generator> = Arc::new(
            ChatGenerator::from_settings(&settings.generation)?
                .with_system_prompt(&prompts.recommend.system),
        );

        let classifier = match GenreClassifier::load(&settings.model_path()) {
            Ok(c) => {
                info!("Loaded classifier with {} genres", c.genres().len());
                Some(c)
            }
            Err(e) => {
                warn!("Classifier unavailable: {}", e);
                None
            }
        };

        let recommender = Recommender::new(classifier, generator)
            .with_prompts(prompts)
            .with_genre_labels(
                &settings.classifier.fallback_genre,
                &settings.classifier.unknown_genre,
            );

        let ocr: Arc<dyn OcrEngine> = Arc::new(TesseractOcr::from_settings(&settings.ocr));

        let speech: Option<Arc<dyn SpeechToText>> =
            match DeepgramTranscriber::from_settings(&settings.speech, &settings.general.language) {
                Ok(t) => Some(Arc::new(t)),
                Err(e) => {
                    warn!("Speech-to-text unavailable: {}", e);
                    None
                }
            };

        Self::with_components(settings, recommender, ocr, speech)
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        recommender: Recommender,
        ocr: Arc<dyn OcrEngine>,
        speech: Option<Arc<dyn SpeechToText>>,
    ) -> Result<Self> {
        let temp_dir = settings.temp_dir();
        std::fs::create_dir_all(&temp_dir)?;

        Ok(Self {
            settings,
            recommender,
            ocr,
            speech,
            temp_dir,
        })
    }

    /// Whether a trained genre classifier is loaded.
    pub fn has_classifier(&self) -> bool {
        self.recommender.has_classifier()
    }

    /// Whether audio input can be processed.
    pub fn has_speech(&self) -> bool {
        self.speech.is_some()
    }

    /// Recommend from a typed description.
    pub async fn from_text(&self, text: &str) -> Outcome {
        Outcome {
            kind: InputKind::Text,
            extracted_text: None,
            result: self.recommender.recommend(text).await,
        }
    }

    /// Recommend from a photographed description.
    #[instrument(skip(self), fields(image = %path.display()))]
    pub async fn from_image(&self, path: &Path) -> Result<Outcome> {
        debug!("Extracting text with {}", self.ocr.name());
        let text = self.ocr.extract_text(path).await?;
        if text.trim().is_empty() {
            return Err(LibrisError::NoTextDetected);
        }

        info!("OCR extracted {} chars", text.len());
        Ok(Outcome {
            kind: InputKind::Image,
            result: self.recommender.recommend(&text).await,
            extracted_text: Some(text),
        })
    }

    /// Recommend from uploaded image bytes of the given MIME type.
    pub async fn from_image_bytes(&self, bytes: &[u8], mime: &str) -> Result<Outcome> {
        let ext = ocr::extension_for_mime(mime)
            .ok_or_else(|| LibrisError::UnsupportedFormat(mime.to_string()))?;

        let file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&format!(".{}", ext))
            .tempfile_in(&self.temp_dir)?;
        tokio::fs::write(file.path(), bytes).await?;

        self.from_image(file.path()).await
    }

    /// Recommend from a spoken description stored in a file.
    #[instrument(skip(self), fields(audio = %path.display()))]
    pub async fn from_audio(&self, path: &Path) -> Result<Outcome> {
        let speech = self.speech_client()?;
        let transcript = speech.transcribe_file(path).await?;
        self.finish_audio(transcript).await
    }

    /// Recommend from uploaded audio bytes of the given MIME type.
    pub async fn from_audio_bytes(&self, bytes: Vec<u8>, content_type: &str) -> Result<Outcome> {
        let ext = speech::extension_for_mime(content_type).ok_or_else(|| {
            LibrisError::UnsupportedFormat(format!(
                "{} (expected audio/wav, audio/mpeg or audio/mp4)",
                content_type
            ))
        })?;
        let client = self.speech_client()?;
        let transcript = client
            .transcribe(bytes, &speech::content_type_for_extension(ext))
            .await?;
        self.finish_audio(transcript).await
    }

    fn speech_client(&self) -> Result<&Arc<dyn SpeechToText>> {
        self.speech.as_ref().ok_or_else(|| {
            LibrisError::Config(format!(
                "speech-to-text API key missing ({})",
                self.settings.speech.api_key_env
            ))
        })
    }

    async fn finish_audio(&self, transcript: String) -> Result<Outcome> {
        if transcript.trim().is_empty() {
            return Err(LibrisError::NoSpeechDetected);
        }

        Ok(Outcome {
            kind: InputKind::Audio,
            result: self.recommender.recommend(&transcript).await,
            extracted_text: Some(transcript),
        })
    }
}
