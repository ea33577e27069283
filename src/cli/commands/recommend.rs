//! Recommend command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::{Output, RecommendInput};
use crate::config::Settings;
use crate::error::LibrisError;
use crate::ocr;
use crate::orchestrator::{InputKind, Orchestrator, Outcome};
use anyhow::Result;
use std::path::PathBuf;

/// Run the recommend command for one kind of input.
pub async fn run_recommend(input: &RecommendInput, settings: Settings) -> Result<()> {
    let operation = match input {
        RecommendInput::Text { .. } => Operation::RecommendText,
        RecommendInput::Image { .. } => Operation::RecommendImage,
        RecommendInput::Audio { .. } => Operation::RecommendAudio,
    };

    if let Err(e) = preflight::check(operation, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'libris doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let preview_chars = settings.ocr.preview_chars;
    let orchestrator = Orchestrator::new(settings)?;

    if !orchestrator.has_classifier() {
        Output::warning("No trained genre model found. Run 'libris train' first.");
    }

    let outcome = match input {
        RecommendInput::Text { text } => {
            let spinner = Output::spinner("Analysing your request...");
            let outcome = orchestrator.from_text(text).await;
            spinner.finish_and_clear();
            Ok(outcome)
        }
        RecommendInput::Image { path } => {
            let spinner = Output::spinner("Extracting text from the image...");
            let result = orchestrator.from_image(&PathBuf::from(path)).await;
            spinner.finish_and_clear();
            result
        }
        RecommendInput::Audio { path } => {
            let spinner = Output::spinner("Transcribing audio...");
            let result = orchestrator.from_audio(&PathBuf::from(path)).await;
            spinner.finish_and_clear();
            result
        }
    };

    match outcome {
        Ok(outcome) => {
            report(&outcome, preview_chars);
            Ok(())
        }
        Err(e @ (LibrisError::NoTextDetected | LibrisError::NoSpeechDetected)) => {
            Output::warning(&e.to_string());
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Failed to process {}: {}", input_name(input), e));
            Err(e.into())
        }
    }
}

fn input_name(input: &RecommendInput) -> &'static str {
    match input {
        RecommendInput::Text { .. } => "text",
        RecommendInput::Image { .. } => "image",
        RecommendInput::Audio { .. } => "audio",
    }
}

fn report(outcome: &Outcome, preview_chars: usize) {
    match (&outcome.extracted_text, outcome.kind) {
        (Some(text), InputKind::Audio) => Output::info(&format!("You said: {}", text)),
        (Some(text), _) => Output::info(&format!(
            "Detected text: {}",
            ocr::preview(text, preview_chars)
        )),
        (None, _) => {}
    }

    match &outcome.result {
        Ok(rec) => Output::recommendation(rec),
        Err(rejection) => Output::warning(&rejection.to_string()),
    }
}
