//! Classify command implementation.

use crate::classifier::GenreClassifier;
use crate::cli::Output;
use crate::config::Settings;
use crate::recommend::validate_input;
use anyhow::Result;

/// Run the classify command.
pub fn run_classify(text: &str, settings: &Settings) -> Result<()> {
    if let Err(rejection) = validate_input(text) {
        Output::warning(&rejection.to_string());
        return Ok(());
    }

    let classifier = match GenreClassifier::load(&settings.model_path()) {
        Ok(c) => c,
        Err(e) => {
            Output::error(&e.to_string());
            return Err(e.into());
        }
    };

    let scores = classifier.predict_proba(text)?;
    if let Some(best) = scores.first() {
        Output::success(&format!("Detected genre: {}", best.genre));
    }

    Output::header("Probabilities");
    for score in &scores {
        Output::genre_score(score);
    }

    Ok(())
}
