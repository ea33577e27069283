//! Train command implementation.

use crate::classifier::{Dataset, GenreClassifier, TrainingParams};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::{Context, Result};

/// Run the train command.
pub fn run_train(
    dataset: Option<&str>,
    output: Option<&str>,
    alpha: Option<f64>,
    settings: &Settings,
) -> Result<()> {
    let dataset = match dataset {
        Some(path) => {
            let path = Settings::expand_path(path);
            Dataset::from_csv(&path)
                .with_context(|| format!("Failed to load dataset {}", path.display()))?
        }
        None => Dataset::builtin(),
    };

    let mut params = TrainingParams::from(&settings.classifier);
    if let Some(alpha) = alpha {
        params.alpha = alpha;
    }

    let output = output
        .map(Settings::expand_path)
        .unwrap_or_else(|| settings.model_path());

    Output::info(&format!(
        "Training genre classifier on {} samples ({} genres)...",
        dataset.len(),
        dataset.genres().len()
    ));

    let classifier = GenreClassifier::train(&dataset, &params)?;
    classifier.save(&output)?;

    Output::success(&format!("Model saved to {}", output.display()));
    Output::kv("Genres", &classifier.genres().join(", "));
    Output::kv("Features", &classifier.num_features().to_string());
    Output::kv("Alpha", &params.alpha.to_string());

    Ok(())
}
