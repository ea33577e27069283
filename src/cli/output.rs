//! CLI output formatting utilities.

use crate::classifier::GenreScore;
use crate::recommend::{Advice, Recommendation};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a genre with its probability bar.
    pub fn genre_score(score: &GenreScore) {
        let filled = (score.probability * 20.0).round() as usize;
        println!(
            "  {:<18} {}{} {:>5.1}%",
            score.genre,
            style("#".repeat(filled)).cyan(),
            style("-".repeat(20 - filled.min(20))).dim(),
            score.probability * 100.0
        );
    }

    /// Print a recommendation result.
    pub fn recommendation(rec: &Recommendation) {
        Self::success(&format!("Detected genre: {}", style(&rec.genre).bold()));
        println!();
        match &rec.advice {
            Advice::Generated(text) => println!("{}\n", text),
            other => Self::warning(&other.to_string()),
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}
