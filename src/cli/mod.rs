//! CLI module for Libris.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Libris - Genre detection and book recommendations
///
/// Describe what you like to read (as text, a photo of a blurb, or a voice
/// note) and get a genre guess plus three book recommendations.
#[derive(Parser, Debug)]
#[command(name = "libris")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the genre classifier and save it
    Train {
        /// CSV file with text,genre columns (defaults to the built-in dataset)
        #[arg(short, long)]
        dataset: Option<String>,

        /// Where to write the model (defaults to classifier.model_path)
        #[arg(short, long)]
        output: Option<String>,

        /// Naive Bayes smoothing (defaults to classifier.alpha)
        #[arg(long)]
        alpha: Option<f64>,
    },

    /// Predict the genre of a description with the local classifier only
    Classify {
        /// Description of what you like to read
        text: String,
    },

    /// Get a genre and book recommendations
    Recommend {
        #[command(subcommand)]
        input: RecommendInput,
    },

    /// Start HTTP API server for integration with other systems
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecommendInput {
    /// Typed description
    Text {
        /// What do you feel like reading?
        text: String,
    },

    /// Photo of a back cover or synopsis (jpg, jpeg, png)
    Image {
        /// Image file
        path: String,
    },

    /// Voice note describing your tastes (wav, mp3, m4a)
    Audio {
        /// Audio file
        path: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
