//! Libris - Genre detection and book recommendations
//!
//! A CLI tool that reads what you like to read (typed, photographed, or
//! spoken), guesses the literary genre with a small local classifier, and
//! asks a large-language model for three matching books.
//!
//! # Architecture
//!
//! - `classifier` - TF-IDF + multinomial Naive Bayes genre classifier and its training data
//! - `recommend` - Input validation and the classify-then-generate flow
//! - `generation` - Chat-completions client for recommendation text
//! - `ocr` - Text extraction from images
//! - `speech` - Speech-to-text for voice notes
//! - `orchestrator` - Wires the three input kinds to the recommender
//! - `config` - Settings and prompt templates
//!
//! # Example
//!
//! ```rust,no_run
//! use libris::config::Settings;
//! use libris::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let outcome = orchestrator.from_text("naves espaciales y robots").await;
//!     if let Ok(rec) = outcome.result {
//!         println!("{}: {}", rec.genre, rec.advice);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod ocr;
pub mod openai;
pub mod orchestrator;
pub mod recommend;
pub mod speech;

pub use error::{LibrisError, Result};
