//! Libris CLI entry point.

use anyhow::Result;
use clap::Parser;
use libris::cli::{commands, Cli, Commands};
use libris::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // API keys may live in a .env file next to where the tool is run
    let dotenv_loaded = dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("libris={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Some(path) = dotenv_loaded {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&Settings::expand_path(path)))?,
        None => Settings::load()?,
    };

    std::fs::create_dir_all(settings.data_dir())?;

    // Execute command
    match &cli.command {
        Commands::Train {
            dataset,
            output,
            alpha,
        } => {
            commands::run_train(dataset.as_deref(), output.as_deref(), *alpha, &settings)?;
        }

        Commands::Classify { text } => {
            commands::run_classify(text, &settings)?;
        }

        Commands::Recommend { input } => {
            commands::run_recommend(input, settings).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host, *port, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, &settings, cli.config.as_deref())?;
        }
    }

    Ok(())
}
