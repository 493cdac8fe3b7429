mod config;
mod errors;
mod llm_client;
mod pipeline;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::OllamaClient;
use crate::pipeline::runner::run_pipeline;
use crate::pipeline::steps::{ProfileSource, StepContext};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (.env is read here if present)
    let config = Config::from_env();

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Referral v{}", env!("CARGO_PKG_VERSION"));

    let llm = OllamaClient::new(config.ollama_host.clone())
        .context("Failed to build LLM client")?;
    info!(
        "LLM client initialized (model: {}, host: {})",
        llm_client::MODEL,
        config.ollama_host
    );

    let profiles = ProfileSource {
        dir: config.profiles_dir.clone(),
        candidate_file: config.candidate_profile.clone(),
        receiver_file: config.receiver_profile.clone(),
    };
    let ctx = StepContext {
        profiles: &profiles,
        model: &llm,
    };

    let mut stdout = std::io::stdout().lock();
    run_pipeline(&ctx, &mut stdout).await?;

    info!("Referral pitch written");
    Ok(())
}
