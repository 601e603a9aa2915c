//! MicroLearn Gateway
//!
//! Serves `GET /generate_course` backed by an OpenAI-compatible text
//! generation API and the YouTube Data API.
//!
//! Usage:
//!   OPENAI_API_KEY=... YOUTUBE_API_KEY=... microlearn-gateway --bind-addr 0.0.0.0:8000

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};

use microlearn::llm::{OpenAiConfig, DEFAULT_MODEL, DEFAULT_OPENAI_BASE_URL};
use microlearn::server::DEFAULT_ALLOWED_ORIGINS;
use microlearn::youtube::DEFAULT_YOUTUBE_BASE_URL;
use microlearn::{router, serve, ServiceConfig};

#[derive(Parser, Debug)]
#[command(name = "microlearn-gateway")]
#[command(version)]
#[command(about = "MicroLearn course generation gateway")]
struct Args {
    #[arg(long, env = "MICROLEARN_BIND_ADDR", default_value = "127.0.0.1:8000")]
    bind_addr: String,

    /// Credential for the text generation API
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: String,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_OPENAI_BASE_URL)]
    openai_base_url: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    openai_model: String,

    /// Credential for the YouTube Data API
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    youtube_api_key: String,

    #[arg(long, env = "YOUTUBE_BASE_URL", default_value = DEFAULT_YOUTUBE_BASE_URL)]
    youtube_base_url: String,

    /// Comma-separated list of origins allowed to call the API from a browser.
    #[arg(long, env = "ALLOWED_ORIGINS", default_value = DEFAULT_ALLOWED_ORIGINS)]
    allowed_origins: String,

    #[arg(long, env = "MICROLEARN_GENERATION_TIMEOUT_SECS", default_value = "30")]
    generation_timeout_secs: u64,

    #[arg(long, env = "MICROLEARN_SEARCH_TIMEOUT_SECS", default_value = "10")]
    search_timeout_secs: u64,
}

impl Args {
    fn into_config(self) -> ServiceConfig {
        ServiceConfig {
            bind_addr: self.bind_addr,
            openai: OpenAiConfig {
                api_key: self.openai_api_key,
                model: self.openai_model,
                base_url: self.openai_base_url,
                timeout_seconds: self.generation_timeout_secs,
            },
            youtube_api_key: self.youtube_api_key,
            youtube_base_url: self.youtube_base_url,
            allowed_origins: self.allowed_origins,
            search_timeout: Duration::from_secs(self.search_timeout_secs),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("microlearn=info,microlearn_gateway=info")),
        )
        .init();

    let config = Args::parse().into_config();
    run(config).await
}

async fn run(config: ServiceConfig) -> anyhow::Result<()> {
    let state = config.build_state().context("invalid configuration")?;
    let cors = config.cors().context("invalid configuration")?;

    info!(
        "Text generation: {} ({}), video search: {}",
        config.openai.base_url, config.openai.model, config.youtube_base_url
    );

    let listener = TcpListener::bind(config.bind_addr.as_str())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    serve(listener, router(state, cors), shutdown_signal())
        .await
        .context("server error")?;

    info!("MicroLearn gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
