use banking_assistant::{
    api::start_server, AssistantConfig, LocalResponder, OpenAiResponder, ResponseRouter,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AssistantConfig::from_env()?;

    if config.credential.is_none() {
        warn!("⚠️  OPENAI_API_KEY not set, answering in fallback mode");
    }

    info!("🚀 Banking Assistant - API Server");
    info!("📍 Port: {}", config.port);
    info!("🤖 Mode: {} (model: {})", config.mode(), config.remote.model);

    let router = Arc::new(ResponseRouter::new(
        LocalResponder::default(),
        Arc::new(OpenAiResponder::new(&config.remote)?),
    ));

    info!("📡 Starting API server...");

    start_server(router, config.credential, config.port).await?;

    Ok(())
}
