use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use home_diagnosis_backend::{
    build_router,
    completion::OpenAiClient,
    config::AppConfig,
    AppState, Language,
};

#[derive(Parser, Debug)]
#[command(name = "home-diagnosis-backend")]
#[command(about = "HTTP service that diagnoses home electrical and leak issues")]
struct Cli {
    /// Host to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Default prompt language, `en` or `ar` (overrides DEFAULT_LANGUAGE)
    #[arg(short, long)]
    language: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "failed to load configuration");
        e
    })?;

    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(language) = cli.language {
        config.default_language = language.parse::<Language>()?;
    }

    config.prepare_uploads_dir().await?;

    tracing::info!(config = %serde_json::to_string(&config)?, "configuration loaded");

    let completion = Arc::new(OpenAiClient::from_config(&config));
    let bind_addr = config.bind_addr();
    let app = build_router(AppState::new(config, completion));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Backend server running on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
