/// Storydrop Server - Static page and runtime configuration server
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use storydrop_server::{build_router, AppState, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "storydrop-server")]
#[command(about = "Storydrop story player server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Print the effective configuration and exit
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storydrop_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => serve().await?,
        Commands::CheckConfig => check_config()?,
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    // Load configuration; a missing asset root is fatal at startup, not
    // at first request.
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Storydrop Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    tracing::info!("Assets: {}", config.assets.root.display());
    if config.catalog.url.is_empty() {
        tracing::warn!("No catalog configured; clients will fall back to demo content");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = Arc::new(AppState::new(config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn check_config() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    config.validate()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
