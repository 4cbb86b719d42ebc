use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use backend_lib::{
    config::Settings,
    http_router,
    storage::FlatFileUserStore,
    AppState,
};

/// Credential authentication service
#[derive(Parser, Debug)]
#[command(name = "credgate", version)]
struct Args {
    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the configured bind address
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load_from(&args.config)?;
    if let Some(bind) = args.bind {
        settings.bind_addr = bind;
    }

    // Initialize tracing; RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone())),
        )
        .init();

    // Create the user store
    let users = Arc::new(FlatFileUserStore::new(&settings.data_dir)?);

    // Create application state
    let bind_addr = settings.bind_addr;
    let state = Arc::new(AppState::new(users, settings));

    // Create the router
    let app = http_router::create_router(state);

    // Start the server
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(%bind_addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
