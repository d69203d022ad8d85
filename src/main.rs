use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use geodocs::app::{build_router, AppState};
use geodocs::config::{AppConfig, StoreBackend};
use geodocs::db::memory::InMemoryDocumentRepository;
use geodocs::db::repository::{DocumentRepository, MongoDocumentRepository};

/// Document indexing service with keyword search and proximity ranking.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind, overriding the configuration.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .init();

    tracing::info!("Starting geodocs server...");

    let document_repo: Arc<dyn DocumentRepository> = match config.store {
        StoreBackend::Mongo => {
            let mongo_client = mongodb::Client::with_uri_str(&config.mongodb_uri).await?;
            let mongo_db = mongo_client.database(&config.mongodb_database);
            let repo = MongoDocumentRepository::new(&mongo_db, &config.collection);

            if let Err(e) = repo.ensure_indexes().await {
                tracing::warn!("Could not create indexes: {e}");
            }

            tracing::info!(
                "Connected to MongoDB at {} (database {})",
                config.mongodb_uri,
                config.mongodb_database
            );
            Arc::new(repo)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; documents are lost on shutdown");
            Arc::new(InMemoryDocumentRepository::new())
        }
    };

    let app = build_router(AppState::new(document_repo, config.search_timeout()));

    tracing::info!("Listening on http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
