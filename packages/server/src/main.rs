use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use common::storage::FilesystemFileStore;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::config::AppConfig;
use server::database::init_db;
use server::fetcher::ApodClient;
use server::repository::DbPictureRepository;
use server::service::{PictureService, PictureSettings};
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = init_db(&config.database)
        .await
        .context("failed to initialize database")?;

    let files = FilesystemFileStore::new(&config.storage.pictures_dir)
        .await
        .with_context(|| {
            format!(
                "failed to prepare picture directory {}",
                config.storage.pictures_dir.display()
            )
        })?;
    let source = ApodClient::new(std::time::Duration::from_secs(
        config.apod.request_timeout_secs,
    ))?;

    let pictures = PictureService::new(
        Arc::new(DbPictureRepository::new(db.clone())),
        Arc::new(files),
        Arc::new(source),
        PictureSettings::from_config(&config)?,
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server address")?;

    let state = AppState {
        config: Arc::new(config),
        pictures: Arc::new(pictures),
    };
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    db.close().await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
