//! Temporal-KV: Main entry point

use clap::Parser;
use std::path::PathBuf;
use temporal_kv::api::create_router;
use temporal_kv::cli::{Cli, Commands};
use temporal_kv::error::Result;
use temporal_kv::store::VersionedStore;
use tokio::signal;
use tracing::info;

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn build_store(data_dir: Option<PathBuf>) -> Result<VersionedStore> {
    match data_dir {
        #[cfg(feature = "sled")]
        Some(path) => {
            info!(path = %path.display(), "using durable sled ledger");
            VersionedStore::durable(path)
        }
        #[cfg(not(feature = "sled"))]
        Some(_) => Err(temporal_kv::error::Error::Ledger(
            "durable storage requires the `sled` feature".to_string(),
        )),
        None => Ok(VersionedStore::in_memory()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            data_dir,
        } => {
            let store = build_store(data_dir)?;
            let app = create_router(store);

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!("temporal-kv listening on {addr}");

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            Ok(())
        }
    }
}
