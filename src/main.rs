//! Masthead HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use masthead::config::Config;
use masthead::embedding::RemoteEmbedder;
use masthead::gateway::{HandlerState, create_router_with_state};
use masthead::index::HybridTitleIndex;
use masthead::rules::{RuleSet, RuleSetError};
use masthead::store::SqliteTitleStore;
use masthead::verify::VerificationEngine;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
███╗   ███╗ █████╗ ███████╗████████╗██╗  ██╗███████╗ █████╗ ██████╗
████╗ ████║██╔══██╗██╔════╝╚══██╔══╝██║  ██║██╔════╝██╔══██╗██╔══██╗
██╔████╔██║███████║███████╗   ██║   ███████║█████╗  ███████║██║  ██║
██║╚██╔╝██║██╔══██║╚════██║   ██║   ██╔══██║██╔══╝  ██╔══██║██║  ██║
██║ ╚═╝ ██║██║  ██║███████║   ██║   ██║  ██║███████╗██║  ██║██████╔╝
╚═╝     ╚═╝╚═╝  ╚═╝╚══════╝   ╚═╝   ╚═╝  ╚═╝╚══════╝╚═╝  ╚═╝╚═════╝

        ONE TITLE. ONE MASTHEAD.
                                        AGPL-3.0
"#
    );

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        embedding_dim = config.embedding_dim,
        "Masthead starting"
    );

    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let store = SqliteTitleStore::connect(&config.db_path).await?;

    let embedder = RemoteEmbedder::new(&config.embed_url, config.embedding_dim);
    let index = Arc::new(HybridTitleIndex::new(embedder)?);

    let rules = match RuleSet::from_file(&config.rules_path) {
        Ok(rules) => rules,
        Err(RuleSetError::Missing { path }) => {
            tracing::warn!(
                path = %path.display(),
                "rules document missing, lexical checks are disabled"
            );
            RuleSet::empty()
        }
        Err(e) => return Err(e.into()),
    };

    let engine = Arc::new(VerificationEngine::new(Arc::new(rules), index, store));

    tracing::info!("Hydrating title index...");
    let summary = engine.hydrate(&config.snapshot_paths()).await?;
    tracing::info!(
        snapshot_titles = summary.snapshot_loaded,
        reconciled = summary.reconciled,
        "Hydration complete"
    );

    let state = HandlerState::new(engine);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Masthead shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
