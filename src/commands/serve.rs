//! `eventengine serve`

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::watch;

use eventengine_api::{AppState, build_app};
use eventengine_core::config::AppConfig;
use eventengine_worker::CronScheduler;

use crate::bootstrap::Components;

/// Serve the HTTP API and run the sweep schedule until Ctrl-C or SIGTERM.
pub async fn execute(config: AppConfig) -> anyhow::Result<()> {
    let config = Arc::new(config);
    let components = Components::build(&config).await?;

    let mut scheduler = CronScheduler::new().await?;
    if scheduler
        .register_reconciler(components.reconciler.clone(), &config.reconciler)
        .await?
    {
        scheduler.start().await?;
    }

    if config.reconciler.enabled && config.reconciler.run_on_startup {
        let reconciler = components.reconciler.clone();
        tokio::spawn(async move {
            if let Err(e) = reconciler.tick().await {
                tracing::error!(error = %e, "Startup expiry sweep failed");
            }
        });
    }

    let state = AppState::new(Arc::clone(&config), Arc::clone(&components.session_service));
    let app = build_app(state);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(address = %addr, "EventEngine listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    tokio::select! {
        result = async move { server.await } => result.context("Server error")?,
        _ = async move {
            let _ = shutdown_rx.wait_for(|stopping| *stopping).await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(grace_seconds = grace.as_secs(), "Connections still open after grace period, exiting");
        }
    }

    scheduler.shutdown().await?;
    components.close().await;
    tracing::info!("EventEngine stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
