//! amprelay gateway binary.
//!
//! - `GET /config.json` : per-viewer amp-analytics config (AMP CORS checked)
//! - `GET /analytics`   : pageview sink
//! - `/healthz`, `/readyz`, `/metrics`

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use amprelay_core::error::{AmpRelayError, Result};
use amprelay_gateway::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "amprelay-gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = config::config_path();
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.gateway.listen_addr()?;

    let state = AppState::new(cfg)?;
    let metrics = state.metrics();
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "amprelay-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| AmpRelayError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            metrics.set_draining();
        })
        .await
        .map_err(|e| AmpRelayError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
    tracing::info!("signal received, starting graceful shutdown");
}
