//! HTTP server command handler

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::signal;
use tracing::info;

use crate::api;
use crate::config::Config;

pub async fn cmd_serve(
    config: &Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    let state = api::create_app_state(config, prometheus_handle);
    let app = api::router(state);

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Facility API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
