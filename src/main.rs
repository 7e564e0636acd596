use demo_backend::{
    errors::ServerResult,
    monitoring::{self, MonitoringLayer},
    shipper::LogShipper,
    store::LinkStore,
    AppState,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[tokio::main]
async fn main() -> ServerResult<()> {
    // Check if monitoring mode is enabled
    let monitoring_enabled = std::env::var("MONITORING").unwrap_or_default() == "true";

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("demo_backend=debug,tower_http=debug")
        .init();

    // Print startup banner if monitoring is enabled
    if monitoring_enabled {
        use colored::*;
        tracing::info!("{}", "🚀 Demo Backend with Monitoring".bold().cyan());
        tracing::info!("{}", "===============================".cyan());
        tracing::info!("");
    }

    // Set up monitoring if enabled
    let monitoring_layer = if monitoring_enabled {
        let (tx, rx) = tokio::sync::mpsc::channel(1000);
        monitoring::spawn_monitoring_display(rx).await;
        Some(MonitoringLayer::new(tx))
    } else {
        None
    };

    // Remote log shipping, only when the log API is configured
    let log_shipper = LogShipper::from_env();
    if log_shipper.is_none() {
        tracing::debug!("LOG_API_URL/LOG_API_TOKEN not set, remote log shipping disabled");
    }

    // Application state
    let app_state = Arc::new(AppState {
        links: LinkStore::new(),
        monitoring: monitoring_layer,
        shipper: log_shipper,
    });

    // Build router
    let app = demo_backend::app(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    tracing::info!("Starting demo backend on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%e, addr = %addr);
            return Ok(());
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(%e, addr = %addr);
    }

    Ok(())
}
