pub mod api;
pub mod errors;
pub mod monitoring;
pub mod shipper;
pub mod store;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub struct AppState {
    pub links: store::LinkStore,
    pub monitoring: Option<monitoring::MonitoringLayer>,
    pub shipper: Option<shipper::LogShipper>,
}

/// Route table for the backend. Middleware layers are added by the
/// binary; tests serve this router directly.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(api::greeting))
        // Demo user API
        .route("/api/users", get(api::list_users).post(api::create_user))
        // URL shortener
        .route("/shorturls", post(api::create_short_url))
        .route("/shorturls/:shortcode", get(api::link_stats))
        .route("/:shortcode", get(api::redirect_short_url))
        .with_state(state)
}
