use demo_backend::{app, store::LinkStore, AppState};
use std::sync::Arc;

/// Serve the real router on an ephemeral port and return its base URL.
pub async fn spawn_server() -> String {
    let state = Arc::new(AppState {
        links: LinkStore::new(),
        monitoring: None,
        shipper: None,
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");

    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.expect("serve test app");
    });

    format!("http://{}", addr)
}
