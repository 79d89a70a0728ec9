//! Shared helpers for integration tests

use record_service::{api, config::ServiceKind, state::AppState};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Serve `service` on an ephemeral port, backed by its document in `dir`
///
/// Returns the base URL.
pub async fn spawn_server(service: ServiceKind, dir: &Path) -> String {
    let state = AppState::open(service, dir.join(service.document_name()))
        .expect("Failed to open document store");
    let app = api::router(service, Arc::new(RwLock::new(state)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    format!("http://{}", addr)
}
