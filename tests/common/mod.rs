//! Shared harness for integration tests: an in-process stub backend and a
//! client wired to a throwaway session store.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use parkline::{ApiClient, SessionStore};
use tempfile::TempDir;

/// Serve `app` on an ephemeral local port.
pub async fn spawn_backend(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A client against `addr` with a fresh store. The TempDir keeps the store's
/// backing directory alive for the duration of the test.
pub fn client_with_store(addr: SocketAddr) -> (ApiClient, Arc<SessionStore>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SessionStore::open(dir.path()).unwrap());
    let client = ApiClient::new(format!("http://{addr}"), store.clone());
    (client, store, dir)
}
