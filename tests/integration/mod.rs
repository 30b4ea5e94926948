//! Integration Tests Module
//!
//! Drives the HTTP service clients, the pipeline and the chat session against
//! real HTTP servers bound to ephemeral ports: the reference backend for the
//! happy paths and small stub routers for failure modes.

// Clients against the reference backend
mod backend_test;

// Retry and malformed-response handling against stub servers
mod failure_test;

// Pipeline and chat session wired through AppState
mod end_to_end_test;

use std::net::SocketAddr;

use tokio::net::TcpListener;

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn spawn_router(router: axum::Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Start the reference analysis backend and return its base URL.
pub async fn spawn_reference_backend() -> String {
    let listener = log_insight::services::backend::bind("127.0.0.1", 0)
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        log_insight::services::backend::serve_on(listener, std::future::pending())
            .await
            .unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
