//! Reference Analysis Backend
//!
//! Self-hosted implementation of the three analysis services so the CLI
//! works end to end without an external deployment.
//!
//! Routes:
//! - `GET /` health message
//! - `POST /summarize` `{log_text}` -> `{summary}`
//! - `POST /classify` `{log_text}` -> `{classification}`
//! - `POST /chat` `{message}` -> `{response}`

pub mod chatbot;
pub mod classifier;
pub mod summarizer;

use std::future::Future;
use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use log_insight_core::Classification;

use crate::utils::error::{AppError, AppResult};

pub use chatbot::chatbot_response;
pub use classifier::classify_log;
pub use summarizer::summarize_log;

/// Body of `/summarize` and `/classify`. A missing field reads as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LogTextBody {
    pub log_text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChatBody {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StatusReply {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SummaryReply {
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct ClassificationReply {
    pub classification: Classification,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub response: String,
}

/// Build the backend router with CORS and request tracing.
pub fn router() -> Router {
    Router::new()
        .route("/", get(home))
        .route("/summarize", post(summarize))
        .route("/classify", post(classify))
        .route("/chat", post(chat))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn home() -> Json<StatusReply> {
    Json(StatusReply {
        message: "Backend is running",
    })
}

async fn summarize(Json(body): Json<LogTextBody>) -> Json<SummaryReply> {
    let summary = summarize_log(&body.log_text);
    tracing::debug!(
        input_chars = body.log_text.len(),
        summary_chars = summary.len(),
        "summarized log text"
    );
    Json(SummaryReply { summary })
}

async fn classify(Json(body): Json<LogTextBody>) -> Json<ClassificationReply> {
    let classification = classify_log(&body.log_text);
    tracing::debug!(severity = %classification.severity, "classified log text");
    Json(ClassificationReply { classification })
}

async fn chat(Json(body): Json<ChatBody>) -> Json<ChatReply> {
    Json(ChatReply {
        response: chatbot_response(&body.message).to_string(),
    })
}

/// Bind `host:port`.
pub async fn bind(host: &str, port: u16) -> AppResult<TcpListener> {
    let listener = TcpListener::bind((host, port)).await.map_err(|e| {
        AppError::config(format!("Failed to bind backend to {}:{}: {}", host, port, e))
    })?;
    Ok(listener)
}

/// Serve the backend on an already bound listener until `shutdown` resolves.
pub async fn serve_on<F>(listener: TcpListener, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = listener.local_addr()?;
    tracing::info!(%addr, "analysis backend listening");
    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!(%addr, "analysis backend stopped");
    Ok(())
}

/// Bind `host:port` and serve until Ctrl-C.
pub async fn serve(host: &str, port: u16) -> AppResult<()> {
    let listener = bind(host, port).await?;
    serve_on(listener, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    })
    .await
}
