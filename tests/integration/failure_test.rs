//! Failure Mode Tests
//!
//! Service clients against stub servers that fail in controlled ways.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;

use log_insight_clients::{ClientConfig, HttpClassifier, HttpConversation, HttpSummarizer};
use log_insight_core::{
    Classifier, ConversationAssistant, ErrorCause, Stage, Summarizer,
};

use super::{spawn_router, unreachable_url};

/// Answers `failure` for the first `fail_first` requests, then `body`.
#[derive(Clone)]
struct Stub {
    hits: Arc<AtomicUsize>,
    fail_first: usize,
    failure: StatusCode,
    body: &'static str,
}

impl Stub {
    fn new(fail_first: usize, failure: StatusCode, body: &'static str) -> Self {
        Self {
            hits: Arc::new(AtomicUsize::new(0)),
            fail_first,
            failure,
            body,
        }
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn stub_handler(State(stub): State<Stub>) -> (StatusCode, String) {
    let n = stub.hits.fetch_add(1, Ordering::SeqCst);
    if n < stub.fail_first {
        (stub.failure, "backend exploded".to_string())
    } else {
        (StatusCode::OK, stub.body.to_string())
    }
}

async fn serve_stub(stub: Stub) -> String {
    let router = Router::new()
        .route("/summarize", post(stub_handler))
        .route("/classify", post(stub_handler))
        .route("/chat", post(stub_handler))
        .with_state(stub);
    spawn_router(router).await
}

fn config(base_url: String, max_retries: u32) -> ClientConfig {
    ClientConfig::new(base_url)
        .with_timeout(Duration::from_secs(5))
        .with_max_retries(max_retries)
}

// ============================================================================
// Retry policy
// ============================================================================

#[tokio::test]
async fn test_server_error_is_retried_then_succeeds() {
    let stub = Stub::new(2, StatusCode::SERVICE_UNAVAILABLE, r#"{"summary":"recovered"}"#);
    let base_url = serve_stub(stub.clone()).await;
    let summarizer = HttpSummarizer::new(&config(base_url, 2)).unwrap();

    assert_eq!(summarizer.summarize("ERROR x").await.unwrap(), "recovered");
    assert_eq!(stub.hits(), 3);
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let stub = Stub::new(usize::MAX, StatusCode::INTERNAL_SERVER_ERROR, "");
    let base_url = serve_stub(stub.clone()).await;
    let summarizer = HttpSummarizer::new(&config(base_url, 2)).unwrap();

    let err = summarizer.summarize("ERROR x").await.unwrap_err();
    assert_eq!(err.stage, Stage::Summarize);
    assert!(matches!(
        err.cause,
        ErrorCause::Network {
            status: Some(500),
            ..
        }
    ));
    assert!(err.to_string().contains("backend exploded"));
    assert_eq!(stub.hits(), 3);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let stub = Stub::new(usize::MAX, StatusCode::BAD_REQUEST, "");
    let base_url = serve_stub(stub.clone()).await;
    let conversation = HttpConversation::new(&config(base_url, 2)).unwrap();

    let err = conversation.reply("hello").await.unwrap_err();
    assert_eq!(err.stage, Stage::Chat);
    assert!(!err.is_transient());
    assert_eq!(stub.hits(), 1);
}

/// Counts requests and never answers within the client timeout.
async fn stalled_handler(State(hits): State<Arc<AtomicUsize>>) -> &'static str {
    hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(10)).await;
    r#"{"summary":"too late"}"#
}

#[tokio::test]
async fn test_stalled_backend_times_out_as_network_error() {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route("/summarize", post(stalled_handler))
        .with_state(hits.clone());
    let base_url = spawn_router(router).await;
    let summarizer = HttpSummarizer::new(
        &ClientConfig::new(base_url)
            .with_timeout(Duration::from_millis(200))
            .with_max_retries(1),
    )
    .unwrap();

    let err = tokio::time::timeout(Duration::from_secs(5), summarizer.summarize("ERROR x"))
        .await
        .expect("client timeout should fire well before the server answers")
        .unwrap_err();

    assert_eq!(err.stage, Stage::Summarize);
    assert!(matches!(err.cause, ErrorCause::Network { status: None, .. }));
    assert!(err.is_transient());
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_unreachable_backend_fails_with_network_error() {
    let classifier = HttpClassifier::new(&config(unreachable_url(), 0)).unwrap();

    let err = classifier.classify("summary").await.unwrap_err();
    assert_eq!(err.stage, Stage::Classify);
    assert!(matches!(err.cause, ErrorCause::Network { status: None, .. }));
}

// ============================================================================
// Malformed responses
// ============================================================================

#[tokio::test]
async fn test_non_json_body_is_malformed_and_not_retried() {
    let stub = Stub::new(0, StatusCode::OK, "<html>oops</html>");
    let base_url = serve_stub(stub.clone()).await;
    let summarizer = HttpSummarizer::new(&config(base_url, 2)).unwrap();

    let err = summarizer.summarize("ERROR x").await.unwrap_err();
    assert!(matches!(err.cause, ErrorCause::MalformedResponse { .. }));
    assert_eq!(stub.hits(), 1);
}

#[tokio::test]
async fn test_missing_field_is_malformed() {
    let stub = Stub::new(0, StatusCode::OK, r#"{"reply":"wrong key"}"#);
    let base_url = serve_stub(stub).await;
    let conversation = HttpConversation::new(&config(base_url, 0)).unwrap();

    let err = conversation.reply("hello").await.unwrap_err();
    assert_eq!(err.stage, Stage::Chat);
    assert!(matches!(err.cause, ErrorCause::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_out_of_range_probability_is_malformed() {
    let stub = Stub::new(
        0,
        StatusCode::OK,
        r#"{"classification":{"severity":"alert","probabilities":{"alert":1.5}}}"#,
    );
    let base_url = serve_stub(stub).await;
    let classifier = HttpClassifier::new(&config(base_url, 0)).unwrap();

    let err = classifier.classify("ERROR x").await.unwrap_err();
    assert_eq!(err.stage, Stage::Classify);
    assert!(matches!(err.cause, ErrorCause::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_severity_need_not_match_highest_probability() {
    let stub = Stub::new(
        0,
        StatusCode::OK,
        r#"{"classification":{"severity":"normal","probabilities":{"alert":0.8,"normal":0.1}}}"#,
    );
    let base_url = serve_stub(stub).await;
    let classifier = HttpClassifier::new(&config(base_url, 0)).unwrap();

    let classification = classifier.classify("x").await.unwrap();
    assert_eq!(classification.severity, "normal");
    assert_eq!(classification.probabilities["alert"], 0.8);
}
