//! End-to-End Tests
//!
//! Config file -> AppState -> pipeline / chat session -> reference backend.

use std::sync::Arc;
use std::time::Duration;

use tempfile::tempdir;

use log_insight::services::backend::chatbot::GREETING_REPLY;
use log_insight::services::chat::{FALLBACK_REPLY, GREETING};
use log_insight::storage::ConfigService;
use log_insight::{AppConfig, AppState, PipelineOrchestrator, RunOutcome, TurnOutcome};
use log_insight_clients::{ClientConfig, HttpClassifier, HttpSummarizer};
use log_insight_core::{
    ChatRole, KeywordExtractor, KeywordHit, LogInput, PipelineStatus, Stage,
};

use super::{spawn_reference_backend, unreachable_url};

fn config_for(backend_url: String) -> AppConfig {
    AppConfig {
        backend_url,
        min_response_delay_ms: 0,
        max_retries: 0,
        request_timeout_secs: 5,
        ..Default::default()
    }
}

// ============================================================================
// Pipeline
// ============================================================================

#[tokio::test]
async fn test_analysis_end_to_end() {
    let state = AppState::from_config(config_for(spawn_reference_backend().await)).unwrap();

    let outcome = state
        .pipeline()
        .run_analysis("ERROR: timeout\nFATAL crash")
        .await
        .unwrap();
    let result = match outcome {
        RunOutcome::Published(result) => result,
        other => panic!("expected Published, got {:?}", other),
    };

    assert_eq!(result.summary, "ERROR: timeout\nFATAL crash");
    let classification = result.classification.expect("classification present");
    assert_eq!(classification.severity, "alert");
    assert_eq!(
        result.keywords,
        vec![
            KeywordHit::new("error", 1),
            KeywordHit::new("timeout", 1),
            KeywordHit::new("fatal", 1),
            KeywordHit::new("crash", 1),
        ]
    );

    let snapshot = state.pipeline().snapshot();
    assert_eq!(snapshot.status, PipelineStatus::Succeeded);
    assert_eq!(snapshot.generation, 1);
    assert_eq!(snapshot.input, Some(LogInput::pasted("ERROR: timeout\nFATAL crash")));
}

#[tokio::test]
async fn test_empty_input_never_reaches_backend() {
    // Nothing listens here; a request would fail.
    let state = AppState::from_config(config_for(unreachable_url())).unwrap();

    let outcome = state.pipeline().run_analysis("   ").await.unwrap();
    assert_eq!(outcome, RunOutcome::Skipped);
    assert_eq!(state.pipeline().status(), PipelineStatus::Idle);
}

#[tokio::test]
async fn test_classifier_outage_keeps_summary_and_keywords() {
    let backend = spawn_reference_backend().await;
    let pipeline = PipelineOrchestrator::new(
        Arc::new(HttpSummarizer::new(&ClientConfig::new(backend)).unwrap()),
        Arc::new(
            HttpClassifier::new(&ClientConfig::new(unreachable_url()).with_max_retries(0))
                .unwrap(),
        ),
        KeywordExtractor::default(),
    );

    let outcome = pipeline.run_analysis("warning: fan slow").await.unwrap();
    let result = match outcome {
        RunOutcome::Published(result) => result,
        other => panic!("expected Published, got {:?}", other),
    };

    assert_eq!(result.summary, "warning: fan slow");
    assert!(result.classification.is_none());
    assert_eq!(
        result.classification_error.map(|e| e.stage),
        Some(Stage::Classify)
    );
    assert_eq!(result.keywords, vec![KeywordHit::new("warning", 1)]);
    assert_eq!(pipeline.status(), PipelineStatus::Succeeded);
}

#[tokio::test]
async fn test_summarizer_outage_fails_run() {
    let state = AppState::from_config(config_for(unreachable_url())).unwrap();

    let err = state
        .pipeline()
        .run_analysis("ERROR: link down")
        .await
        .unwrap_err();
    assert_eq!(err.stage, Stage::Summarize);

    let snapshot = state.pipeline().snapshot();
    assert!(matches!(snapshot.status, PipelineStatus::Failed { .. }));
    assert!(snapshot.result.is_none());
}

// ============================================================================
// Chat
// ============================================================================

#[tokio::test]
async fn test_chat_end_to_end() {
    let state = AppState::from_config(config_for(spawn_reference_backend().await)).unwrap();
    let chat = state.chat();

    assert_eq!(chat.submit_turn("hello").await, TurnOutcome::Replied);
    assert_eq!(chat.submit_turn("").await, TurnOutcome::Ignored);

    let transcript = chat.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[0].text, GREETING);
    assert_eq!(transcript[1].role, ChatRole::User);
    assert_eq!(transcript[2].text, GREETING_REPLY);
}

#[tokio::test]
async fn test_chat_outage_degrades() {
    let state = AppState::from_config(config_for(unreachable_url())).unwrap();
    let chat = state.chat();

    assert_eq!(chat.submit_turn("hello").await, TurnOutcome::Degraded);
    let last = chat.last_turn().unwrap();
    assert_eq!(last.role, ChatRole::Assistant);
    assert_eq!(last.text, FALLBACK_REPLY);
    assert!(!chat.is_composing());
}

#[tokio::test]
async fn test_chat_reply_respects_minimum_response_time() {
    let mut config = config_for(spawn_reference_backend().await);
    config.min_response_delay_ms = 200;
    let state = AppState::from_config(config).unwrap();

    let started = std::time::Instant::now();
    assert_eq!(state.chat().submit_turn("hi").await, TurnOutcome::Replied);
    assert!(started.elapsed() >= Duration::from_millis(200));
}

// ============================================================================
// Configuration
// ============================================================================

#[tokio::test]
async fn test_config_file_with_flag_override() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let service = ConfigService::open(&path).unwrap();
    assert!(path.exists());

    let backend = spawn_reference_backend().await;
    let mut config = service.effective_config(Some(backend.as_str())).unwrap();
    assert_eq!(config.backend_url, backend);
    config.min_response_delay_ms = 0;

    let state = AppState::from_config(config).unwrap();
    assert_eq!(state.chat().submit_turn("summarize please").await, TurnOutcome::Replied);

    // The override is not written back.
    let reopened = ConfigService::open(&path).unwrap();
    assert_eq!(reopened.get_config().backend_url, "http://127.0.0.1:5000");
}
