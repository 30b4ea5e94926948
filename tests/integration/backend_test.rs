//! Reference Backend Tests
//!
//! The HTTP clients talking to the bundled analysis backend.

use log_insight::services::backend::chatbot::{CLASSIFY_REPLY, GREETING_REPLY};
use log_insight_clients::{ClientConfig, ServiceClients};
use log_insight_core::{Classifier, ConversationAssistant, Summarizer};

use super::spawn_reference_backend;

async fn clients() -> ServiceClients {
    let base_url = spawn_reference_backend().await;
    ServiceClients::connect(&ClientConfig::new(base_url)).unwrap()
}

// ============================================================================
// Raw HTTP
// ============================================================================

#[tokio::test]
async fn test_health_route() {
    let base_url = spawn_reference_backend().await;
    let body: serde_json::Value = reqwest::get(format!("{}/", base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, serde_json::json!({"message": "Backend is running"}));
}

#[tokio::test]
async fn test_missing_field_reads_as_empty() {
    let base_url = spawn_reference_backend().await;
    let body: serde_json::Value = reqwest::Client::new()
        .post(format!("{}/summarize", base_url))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, serde_json::json!({"summary": ""}));
}

#[tokio::test]
async fn test_invalid_json_is_rejected() {
    let base_url = spawn_reference_backend().await;
    let response = reqwest::Client::new()
        .post(format!("{}/classify", base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

// ============================================================================
// Service clients
// ============================================================================

#[tokio::test]
async fn test_summarize_round_trip() {
    let clients = clients().await;
    let log = "INFO boot ok\n\
               ERROR kernel panic on core router edge-01\n\
               INFO fan speed nominal\n\
               FATAL disk corruption detected on storage array";

    let summary = clients.summarizer.summarize(log).await.unwrap();
    assert_eq!(
        summary,
        "ERROR kernel panic on core router edge-01 FATAL disk corruption detected on storage array"
    );
}

#[tokio::test]
async fn test_short_log_summary_is_unchanged() {
    let clients = clients().await;
    let summary = clients
        .summarizer
        .summarize("ERROR: timeout\nFATAL crash")
        .await
        .unwrap();
    assert_eq!(summary, "ERROR: timeout\nFATAL crash");
}

#[tokio::test]
async fn test_classify_round_trip() {
    let clients = clients().await;

    let alert = clients.classifier.classify("ERROR: BGP peer down").await.unwrap();
    assert_eq!(alert.severity, "alert");
    assert_eq!(alert.probabilities.len(), 3);
    assert!(alert
        .probabilities
        .values()
        .all(|p| (0.0..=1.0).contains(p)));

    let warning = clients.classifier.classify("warning: fan slow").await.unwrap();
    assert_eq!(warning.severity, "warning");

    let normal = clients.classifier.classify("link up").await.unwrap();
    assert_eq!(normal.severity, "normal");
}

#[tokio::test]
async fn test_chat_round_trip() {
    let clients = clients().await;
    assert_eq!(clients.conversation.reply("hello").await.unwrap(), GREETING_REPLY);
    assert_eq!(
        clients.conversation.reply("please classify this").await.unwrap(),
        CLASSIFY_REPLY
    );
}
