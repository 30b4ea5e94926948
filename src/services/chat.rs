//! Chat Session
//!
//! Append-only transcript plus a one-turn-at-a-time gate in front of the
//! conversation assistant.
//!
//! State machine: `idle --submit_turn--> composing --reply|failure--> idle`.
//! A submission made while composing is rejected without touching the
//! transcript. Every accepted submission appends exactly two turns: the
//! user's message and either the assistant's reply or a fixed fallback.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::time::Instant;

use log_insight_core::{ChatTurn, ConversationAssistant};

/// First turn of every session
pub const GREETING: &str = "Hello! I'm your network assistant. Ask me about your logs.";

/// Assistant turn appended when the chat service cannot be reached
pub const FALLBACK_REPLY: &str =
    "Sorry, I couldn't reach the assistant. Please check your connection and try again.";

/// Default minimum perceived response time
pub const DEFAULT_MIN_RESPONSE_TIME: Duration = Duration::from_millis(1000);

/// What happened to a call to [`ChatSession::submit_turn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Blank message; nothing sent, transcript untouched
    Ignored,
    /// Another turn is still outstanding; transcript untouched
    Busy,
    /// The assistant replied
    Replied,
    /// The request failed; the fallback reply was appended
    Degraded,
}

/// A single long-lived conversation.
pub struct ChatSession {
    assistant: Arc<dyn ConversationAssistant>,
    transcript: RwLock<Vec<ChatTurn>>,
    composing: AtomicBool,
    /// Replies are never shown sooner than this after submission
    min_response_time: Duration,
}

/// Ends a turn: clears the composing flag, and if the turn future is dropped
/// after the user's message went in, appends the fallback so the transcript
/// still grows by two.
struct TurnGuard<'a> {
    session: &'a ChatSession,
    awaiting_reply: bool,
}

impl<'a> TurnGuard<'a> {
    fn new(session: &'a ChatSession) -> Self {
        Self {
            session,
            awaiting_reply: false,
        }
    }

    fn finish(&mut self, reply: ChatTurn) {
        self.session.append(reply);
        self.awaiting_reply = false;
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        if self.awaiting_reply {
            tracing::debug!("chat turn dropped before the reply arrived");
            self.session.append(ChatTurn::assistant(FALLBACK_REPLY));
        }
        self.session.composing.store(false, Ordering::Release);
    }
}

impl ChatSession {
    /// Create a session seeded with the greeting turn
    pub fn new(assistant: Arc<dyn ConversationAssistant>, min_response_time: Duration) -> Self {
        Self {
            assistant,
            transcript: RwLock::new(vec![ChatTurn::assistant(GREETING)]),
            composing: AtomicBool::new(false),
            min_response_time,
        }
    }

    pub fn min_response_time(&self) -> Duration {
        self.min_response_time
    }

    /// True while a turn is outstanding
    pub fn is_composing(&self) -> bool {
        self.composing.load(Ordering::Acquire)
    }

    /// Copy of the transcript
    pub fn transcript(&self) -> Vec<ChatTurn> {
        self.read_transcript().clone()
    }

    pub fn turn_count(&self) -> usize {
        self.read_transcript().len()
    }

    /// Most recent turn (the greeting if nothing was submitted yet)
    pub fn last_turn(&self) -> Option<ChatTurn> {
        self.read_transcript().last().cloned()
    }

    /// Send one message to the assistant. Never fails: errors degrade to the
    /// fallback reply.
    pub async fn submit_turn(&self, message: &str) -> TurnOutcome {
        if message.trim().is_empty() {
            return TurnOutcome::Ignored;
        }

        if self
            .composing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("chat turn rejected, assistant is composing");
            return TurnOutcome::Busy;
        }
        let mut guard = TurnGuard::new(self);

        let submitted_at = Instant::now();
        self.append(ChatTurn::user(message));
        guard.awaiting_reply = true;

        match self.assistant.reply(message).await {
            Ok(reply) => {
                tokio::time::sleep_until(submitted_at + self.min_response_time).await;
                guard.finish(ChatTurn::assistant(reply));
                TurnOutcome::Replied
            }
            Err(err) => {
                tracing::warn!(error = %err, "chat request failed");
                guard.finish(ChatTurn::assistant(FALLBACK_REPLY));
                TurnOutcome::Degraded
            }
        }
    }

    // Lock sections never await, so a poisoned lock still holds a whole turn.
    fn read_transcript(&self) -> std::sync::RwLockReadGuard<'_, Vec<ChatTurn>> {
        self.transcript.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn append(&self, turn: ChatTurn) {
        self.transcript
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(turn);
    }
}
