//! Rule-based chat replies

pub const SUMMARIZE_REPLY: &str = "Please provide the log text you want summarized.";
pub const CLASSIFY_REPLY: &str = "Send me a log entry, and I’ll classify it.";
pub const GREETING_REPLY: &str = "Hello! I can summarize or classify logs for you.";
pub const UNKNOWN_REPLY: &str =
    "I’m not sure how to respond. Try saying 'summarize logs' or 'classify log'.";

/// Pick a canned reply by keyword (case-insensitive substring match).
pub fn chatbot_response(message: &str) -> &'static str {
    let message = message.to_lowercase();
    if message.contains("summarize") {
        SUMMARIZE_REPLY
    } else if message.contains("classify") {
        CLASSIFY_REPLY
    } else if message.contains("hello") || message.contains("hi") {
        GREETING_REPLY
    } else {
        UNKNOWN_REPLY
    }
}
