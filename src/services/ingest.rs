//! Log file ingestion
//!
//! Turns an uploaded file into a [`LogInput`]. Only plain-text log files are
//! accepted; bytes that are not valid UTF-8 are replaced rather than rejected.

use std::path::Path;

use log_insight_core::LogInput;

use crate::utils::error::{AppError, AppResult};

/// Accepted file extensions (compared case-insensitively)
pub const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "log"];

/// Check that `path` names a `.txt` or `.log` file.
pub fn is_accepted_log_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}

/// Read a log file into an uploaded [`LogInput`].
pub async fn read_log_file(path: &Path) -> AppResult<LogInput> {
    if !is_accepted_log_file(path) {
        return Err(AppError::validation(format!(
            "Unsupported log file '{}': expected a .txt or .log file",
            path.display()
        )));
    }

    let bytes = tokio::fs::read(path).await?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    tracing::debug!(file = %file_name, bytes = bytes.len(), "read log file");
    Ok(LogInput::uploaded(file_name, text))
}
