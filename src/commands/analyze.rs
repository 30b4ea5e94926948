//! Analysis Commands
//!
//! `analyze`, `summarize` and `classify`: one-shot round trips against the
//! analysis services, printed as plain text.

use std::io::Write;
use std::path::Path;

use tokio::io::AsyncReadExt;

use log_insight_core::{Classifier, LogInput, Summarizer};

use crate::commands::render::{render_analysis, render_classification};
use crate::services::ingest::read_log_file;
use crate::services::pipeline::{PipelineOrchestrator, RunOutcome};
use crate::utils::error::{AppError, AppResult};

/// Read the log to analyze from `file`, or from stdin when no file is given.
pub async fn read_input(file: Option<&Path>) -> AppResult<LogInput> {
    match file {
        Some(path) => read_log_file(path).await,
        None => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            Ok(LogInput::pasted(text))
        }
    }
}

/// Run the full pipeline over `input` and print the result.
///
/// A summarize failure is returned as an error; a classify failure is
/// reported inline and the rest of the result is still printed.
pub async fn analyze<W: Write>(
    pipeline: &PipelineOrchestrator,
    input: LogInput,
    out: &mut W,
) -> AppResult<()> {
    match pipeline.submit(input).await? {
        RunOutcome::Skipped => {
            writeln!(out, "Nothing to analyze: the log is empty.")?;
        }
        RunOutcome::Published(result) => {
            write!(out, "{}", render_analysis(&result))?;
        }
        RunOutcome::Superseded { generation } => {
            return Err(AppError::internal(format!(
                "analysis run {} was superseded",
                generation
            )));
        }
    }
    Ok(())
}

/// Summarize `input` without classifying it.
pub async fn summarize<W: Write>(
    summarizer: &dyn Summarizer,
    input: LogInput,
    out: &mut W,
) -> AppResult<()> {
    if input.is_blank() {
        writeln!(out, "Nothing to summarize: the log is empty.")?;
        return Ok(());
    }
    let summary = summarizer.summarize(&input.text).await?;
    writeln!(out, "{}", summary)?;
    Ok(())
}

/// Classify a single alert text.
pub async fn classify<W: Write>(
    classifier: &dyn Classifier,
    text: &str,
    out: &mut W,
) -> AppResult<()> {
    if text.trim().is_empty() {
        writeln!(out, "Nothing to classify: the alert text is empty.")?;
        return Ok(());
    }
    let classification = classifier.classify(text).await?;
    write!(out, "{}", render_classification(&classification))?;
    Ok(())
}
