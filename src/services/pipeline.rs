//! Log Analysis Pipeline
//!
//! Runs summarize -> classify over one log input and publishes the
//! keyword ranking, summary and classification as a single snapshot.
//!
//! ## Run generations
//!
//! Every run is stamped with a generation number when it starts. Results are
//! published with a compare-and-swap on that number, so a run that has been
//! overtaken by a newer one can never write into the snapshot. A stale run
//! also skips its classify request once it notices it has been superseded.

use std::sync::Arc;

use tokio::sync::watch;

use log_insight_core::{
    AnalysisResult, Classifier, KeywordExtractor, LogInput, PipelineSnapshot, PipelineStatus,
    ServiceResult, Summarizer,
};

/// What happened to a call to [`PipelineOrchestrator::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Input was blank; nothing was started
    Skipped,
    /// The run finished and its result is now the published one
    Published(AnalysisResult),
    /// A newer run started before this one finished; nothing was published
    Superseded { generation: u64 },
}

/// Owns the published analysis state and sequences the service calls.
pub struct PipelineOrchestrator {
    summarizer: Arc<dyn Summarizer>,
    classifier: Arc<dyn Classifier>,
    extractor: KeywordExtractor,
    state: watch::Sender<PipelineSnapshot>,
}

impl PipelineOrchestrator {
    pub fn new(
        summarizer: Arc<dyn Summarizer>,
        classifier: Arc<dyn Classifier>,
        extractor: KeywordExtractor,
    ) -> Self {
        let (state, _) = watch::channel(PipelineSnapshot::default());
        Self {
            summarizer,
            classifier,
            extractor,
            state,
        }
    }

    /// Analyze pasted text.
    pub async fn run_analysis(&self, text: &str) -> ServiceResult<RunOutcome> {
        self.submit(LogInput::pasted(text)).await
    }

    /// Analyze a log input (uploaded or pasted).
    ///
    /// Blank input is a no-op. A summarize failure marks the pipeline failed
    /// and is returned; a classify failure still publishes the summary and
    /// keywords with no classification.
    pub async fn submit(&self, input: LogInput) -> ServiceResult<RunOutcome> {
        if input.is_blank() {
            tracing::debug!("ignoring blank log input");
            return Ok(RunOutcome::Skipped);
        }

        let text = input.text.clone();
        let generation = self.begin_run(input);
        tracing::info!(generation, bytes = text.len(), "analysis run started");

        // Computed up front, published only with the rest of the result.
        let keywords = self.extractor.extract(&text);

        let summary = match self.summarizer.summarize(&text).await {
            Ok(summary) => summary,
            Err(err) => {
                let reason = err.user_notice();
                let published = self.publish_if_current(generation, |snap| {
                    snap.status = PipelineStatus::Failed { reason };
                    snap.result = None;
                });
                if !published {
                    tracing::debug!(generation, "discarding failure of superseded run");
                    return Ok(RunOutcome::Superseded { generation });
                }
                tracing::warn!(generation, error = %err, "analysis run failed");
                return Err(err);
            }
        };

        if !self.is_current(generation) {
            tracing::info!(generation, "analysis run superseded before classification");
            return Ok(RunOutcome::Superseded { generation });
        }

        // Classification runs on the summary, not the raw input.
        let (classification, classification_error) = match self.classifier.classify(&summary).await
        {
            Ok(classification) => (Some(classification), None),
            Err(err) => {
                tracing::warn!(generation, error = %err, "classification failed, publishing summary only");
                (None, Some(err))
            }
        };

        let result = AnalysisResult {
            summary,
            classification,
            keywords,
            classification_error,
            completed_at: chrono::Utc::now().timestamp(),
        };

        let published = self.publish_if_current(generation, |snap| {
            snap.status = PipelineStatus::Succeeded;
            snap.result = Some(result.clone());
        });

        if published {
            tracing::info!(generation, "analysis run published");
            Ok(RunOutcome::Published(result))
        } else {
            tracing::info!(generation, "analysis run superseded, result discarded");
            Ok(RunOutcome::Superseded { generation })
        }
    }

    /// Last published snapshot
    pub fn snapshot(&self) -> PipelineSnapshot {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> PipelineStatus {
        self.state.borrow().status.clone()
    }

    /// Receiver notified on every publish
    pub fn subscribe(&self) -> watch::Receiver<PipelineSnapshot> {
        self.state.subscribe()
    }

    pub fn extractor(&self) -> &KeywordExtractor {
        &self.extractor
    }

    /// Claim a new generation, mark running and record the input.
    fn begin_run(&self, input: LogInput) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|snap| {
            snap.generation += 1;
            generation = snap.generation;
            snap.status = PipelineStatus::Running;
            snap.input = Some(input);
            snap.result = None;
        });
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.state.borrow().generation == generation
    }

    /// Apply `update` only if `generation` is still the latest run.
    fn publish_if_current<F>(&self, generation: u64, update: F) -> bool
    where
        F: FnOnce(&mut PipelineSnapshot),
    {
        self.state.send_if_modified(|snap| {
            if snap.generation != generation {
                return false;
            }
            update(snap);
            true
        })
    }
}
