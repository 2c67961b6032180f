//! Concurrent batch extraction
//!
//! Fans the element collection out over a bounded pool of workers,
//! builds one record per element, and folds the index-tagged outcomes
//! back together. A single element failing never aborts the batch.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use enao_common::Genre;
use futures::stream::{self, StreamExt};
use thiserror::Error;

use crate::source::GenreElement;

/// Default size of the worker pool.
pub const DEFAULT_WORKERS: usize = 4;

/// Per-element extraction failures. These are recorded against the
/// element's index and never propagate past the batch boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// A style segment had no `:` separator.
    #[error("malformed style segment: {segment:?}")]
    MalformedField { segment: String },

    /// A pixel/size value did not parse as an integer after suffix
    /// stripping.
    #[error("field {key} is not an integer: {value:?}")]
    NumericParse { key: &'static str, value: String },

    /// One or more required record fields could not be resolved.
    #[error("incomplete record, missing: {missing}")]
    IncompleteRecord { missing: String },
}

/// One element's failure, tagged with its input index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractFailure {
    pub index: usize,
    pub error: ExtractError,
}

/// Outcome of one extraction batch.
///
/// `records` carries no ordering guarantee; `failures` is sorted by
/// input index. Every input element is accounted for exactly once in
/// one of the two collections.
#[derive(Debug, Default)]
pub struct ExtractOutcome {
    pub records: Vec<Genre>,
    pub failures: Vec<ExtractFailure>,
}

impl ExtractOutcome {
    /// Number of elements accounted for, success or failure.
    pub fn total(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

/// Progress observer, called with `(completed, total)` as elements
/// finish. Observability only; carries no semantic weight.
pub type ProgressFn = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Drives record building over a full element collection with a
/// fixed-size worker pool.
pub struct ConcurrentExtractor {
    workers: usize,
    progress: Option<ProgressFn>,
}

impl ConcurrentExtractor {
    /// Create an extractor with the given worker-pool size (clamped to
    /// at least one worker).
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            progress: None,
        }
    }

    /// Attach a progress observer.
    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Extract every element of the batch. Returns only after each
    /// submitted element has completed or failed; output aggregation is
    /// order-insensitive, so the worker count never changes the result
    /// sets.
    pub async fn extract_all(&self, elements: Vec<GenreElement>) -> ExtractOutcome {
        let total = elements.len();
        let completed = Arc::new(AtomicUsize::new(0));

        let outcomes: Vec<(usize, Result<Genre, ExtractError>)> =
            stream::iter(elements.into_iter().enumerate())
                .map(|(index, element)| {
                    let completed = Arc::clone(&completed);
                    let progress = self.progress.clone();
                    async move {
                        let result = crate::record::build_genre(&element);

                        let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        if done % 500 == 0 || done == total {
                            tracing::debug!(
                                progress = format!("{}/{}", done, total),
                                "extraction progress"
                            );
                        }
                        if let Some(progress) = &progress {
                            progress(done, total);
                        }

                        (index, result)
                    }
                })
                .buffer_unordered(self.workers)
                .collect()
                .await;

        // Single-consumer aggregation: the collected stream is the only
        // place outcomes are folded together, no shared buffer between
        // workers.
        let mut outcome = ExtractOutcome::default();
        for (index, result) in outcomes {
            match result {
                Ok(genre) => outcome.records.push(genre),
                Err(error) => outcome.failures.push(ExtractFailure { index, error }),
            }
        }
        outcome.failures.sort_by_key(|f| f.index);

        outcome
    }
}

impl Default for ConcurrentExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS)
    }
}
