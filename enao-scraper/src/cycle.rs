//! Scrape cycle orchestration
//!
//! One pass: obtain the element collection, extract it concurrently,
//! hand the batch to every sink, report counts and elapsed time.

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};

use crate::extract::ConcurrentExtractor;
use crate::sink::{PersistenceSink, SinkError};
use crate::source::{ElementSource, SourceError};

/// Cycle-level failures. Per-element extraction failures are summarized
/// in the report instead and never propagate here.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Every configured sink rejected the batch.
    #[error("all sinks failed, first error: {0}")]
    AllSinksFailed(SinkError),
}

/// Summary of one completed pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Elements obtained from the source.
    pub total: usize,
    /// Records extracted and handed to the sinks.
    pub extracted: usize,
    /// Elements that failed extraction.
    pub failed: usize,
    /// Sinks that rejected the batch (fewer than all of them).
    pub sink_errors: usize,
    pub elapsed: Duration,
}

/// Drives extract-then-persist passes over an element source.
pub struct ScrapeCycle {
    extractor: ConcurrentExtractor,
    sinks: Vec<Box<dyn PersistenceSink>>,
}

impl ScrapeCycle {
    pub fn new(extractor: ConcurrentExtractor, sinks: Vec<Box<dyn PersistenceSink>>) -> Self {
        Self { extractor, sinks }
    }

    /// Run one full pass. Fails on an unavailable source or when every
    /// sink rejects the batch; a partial sink failure is logged and
    /// reported but does not fail the pass.
    pub async fn run_once(&self, source: &dyn ElementSource) -> Result<CycleReport, CycleError> {
        let started = Instant::now();

        let elements = source.fetch_elements().await?;
        let total = elements.len();

        let outcome = self.extractor.extract_all(elements).await;
        for failure in &outcome.failures {
            warn!(
                index = failure.index,
                error = %failure.error,
                "element failed extraction"
            );
        }

        let mut sink_errors = Vec::new();
        for sink in &self.sinks {
            match sink.insert_batch(&outcome.records).await {
                Ok(()) => info!(
                    sink = sink.name(),
                    records = outcome.records.len(),
                    "batch persisted"
                ),
                Err(e) => {
                    warn!(sink = sink.name(), error = %e, "sink write failed");
                    sink_errors.push(e);
                }
            }
        }
        if !self.sinks.is_empty() && sink_errors.len() == self.sinks.len() {
            return Err(CycleError::AllSinksFailed(sink_errors.remove(0)));
        }

        let report = CycleReport {
            total,
            extracted: outcome.records.len(),
            failed: outcome.failures.len(),
            sink_errors: sink_errors.len(),
            elapsed: started.elapsed(),
        };
        info!(
            total = report.total,
            extracted = report.extracted,
            failed = report.failed,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "scrape cycle completed"
        );
        Ok(report)
    }
}
