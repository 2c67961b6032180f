//! Integration tests for the concurrent extractor
//!
//! Exercises the batch accounting contract: every element resolves to
//! exactly one outcome, failures are index-tagged, and the worker count
//! never changes the result sets.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use enao_scraper::extract::{ConcurrentExtractor, ExtractError};
use enao_scraper::source::GenreElement;

fn well_formed(i: usize) -> GenreElement {
    GenreElement {
        display_text: format!("genre {}", i),
        title_text: format!("e.g. track {}", i),
        preview_url: String::new(),
        style_text: format!(
            "color: #a{:05x}; top: {}px; left: {}px; font-size: {}%;",
            i,
            i * 10,
            i * 20,
            80 + i
        ),
    }
}

fn malformed(i: usize) -> GenreElement {
    let mut element = well_formed(i);
    element.style_text = "color #fff;".to_string();
    element
}

/// N elements with K malformed: N-K records, K failures, all accounted
/// for, failure indices identify their source elements.
#[tokio::test]
async fn failures_are_isolated_and_index_tagged() {
    let malformed_at: BTreeSet<usize> = [1, 4, 7, 13, 19].into_iter().collect();
    let elements: Vec<GenreElement> = (0..20)
        .map(|i| {
            if malformed_at.contains(&i) {
                malformed(i)
            } else {
                well_formed(i)
            }
        })
        .collect();

    let outcome = ConcurrentExtractor::new(4).extract_all(elements).await;

    assert_eq!(outcome.total(), 20);
    assert_eq!(outcome.records.len(), 15);
    assert_eq!(outcome.failures.len(), 5);

    let failed_indices: BTreeSet<usize> = outcome.failures.iter().map(|f| f.index).collect();
    assert_eq!(failed_indices, malformed_at);
    for failure in &outcome.failures {
        assert!(matches!(failure.error, ExtractError::MalformedField { .. }));
    }
}

/// Worker-pool sizes 1 and 8 must produce the same record set and the
/// same failing indices on identical input.
#[tokio::test]
async fn worker_count_does_not_change_the_outcome() {
    let elements: Vec<GenreElement> = (0..50)
        .map(|i| if i % 7 == 0 { malformed(i) } else { well_formed(i) })
        .collect();

    let serial = ConcurrentExtractor::new(1).extract_all(elements.clone()).await;
    let parallel = ConcurrentExtractor::new(8).extract_all(elements).await;

    let names = |records: &[enao_common::Genre]| -> BTreeSet<String> {
        records.iter().map(|g| g.genre_name.clone()).collect()
    };
    assert_eq!(names(&serial.records), names(&parallel.records));

    let indices = |outcome: &enao_scraper::extract::ExtractOutcome| -> Vec<usize> {
        outcome.failures.iter().map(|f| f.index).collect()
    };
    assert_eq!(indices(&serial), indices(&parallel));
}

#[tokio::test]
async fn failures_are_sorted_by_index() {
    let elements: Vec<GenreElement> = (0..30)
        .map(|i| if i % 3 == 0 { malformed(i) } else { well_formed(i) })
        .collect();

    let outcome = ConcurrentExtractor::new(8).extract_all(elements).await;
    let indices: Vec<usize> = outcome.failures.iter().map(|f| f.index).collect();
    let mut sorted = indices.clone();
    sorted.sort_unstable();
    assert_eq!(indices, sorted);
}

#[tokio::test]
async fn progress_observer_sees_completion() {
    let elements: Vec<GenreElement> = (0..25).map(well_formed).collect();
    let seen_total = Arc::new(AtomicUsize::new(0));
    let calls = Arc::new(AtomicUsize::new(0));

    let seen = Arc::clone(&seen_total);
    let call_count = Arc::clone(&calls);
    let extractor = ConcurrentExtractor::new(4).with_progress(Arc::new(move |done, total| {
        assert_eq!(total, 25);
        call_count.fetch_add(1, Ordering::Relaxed);
        seen.fetch_max(done, Ordering::Relaxed);
    }));

    let outcome = extractor.extract_all(elements).await;
    assert_eq!(outcome.records.len(), 25);
    assert_eq!(calls.load(Ordering::Relaxed), 25);
    assert_eq!(seen_total.load(Ordering::Relaxed), 25);
}

#[tokio::test]
async fn empty_batch_completes_immediately() {
    let outcome = ConcurrentExtractor::default().extract_all(Vec::new()).await;
    assert_eq!(outcome.total(), 0);
}

#[tokio::test]
async fn zero_workers_is_clamped_to_one() {
    let elements: Vec<GenreElement> = (0..3).map(well_formed).collect();
    let outcome = ConcurrentExtractor::new(0).extract_all(elements).await;
    assert_eq!(outcome.records.len(), 3);
}
