//! Metrics and observability utilities
//!
//! Counters and histograms for each pipeline phase, recorded through the
//! `metrics` facade into a Prometheus recorder. The binary renders the
//! recorder's text snapshot once a run is over.

use crate::errors::{AppError, Result};
use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Metrics prefix for all bibgraph metrics
pub const METRICS_PREFIX: &str = "bibgraph";

/// Install the global Prometheus recorder
///
/// Only the recorder is installed, no HTTP listener. The returned handle
/// renders the text exposition format.
pub fn install_recorder() -> Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| AppError::Internal {
            message: format!("failed to install metrics recorder: {}", e),
        })
}

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_files_discovered_total", METRICS_PREFIX),
        Unit::Count,
        "Source files found by the directory scan"
    );

    describe_counter!(
        format!("{}_records_extracted_total", METRICS_PREFIX),
        Unit::Count,
        "Paper records extracted from source files"
    );

    describe_counter!(
        format!("{}_records_skipped_total", METRICS_PREFIX),
        Unit::Count,
        "Source files or records excluded from the corpus"
    );

    describe_counter!(
        format!("{}_extraction_failures_total", METRICS_PREFIX),
        Unit::Count,
        "Source files that could not be parsed"
    );

    describe_counter!(
        format!("{}_citation_papers_total", METRICS_PREFIX),
        Unit::Count,
        "Papers in the citation dataset"
    );

    describe_counter!(
        format!("{}_authors_total", METRICS_PREFIX),
        Unit::Count,
        "Authors in the coauthorship dataset"
    );

    describe_counter!(
        format!("{}_coauthorships_total", METRICS_PREFIX),
        Unit::Count,
        "Author pairs in the coauthorship dataset"
    );

    describe_histogram!(
        format!("{}_phase_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Wall time of each pipeline phase"
    );

    tracing::debug!("Metrics registered");
}

/// Helper to time one pipeline phase
pub struct PhaseTimer {
    start: Instant,
    phase: &'static str,
}

impl PhaseTimer {
    /// Start timing a phase
    pub fn start(phase: &'static str) -> Self {
        Self {
            start: Instant::now(),
            phase,
        }
    }

    /// Record phase completion, returning the elapsed seconds
    pub fn finish(self) -> f64 {
        let duration = self.start.elapsed().as_secs_f64();

        histogram!(
            format!("{}_phase_duration_seconds", METRICS_PREFIX),
            "phase" => self.phase
        )
        .record(duration);

        duration
    }
}

/// Record the outcome of the directory scan
pub fn record_scan(file_count: usize) {
    counter!(format!("{}_files_discovered_total", METRICS_PREFIX)).increment(file_count as u64);
}

/// Record a successfully extracted record
pub fn record_extracted() {
    counter!(format!("{}_records_extracted_total", METRICS_PREFIX)).increment(1);
}

/// Record a file or record left out of the corpus
pub fn record_skipped(reason: &'static str) {
    counter!(
        format!("{}_records_skipped_total", METRICS_PREFIX),
        "reason" => reason
    )
    .increment(1);
}

/// Record a file that failed to parse
pub fn record_extraction_failure() {
    counter!(format!("{}_extraction_failures_total", METRICS_PREFIX)).increment(1);
}

/// Record the sizes of the derived datasets
pub fn record_datasets(citation_papers: usize, authors: usize, coauthorships: usize) {
    counter!(format!("{}_citation_papers_total", METRICS_PREFIX)).increment(citation_papers as u64);
    counter!(format!("{}_authors_total", METRICS_PREFIX)).increment(authors as u64);
    counter!(format!("{}_coauthorships_total", METRICS_PREFIX)).increment(coauthorships as u64);
}
