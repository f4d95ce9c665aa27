//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Source fetches (torrent client, incoming directory)
//! - Acquisition creation

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Source Metrics
// =============================================================================

/// Source fetches total by source and result.
pub static SOURCE_FETCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "additions_source_fetch_total",
            "Total fetches from acquisition sources",
        ),
        &["source", "result"], // result: "success", "error", "timeout"
    )
    .unwrap()
});

/// Source fetch duration in seconds.
pub static SOURCE_FETCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "additions_source_fetch_duration_seconds",
            "Duration of one fetch from an acquisition source",
        )
        .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["source"],
    )
    .unwrap()
});

/// Acquisitions returned per listing, after filtering.
pub static LISTED_ACQUISITIONS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "additions_listed_acquisitions",
            "Number of acquisitions matching a listing query",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 1000.0]),
    )
    .unwrap()
});

// =============================================================================
// Creation Metrics
// =============================================================================

/// Acquisitions created total by result.
pub static CREATED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("additions_created_total", "Total acquisition submissions"),
        &["result"], // "success", "invalid_link", "client_unavailable", ...
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Sources
        Box::new(SOURCE_FETCHES.clone()),
        Box::new(SOURCE_FETCH_DURATION.clone()),
        Box::new(LISTED_ACQUISITIONS.clone()),
        // Creation
        Box::new(CREATED.clone()),
    ]
}
