//! Prometheus metrics for the prefetch trigger.
//!
//! This module provides metrics for:
//! - Prefetch invocations by outcome
//! - Candidate set sizes
//! - Bytes streamed to the helper

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

use crate::prefetcher::PrefetchOutcome;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    for metric in all_metrics() {
        if let Err(e) = registry.register(metric) {
            tracing::warn!("Failed to register prefetch metric: {}", e);
        }
    }
    registry
});

/// Prefetch invocations total by outcome.
pub static INVOCATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "objfs_prefetch_invocations_total",
            "Total prefetch invocations",
        ),
        &["outcome"], // "disabled", "unsupported", "missing_binary", "completed", "failed"
    )
    .unwrap()
});

/// Candidate files per invocation.
pub static CANDIDATES: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "objfs_prefetch_candidates",
            "Number of candidate files per prefetch request",
        )
        .buckets(vec![
            1.0, 10.0, 100.0, 1_000.0, 10_000.0, 50_000.0, 100_000.0,
        ]),
    )
    .unwrap()
});

/// Bytes written to helper stdin.
pub static BYTES_WRITTEN: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "objfs_prefetch_bytes_written_total",
        "Total bytes of file lists written to the prefetch helper",
    )
    .unwrap()
});

/// Counts one finished invocation.
pub fn record_outcome(outcome: &PrefetchOutcome) {
    INVOCATIONS.with_label_values(&[outcome.label()]).inc();
}

/// Get all prefetch metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(INVOCATIONS.clone()),
        Box::new(CANDIDATES.clone()),
        Box::new(BYTES_WRITTEN.clone()),
    ]
}

/// Text exposition of everything in [`REGISTRY`].
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}
