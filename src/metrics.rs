//! Prometheus metrics for lookups and the geocoder.
//!
//! This module provides metrics for:
//! - Lookup outcomes by matching branch
//! - Lookup errors by kind
//! - End-to-end lookup latency
//! - Geocode request latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::debug;

use crate::error::ServiceError;
use crate::lookup::MatchedVia;

// === Metric Name Constants ===

/// Successful lookups counter metric name.
pub const METRIC_LOOKUPS: &str = "lookups_total";
/// Failed lookups counter metric name.
pub const METRIC_LOOKUP_ERRORS: &str = "lookup_errors_total";
/// End-to-end lookup latency metric name.
pub const METRIC_LOOKUP_LATENCY: &str = "lookup_latency_ms";
/// Geocode request latency metric name.
pub const METRIC_GEOCODE_LATENCY: &str = "geocode_request_latency_ms";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_LOOKUPS,
        "Total number of successful lookups, by matching branch"
    );
    describe_counter!(
        METRIC_LOOKUP_ERRORS,
        "Total number of failed lookups, by error kind"
    );
    describe_histogram!(
        METRIC_LOOKUP_LATENCY,
        "End-to-end lookup latency in milliseconds"
    );
    describe_histogram!(
        METRIC_GEOCODE_LATENCY,
        "Geocode request latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Install the Prometheus exporter with its own HTTP listener.
pub fn install_exporter(addr: SocketAddr) -> Result<(), ServiceError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| ServiceError::Metrics(e.to_string()))
}

/// Record geocode request latency.
pub fn record_geocode_latency(start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_GEOCODE_LATENCY).record(latency_ms);
}

/// Increment the successful lookups counter.
pub fn inc_lookups(matched_via: MatchedVia) {
    counter!(METRIC_LOOKUPS, "matched_via" => matched_via.to_string()).increment(1);
}

/// Increment the lookup errors counter.
pub fn inc_lookup_errors(kind: &'static str) {
    counter!(METRIC_LOOKUP_ERRORS, "kind" => kind).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        histogram!(self.metric_name).record(latency_ms);
    }
}

/// Create a latency timer for a whole lookup.
pub fn timer_lookup() -> LatencyTimer {
    LatencyTimer::new(METRIC_LOOKUP_LATENCY)
}
