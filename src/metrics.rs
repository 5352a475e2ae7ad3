// Performance metrics module
//
// Lightweight counters for rename runs and host notifications

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Process-wide rename metrics
///
/// Uses atomic operations so concurrently driven nodes can record without
/// locks. Logged on shutdown of the headless host.
#[derive(Debug)]
pub struct Metrics {
    /// Nodes whose name was changed
    pub nodes_renamed: AtomicUsize,

    /// Nodes visited but left untouched (gated out or unchanged)
    pub nodes_skipped: AtomicUsize,

    /// Nodes where the strategy or the assignment failed
    pub nodes_failed: AtomicUsize,

    /// Nodes with a type tag outside the known kinds
    pub unknown_kinds: AtomicUsize,

    /// Completed rename runs
    pub runs_completed: AtomicUsize,

    /// Total time spent in rename runs in milliseconds
    pub total_run_time_ms: AtomicU64,

    /// Events posted to the panel
    pub events_posted: AtomicU64,

    /// Events dropped because the panel channel was full
    pub event_channel_full: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            nodes_renamed: AtomicUsize::new(0),
            nodes_skipped: AtomicUsize::new(0),
            nodes_failed: AtomicUsize::new(0),
            unknown_kinds: AtomicUsize::new(0),
            runs_completed: AtomicUsize::new(0),
            total_run_time_ms: AtomicU64::new(0),
            events_posted: AtomicU64::new(0),
            event_channel_full: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_node_renamed(&self) {
        self.nodes_renamed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_node_skipped(&self) {
        self.nodes_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_node_failed(&self) {
        self.nodes_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unknown_kind(&self) {
        self.unknown_kinds.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a finished rename run
    pub fn record_run(&self, duration: Duration) {
        self.runs_completed.fetch_add(1, Ordering::Relaxed);
        self.total_run_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_event_posted(&self) {
        self.events_posted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_event_channel_full(&self) {
        self.event_channel_full.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Get average run time in milliseconds
    pub fn avg_run_time_ms(&self) -> f64 {
        let total = self.total_run_time_ms.load(Ordering::Relaxed);
        let count = self.runs_completed.load(Ordering::Relaxed);
        if count > 0 {
            total as f64 / count as f64
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Rename Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Nodes: {} renamed, {} skipped, {} failed, {} unknown kinds",
            self.nodes_renamed.load(Ordering::Relaxed),
            self.nodes_skipped.load(Ordering::Relaxed),
            self.nodes_failed.load(Ordering::Relaxed),
            self.unknown_kinds.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Runs: {} (avg: {:.2}ms per run)",
            self.runs_completed.load(Ordering::Relaxed),
            self.avg_run_time_ms()
        );
        tracing::info!(
            "Panel events: {}, channel full errors: {}",
            self.events_posted.load(Ordering::Relaxed),
            self.event_channel_full.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
