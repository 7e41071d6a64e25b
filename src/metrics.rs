//! Prometheus metrics for the task and user services.
//!
//! All metrics live in [`REGISTRY`], which is also handed to the HTTP
//! middleware so `/metrics` exposes request and domain metrics together.

use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry};
use std::sync::LazyLock;

/// Global metrics registry
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// ============================================================================
// Task Counters
// ============================================================================

/// Total number of tasks created
pub static TASKS_CREATED_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    let counter = IntCounter::new("tasks_created_total", "Total number of tasks created")
        .expect("metric can be created");
    REGISTRY.register(Box::new(counter.clone())).unwrap();
    counter
});

/// Status updates by target status
pub static TASK_STATUS_UPDATES: LazyLock<IntCounterVec> = LazyLock::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "task_status_updates_total",
            "Number of task status updates by target status",
        ),
        &["status"],
    )
    .expect("metric can be created");
    REGISTRY.register(Box::new(counter.clone())).unwrap();
    counter
});

// ============================================================================
// User Existence Checks
// ============================================================================

/// Existence checks against the user service by outcome (exists/absent)
pub static USER_CHECKS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "user_checks_total",
            "Remote user existence checks by outcome",
        ),
        &["outcome"],
    )
    .expect("metric can be created");
    REGISTRY.register(Box::new(counter.clone())).unwrap();
    counter
});

/// Existence check latency
pub static USER_CHECK_DURATION_SECONDS: LazyLock<HistogramVec> = LazyLock::new(|| {
    let histogram = HistogramVec::new(
        HistogramOpts::new(
            "user_check_duration_seconds",
            "Remote user existence check duration in seconds",
        )
        .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
        &["outcome"],
    )
    .expect("metric can be created");
    REGISTRY.register(Box::new(histogram.clone())).unwrap();
    histogram
});

// ============================================================================
// Startup
// ============================================================================

/// Startup database connection attempts by result (success/failure)
pub static BOOTSTRAP_ATTEMPTS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "bootstrap_attempts_total",
            "Startup database connection attempts by result",
        ),
        &["result"],
    )
    .expect("metric can be created");
    REGISTRY.register(Box::new(counter.clone())).unwrap();
    counter
});

// ============================================================================
// Helper Functions
// ============================================================================

/// Record a task creation
pub fn record_task_created() {
    TASKS_CREATED_TOTAL.inc();
}

/// Record a status update
pub fn record_status_update(status: &str) {
    TASK_STATUS_UPDATES.with_label_values(&[status]).inc();
}

/// Record a remote user existence check
pub fn record_user_check(outcome: &str, duration_secs: f64) {
    USER_CHECKS_TOTAL.with_label_values(&[outcome]).inc();
    USER_CHECK_DURATION_SECONDS
        .with_label_values(&[outcome])
        .observe(duration_secs);
}

/// Record a startup connection attempt
pub fn record_bootstrap_attempt(result: &str) {
    BOOTSTRAP_ATTEMPTS_TOTAL.with_label_values(&[result]).inc();
}

/// Initialize all metrics (call at startup to register them)
pub fn init_metrics() {
    // Force lazy initialization of all metrics
    let _ = &*TASKS_CREATED_TOTAL;
    let _ = &*TASK_STATUS_UPDATES;
    let _ = &*USER_CHECKS_TOTAL;
    let _ = &*USER_CHECK_DURATION_SECONDS;
    let _ = &*BOOTSTRAP_ATTEMPTS_TOTAL;
}
