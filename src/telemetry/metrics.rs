//! Metric instrument factories for evalbatch.
//!
//! Uses the OTel Meter API with the globally-registered `MeterProvider`.
//! Without a provider every instrument is a no-op.

use opentelemetry::metrics::{Counter, Histogram, Meter};

fn meter() -> Meter {
    opentelemetry::global::meter("evalbatch")
}

/// Counter: items whose task completed and parsed.
/// Labels: `task`.
pub fn items_completed() -> Counter<u64> {
    meter()
        .u64_counter("evalbatch.items.completed")
        .with_description("Number of batch items completed")
        .build()
}

/// Counter: items that aborted their batch.
/// Labels: `task`, `reason` ("exit_status" | "bad_output" | "spawn").
pub fn items_failed() -> Counter<u64> {
    meter()
        .u64_counter("evalbatch.items.failed")
        .with_description("Number of batch items that failed")
        .build()
}

/// Counter: distinct warnings surfaced to the caller.
/// Labels: `task`.
pub fn warnings_surfaced() -> Counter<u64> {
    meter()
        .u64_counter("evalbatch.warnings.surfaced")
        .with_description("Number of distinct task warnings surfaced")
        .build()
}

/// Histogram: wall time of one task invocation.
/// Labels: `task`.
pub fn item_duration_ms() -> Histogram<f64> {
    meter()
        .f64_histogram("evalbatch.item.duration_ms")
        .with_description("Task invocation duration in milliseconds")
        .with_unit("ms")
        .build()
}

/// Histogram: wall time of a whole batch.
/// Labels: `task`, `result` ("ok" | "error").
pub fn batch_duration_ms() -> Histogram<f64> {
    meter()
        .f64_histogram("evalbatch.batch.duration_ms")
        .with_description("Batch duration in milliseconds")
        .with_unit("ms")
        .build()
}
