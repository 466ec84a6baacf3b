//! Batch execution span helpers.

use tracing::Span;
use uuid::Uuid;

/// Start the span wrapping one batch run.
///
/// `batch.completed` is declared empty and filled by [`record_batch_completed`].
pub fn start_batch_span(task: &str, batch_id: &Uuid, total: usize, workers: usize) -> Span {
    tracing::info_span!(
        "batch.run",
        "batch.id" = %batch_id,
        "batch.task" = task,
        "batch.total" = total,
        "batch.workers" = workers,
        "batch.completed" = tracing::field::Empty,
    )
}

/// Start the span for one worker's share of a batch.
pub fn start_worker_span(worker: usize, assigned: usize) -> Span {
    tracing::debug_span!("batch.worker", "worker.id" = worker, "worker.assigned" = assigned)
}

/// Record how many items finished on a batch span.
pub fn record_batch_completed(span: &Span, completed: usize) {
    span.record("batch.completed", completed);
}
