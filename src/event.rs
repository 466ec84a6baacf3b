//! Progress events emitted by the executor as items complete.
//!
//! One event per completed item, delivered in completion order. Events are
//! the executor's voice to its caller; tracing spans are its voice to
//! operators.

use serde::{Deserialize, Serialize};

/// Progress after one item completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Diagnostic lines from this item not surfaced earlier in the batch.
    pub new_warnings: Vec<String>,
    /// Number of inputs in the batch.
    pub total: usize,
    /// Number of items completed so far, this one included.
    pub completed: usize,
}

impl std::fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} / {})", self.completed, self.total)
    }
}

/// Observer invoked once per completed item.
///
/// Called while the executor holds its aggregation lock, so it must be quick
/// and must not call back into the executor.
pub type ProgressObserver = Box<dyn FnMut(ProgressEvent) + Send>;
