//! Batch engine: partitioning, worker pool, ordered aggregation.

pub mod batch;
pub mod diagnostics;
pub mod partition;

pub use batch::BatchExecutor;
pub use diagnostics::{NoiseFilter, WarningSet};
pub use partition::Partition;
