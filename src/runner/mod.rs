//! Task runners: the black box invoked once per input.
//!
//! The executor only knows the [`TaskRunner`] trait. [`CommandRunner`] is the
//! process-backed implementation used by the CLI; tests substitute
//! in-process stubs.

pub mod command;
pub mod config;
pub mod escape;

pub use command::CommandRunner;
pub use config::RunnerConfig;
pub use escape::escape;

use std::future::Future;

use crate::error::Result;
use crate::model::{TaskOutput, TaskSpec};

/// Runs one task invocation for one input and reports what it produced.
///
/// A non-zero exit status is not an error at this layer; it comes back in
/// [`TaskOutput::exit_code`] and the executor decides what it means. `Err`
/// is reserved for failing to run the task at all.
pub trait TaskRunner: Send + Sync {
    fn run(&self, task: &TaskSpec, input: &str) -> impl Future<Output = Result<TaskOutput>> + Send;
}
