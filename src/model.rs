//! Core data model.
//!
//! A batch is an ordered list of inputs plus the task to run against each of
//! them. Results come back as `{input, output}` pairs in input order.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// The task to run for every input: a name and its positional arguments.
///
/// The same task is reused unmodified for every item in a batch. The item
/// itself travels out of band (see [`crate::runner::CommandRunner`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub name: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl TaskSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Builder: append positional arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

// ---------------------------------------------------------------------------
// Batch request
// ---------------------------------------------------------------------------

/// Everything one executor run needs. Immutable once built.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    inputs: Vec<String>,
    task: TaskSpec,
    concurrency: usize,
}

impl BatchRequest {
    /// Build a request. Fails if `concurrency` is zero.
    pub fn new(inputs: Vec<String>, task: TaskSpec, concurrency: usize) -> Result<Self> {
        if concurrency == 0 {
            return Err(Error::Config("concurrency must be at least 1".to_string()));
        }
        Ok(Self {
            inputs,
            task,
            concurrency,
        })
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn task(&self) -> &TaskSpec {
        &self.task
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, TaskSpec, usize) {
        (self.inputs, self.task, self.concurrency)
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// One completed item: the input as given and the task's parsed JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub input: String,
    pub output: serde_json::Value,
}

/// Raw outcome of one task invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskOutput {
    pub stdout: String,
    pub stderr: String,
    /// Process exit code. `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
}

impl TaskOutput {
    /// A successful invocation with the given output streams.
    pub fn success(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code: Some(0),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }
}
