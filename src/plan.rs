//! Dry-run description of a batch: what would be invoked and how the
//! inputs would be split across workers.

use std::fmt;

use crate::engine::Partition;
use crate::model::TaskSpec;
use crate::runner::CommandRunner;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub command_line: Vec<String>,
    pub input_var: String,
    pub inputs: usize,
    pub concurrency: usize,
    /// Items assigned to each worker, indexed by worker id.
    pub per_worker: Vec<usize>,
}

impl Plan {
    pub fn new(runner: &CommandRunner, task: &TaskSpec, inputs: usize, concurrency: usize) -> Self {
        let partition = Partition::new(inputs, concurrency);
        Self {
            command_line: runner.command_line(task),
            input_var: runner.config().input_var.clone(),
            inputs,
            concurrency,
            per_worker: (0..partition.workers()).map(|w| partition.assigned(w)).collect(),
        }
    }

    pub fn workers(&self) -> usize {
        self.per_worker.len()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Command:     {}", shell_words::join(&self.command_line))?;
        writeln!(f, "Input var:   {}", self.input_var)?;
        writeln!(f, "Inputs:      {}", self.inputs)?;
        writeln!(f, "Concurrency: {}", self.concurrency)?;
        write!(f, "Workers:     {}", self.workers())?;
        for (worker, assigned) in self.per_worker.iter().enumerate() {
            write!(f, "\n  worker {worker:<3} {assigned} item(s)")?;
        }
        Ok(())
    }
}
