//! Process-backed task runner.
//!
//! Each invocation runs `program [args...] <invocation>` directly, without a
//! shell. The invocation string is `<prefix><name>[<arg>, <arg>, ...]` with
//! every user-supplied piece backslash-escaped (see [`escape`]) so the task's
//! own argument parser sees literal values. The input travels in an environment variable so the
//! argument list is identical for every item.

use crate::error::{Error, Result};
use crate::model::{TaskOutput, TaskSpec};
use crate::runner::{RunnerConfig, TaskRunner, escape};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

/// Runs tasks as child processes according to a [`RunnerConfig`].
#[derive(Debug, Clone)]
pub struct CommandRunner {
    config: RunnerConfig,
}

impl CommandRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// The single task argument handed to the program, e.g.
    /// `evaluation:my_task[arg1, arg2]`.
    ///
    /// A name already carrying the configured prefix is not prefixed twice.
    pub fn invocation(&self, task: &TaskSpec) -> String {
        let prefix = &self.config.task_prefix;
        let name = task.name.strip_prefix(prefix.as_str()).unwrap_or(&task.name);
        let args = task
            .args
            .iter()
            .map(|arg| escape(arg))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{prefix}{}[{args}]", escape(name))
    }

    /// Full argv for a task: program, leading args, then the invocation.
    pub fn command_line(&self, task: &TaskSpec) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.config.args.len() + 2);
        argv.push(self.config.program.clone());
        argv.extend(self.config.args.iter().cloned());
        argv.push(self.invocation(task));
        argv
    }

    fn command(&self, task: &TaskSpec, input: &str) -> Command {
        let mut command = Command::new(&self.config.program);
        command
            .args(&self.config.args)
            .arg(self.invocation(task))
            .env(&self.config.input_var, input)
            .stdin(Stdio::null());
        command
    }
}

impl TaskRunner for CommandRunner {
    async fn run(&self, task: &TaskSpec, input: &str) -> Result<TaskOutput> {
        let start = Instant::now();
        debug!(
            program = %self.config.program,
            invocation = %self.invocation(task),
            "running task"
        );

        let output = self
            .command(task, input)
            .output()
            .await
            .map_err(|source| Error::Spawn {
                program: self.config.program.clone(),
                source,
            })?;

        debug!(
            exit_code = ?output.status.code(),
            duration_ms = start.elapsed().as_millis() as u64,
            "task exited"
        );

        Ok(TaskOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }
}
