//! Runner configuration.
//!
//! Describes how a task name turns into a process invocation. Loaded from
//! an optional TOML file; every field has a default matching the rake-based
//! evaluation tasks.

use crate::engine::diagnostics::{DEFAULT_NOISE_PATTERNS, NoiseFilter};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Top-level TOML wrapper.
#[derive(Debug, Deserialize)]
struct RunnerFile {
    #[serde(default)]
    runner: RunnerConfig,
}

/// How to invoke a task.
///
/// ```toml
/// [runner]
/// program = "bundle"
/// args = ["exec", "rake"]
/// task_prefix = "evaluation:"
/// input_var = "INPUT"
/// noise_patterns = ["not starting Prometheus metrics server"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Executable to run, resolved through `PATH` when not a path.
    pub program: String,
    /// Leading arguments placed before the task invocation.
    pub args: Vec<String>,
    /// Namespace prepended to task names that don't already carry it.
    pub task_prefix: String,
    /// Environment variable carrying the current input.
    pub input_var: String,
    /// Regular expressions for stderr lines that are never surfaced.
    pub noise_patterns: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: "bundle".to_string(),
            args: vec!["exec".to_string(), "rake".to_string()],
            task_prefix: "evaluation:".to_string(),
            input_var: "INPUT".to_string(),
            noise_patterns: DEFAULT_NOISE_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl RunnerConfig {
    /// Load a runner config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read runner config {}: {e}", path.display()))
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            Error::Config(msg) => {
                Error::Config(format!("bad runner config {}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Parse a runner config from TOML text. Missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: RunnerFile =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        let config = file.runner;
        if config.program.trim().is_empty() {
            return Err(Error::Config("runner program must not be empty".to_string()));
        }
        if config.input_var.is_empty() || config.input_var.contains('=') {
            return Err(Error::Config(format!(
                "invalid input variable name {:?}",
                config.input_var
            )));
        }
        Ok(config)
    }

    /// Compile [`Self::noise_patterns`] into a filter.
    pub fn noise_filter(&self) -> Result<NoiseFilter> {
        NoiseFilter::new(&self.noise_patterns)
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
