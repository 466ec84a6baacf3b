//! Typed configuration from environment variables.
//!
//! Loads once at startup, fails fast if required vars are missing or
//! malformed. The task name and its arguments come from the command line,
//! everything else comes from here.

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Concurrency used when `CONCURRENCY` is not set.
pub const DEFAULT_CONCURRENCY: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// YAML file holding the ordered list of inputs.
    pub input_path: PathBuf,
    /// Where to write the JSONL results. `None` means stdout.
    pub output_path: Option<PathBuf>,
    /// Upper bound on parallel workers.
    pub concurrency: usize,
    /// Optional TOML file describing how tasks are invoked.
    pub runner_config: Option<PathBuf>,
    pub otel_endpoint: Option<String>,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let input_path = var("INPUT_PATH").map(PathBuf::from).ok_or_else(|| {
            Error::Config("required environment variable INPUT_PATH is not set".to_string())
        })?;

        let concurrency = match var("CONCURRENCY") {
            Some(raw) => parse_concurrency(&raw)?,
            None => DEFAULT_CONCURRENCY,
        };

        Ok(Self {
            input_path,
            output_path: var("OUTPUT_PATH").map(PathBuf::from),
            concurrency,
            runner_config: var("RUNNER_CONFIG").map(PathBuf::from),
            otel_endpoint: var("OTEL_ENDPOINT"),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
        })
    }
}

fn parse_concurrency(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(Error::Config("CONCURRENCY must be at least 1".to_string())),
        Ok(n) => Ok(n),
        Err(e) => Err(Error::Config(format!(
            "CONCURRENCY must be a positive integer, got {raw:?}: {e}"
        ))),
    }
}
