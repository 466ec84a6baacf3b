//! Error types for evalbatch.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file {} does not exist", .0.display())]
    SourceNotFound(PathBuf),

    #[error("task failed for input \"{input}\":\n\n{stderr}")]
    TaskExecution { input: String, stderr: String },

    #[error("task output for input \"{input}\" is not valid JSON: {source}")]
    OutputParse {
        input: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("bad input list {}: {source}", .path.display())]
    InputFormat {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("worker failed: {0}")]
    Worker(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
