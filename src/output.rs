//! JSON Lines serialization of batch results.

use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::BatchResult;

/// One compact JSON object per result, newline separated, no trailing newline.
pub fn to_jsonl(results: &[BatchResult]) -> Result<String> {
    let lines = results
        .iter()
        .map(serde_json::to_string)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::Other(format!("serialize results: {e}")))?;
    Ok(lines.join("\n"))
}

/// Write results to `path`, or to stdout when `path` is `None`.
pub fn write_jsonl(results: &[BatchResult], path: Option<&Path>) -> Result<()> {
    let jsonl = to_jsonl(results)?;
    match path {
        Some(path) => std::fs::write(path, jsonl)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{jsonl}")?;
            stdout.flush()?;
        }
    }
    Ok(())
}
