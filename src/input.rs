//! Input list loading.
//!
//! A batch's inputs live in a YAML file holding a flat sequence of scalars:
//!
//! ```yaml
//! - How do I pay VAT?
//! - Do I need a visa?
//! ```

use std::path::Path;

use crate::error::{Error, Result};

/// Read the ordered inputs from the YAML file at `path`.
///
/// A missing file is reported as [`Error::SourceNotFound`] so it can be
/// rejected before any work starts.
pub fn load_inputs(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(Error::SourceNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_inputs(&content).map_err(|source| Error::InputFormat {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a YAML sequence of scalars. An empty document is an empty list.
pub fn parse_inputs(content: &str) -> std::result::Result<Vec<String>, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(content)
}
