//! Task stderr handling: noise filtering and batch-wide warning dedup.

use std::collections::HashSet;

use regex::Regex;

use crate::error::{Error, Result};

/// Stderr lines the evaluation tasks print on every run and that carry no
/// information about the item being processed.
pub const DEFAULT_NOISE_PATTERNS: &[&str] = &["not starting Prometheus metrics server"];

/// Drops blank and known-benign lines from task stderr.
#[derive(Debug, Clone, Default)]
pub struct NoiseFilter {
    patterns: Vec<Regex>,
}

impl NoiseFilter {
    /// Compile a filter from regular expressions.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(pattern)
                    .map_err(|e| Error::Config(format!("bad noise pattern {pattern:?}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Filter built from [`DEFAULT_NOISE_PATTERNS`].
    pub fn standard() -> Result<Self> {
        Self::new(DEFAULT_NOISE_PATTERNS)
    }

    pub fn is_noise(&self, line: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(line))
    }

    /// Non-blank, non-noise lines of `stderr`, in order.
    pub fn warnings(&self, stderr: &str) -> Vec<String> {
        stderr
            .lines()
            .filter(|line| !line.trim().is_empty() && !self.is_noise(line))
            .map(str::to_owned)
            .collect()
    }
}

/// Every warning surfaced so far in one batch. Only grows.
#[derive(Debug, Default)]
pub struct WarningSet {
    seen: HashSet<String>,
}

impl WarningSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `lines`, returning the ones not seen before in first-seen order.
    ///
    /// Repeats within `lines` itself are collapsed too.
    pub fn absorb<I>(&mut self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        lines
            .into_iter()
            .filter(|line| self.seen.insert(line.clone()))
            .collect()
    }

    pub fn contains(&self, line: &str) -> bool {
        self.seen.contains(line)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
