//! Regex name filter applied to monitor sets before reconciliation.
//!
//! The match is unanchored: `db` keeps `db-latency` and `web-db-errors`;
//! use `^db-` to restrict to a prefix. An empty pattern keeps everything.

use crate::Monitor;
use regex::Regex;

#[derive(Debug, thiserror::Error)]
#[error("invalid name filter '{pattern}': {source}")]
pub struct FilterError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Compiled name filter. Built once at startup, read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct NameFilter {
    regex: Option<Regex>,
}

impl NameFilter {
    /// Compile `pattern`. Empty means "no filtering".
    pub fn new(pattern: &str) -> Result<Self, FilterError> {
        if pattern.is_empty() {
            return Ok(Self::all());
        }
        let regex = Regex::new(pattern).map_err(|source| FilterError {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex: Some(regex) })
    }

    /// A filter that keeps every monitor.
    pub fn all() -> Self {
        Self { regex: None }
    }

    pub fn pattern(&self) -> Option<&str> {
        self.regex.as_ref().map(|r| r.as_str())
    }

    pub fn is_match(&self, name: &str) -> bool {
        match &self.regex {
            Some(r) => r.is_match(name),
            None => true,
        }
    }

    /// Keep the monitors whose name matches, preserving input order.
    pub fn apply(&self, monitors: Vec<Monitor>) -> Vec<Monitor> {
        if self.regex.is_none() {
            return monitors;
        }
        monitors
            .into_iter()
            .filter(|m| self.is_match(&m.name))
            .collect()
    }
}

/// One-shot convenience: compile `pattern` and apply it.
pub fn filter_by_name(monitors: Vec<Monitor>, pattern: &str) -> Result<Vec<Monitor>, FilterError> {
    Ok(NameFilter::new(pattern)?.apply(monitors))
}
