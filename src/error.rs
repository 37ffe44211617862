//! Input validation errors
//!
//! This module defines [`InputError`], the only error type the library surfaces.
//! It covers malformed or out-of-range caller input, which is rejected before an
//! algorithm runner is invoked, so no timeline is ever generated for it.
//!
//! Conditions that arise *while* an algorithm runs (stack overflow, full hash
//! table, value not found, unreachable target) are not errors: they are recorded
//! as the final narrated step of the timeline.

use thiserror::Error;

/// Result type for command validation.
pub type Result<T> = std::result::Result<T, InputError>;

/// Input rejected before an algorithm runner starts
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// A token that should have been an integer
    #[error("'{0}' is not a number")]
    NotANumber(String),

    /// A number outside the accepted range
    #[error("{value} is out of range ({min}..={max})")]
    OutOfRange { value: i64, min: i64, max: i64 },

    /// No input where at least one element is required
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// More elements than the visualizer accepts
    #[error("{what} has {len} elements, at most {max} are supported")]
    TooLarge {
        what: &'static str,
        len: usize,
        max: usize,
    },

    /// Binary search needs ascending input
    #[error("values must be sorted in ascending order (index {index} breaks the order)")]
    Unsorted { index: usize },

    /// A graph node id that does not exist
    #[error("node {id} does not exist (graph has {count} nodes)")]
    UnknownNode { id: usize, count: usize },

    /// Playback speed outside the accepted multiplier range
    #[error("speed must be between 0.01 and 100, got {0}")]
    InvalidSpeed(f64),

    /// Malformed grid coordinates or layout
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// Stack, queue or hash table capacity of zero or too large
    #[error("invalid capacity {0}")]
    InvalidCapacity(usize),

    /// Knapsack item that could not be parsed or is degenerate
    #[error("invalid item '{0}' (expected weight:value with weight > 0)")]
    InvalidItem(String),
}

/// Parse a single integer token, trimming surrounding whitespace
pub fn parse_value(token: &str) -> Result<i64> {
    let trimmed = token.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))
}

/// Parse a comma separated list of integers (`"5, 3,9"`)
pub fn parse_values(list: &str) -> Result<Vec<i64>> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }
    list.split(',').map(parse_value).collect()
}

/// Reject values outside `min..=max`
pub fn check_range(value: i64, min: i64, max: i64) -> Result<i64> {
    if value < min || value > max {
        return Err(InputError::OutOfRange { value, min, max });
    }
    Ok(value)
}

/// Reject collections longer than `max`
pub fn check_len(what: &'static str, len: usize, max: usize) -> Result<()> {
    if len > max {
        return Err(InputError::TooLarge { what, len, max });
    }
    Ok(())
}
