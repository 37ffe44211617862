//! Domain commands
//!
//! Each submodule adds an `impl Session<State>` block for one domain. A
//! command validates its input against the session's configuration, runs the
//! algorithm on a copy of the committed model and launches the resulting
//! timeline. Invalid input returns an [`InputError`] and leaves the session
//! untouched.
//!
//! Tree, hash table and linked list/stack/queue operations are published
//! step by step when pacing is enabled; everything else installs its whole
//! timeline at once.

pub mod dp;
pub mod graph;
pub mod hash;
pub mod linear;
pub mod pathfinding;
pub mod search;
pub mod sorting;
pub mod tree;

use crate::config::MAX_VALUE;
use crate::error::{check_range, InputError, Result};
use tracing::warn;

/// Log a rejected command and pass the error on
pub(crate) fn rejected(command: &'static str) -> impl Fn(InputError) -> InputError {
    move |e| {
        warn!(command, error = %e, "input rejected");
        e
    }
}

/// Reject values whose magnitude exceeds [`MAX_VALUE`]
pub(crate) fn check_value(value: i64) -> Result<i64> {
    check_range(value, -MAX_VALUE, MAX_VALUE)
}

pub(crate) fn check_values(values: &[i64]) -> Result<()> {
    values.iter().try_for_each(|&v| check_value(v).map(|_| ()))
}
