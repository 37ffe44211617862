//! Immutable step history of one operation

use super::{DomainKind, Step};

/// The complete ordered sequence of steps for one operation.
///
/// A timeline always holds at least one step and has no mutating API; a new
/// operation produces a new timeline instead of appending to this one.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<S> {
    kind: DomainKind,
    steps: Vec<Step<S>>,
}

impl<S> Timeline<S> {
    /// Build from recorded steps. Returns `None` for an empty sequence.
    pub(crate) fn from_steps(kind: DomainKind, steps: Vec<Step<S>>) -> Option<Self> {
        if steps.is_empty() {
            None
        } else {
            Some(Timeline { kind, steps })
        }
    }

    pub fn kind(&self) -> DomainKind {
        self.kind
    }

    /// Get a step by index
    pub fn get(&self, index: usize) -> Option<&Step<S>> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false, kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn first(&self) -> &Step<S> {
        &self.steps[0]
    }

    pub fn last(&self) -> &Step<S> {
        &self.steps[self.steps.len() - 1]
    }

    pub fn steps(&self) -> &[Step<S>] {
        &self.steps
    }

    /// Messages of every step, in order
    pub fn messages(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.message()).collect()
    }

    pub(crate) fn into_steps(self) -> Vec<Step<S>> {
        self.steps
    }
}
