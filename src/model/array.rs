//! Array states for sorting and binary search

use super::bracketed;
use crate::snapshot::{DomainKind, DomainState};
use std::collections::BTreeSet;

/// An array being sorted, with the indices already in final position
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArrayState {
    pub values: Vec<i64>,
    pub sorted: BTreeSet<usize>,
}

impl ArrayState {
    pub fn new(values: Vec<i64>) -> Self {
        ArrayState {
            values,
            sorted: BTreeSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check the non-decreasing order invariant
    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }

    pub fn mark_sorted(&mut self, index: usize) {
        self.sorted.insert(index);
    }

    pub fn mark_all_sorted(&mut self) {
        self.sorted = (0..self.values.len()).collect();
    }
}

impl DomainState for ArrayState {
    fn kind(&self) -> DomainKind {
        DomainKind::Sorting
    }

    fn describe(&self) -> Vec<String> {
        let cells: Vec<String> = self
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                if self.sorted.contains(&i) {
                    format!("{}*", v)
                } else {
                    v.to_string()
                }
            })
            .collect();
        vec![
            format!("values: [{}]", cells.join(", ")),
            format!("sorted: {}/{}", self.sorted.len(), self.values.len()),
        ]
    }
}

/// A sorted array under binary search.
///
/// `window` is the inclusive `(low, high)` range still under consideration,
/// `None` once it is exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub values: Vec<i64>,
    pub target: i64,
    pub window: Option<(usize, usize)>,
    pub mid: Option<usize>,
}

impl SearchState {
    pub fn new(values: Vec<i64>, target: i64) -> Self {
        let window = if values.is_empty() {
            None
        } else {
            Some((0, values.len() - 1))
        };
        SearchState {
            values,
            target,
            window,
            mid: None,
        }
    }

    pub fn low(&self) -> Option<usize> {
        self.window.map(|(low, _)| low)
    }

    pub fn high(&self) -> Option<usize> {
        self.window.map(|(_, high)| high)
    }
}

impl DomainState for SearchState {
    fn kind(&self) -> DomainKind {
        DomainKind::BinarySearch
    }

    fn describe(&self) -> Vec<String> {
        let mut lines = vec![
            format!("values: {}", bracketed(&self.values)),
            format!("target: {}", self.target),
        ];
        match self.window {
            Some((low, high)) => lines.push(format!("low={} high={}", low, high)),
            None => lines.push("window exhausted".to_string()),
        }
        if let Some(mid) = self.mid {
            lines.push(format!("mid={} ({})", mid, self.values[mid]));
        }
        lines
    }
}
