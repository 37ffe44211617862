//! A single frozen frame of an algorithm's execution

use std::collections::BTreeMap;
use std::fmt;

/// Identifies one visual element of a domain state.
///
/// Identifiers are stable for the lifetime of one timeline: array indices,
/// arena node ids, edge indices, grid coordinates, bucket positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementId {
    Index(usize),
    Node(usize),
    Edge(usize),
    Cell(usize, usize),
    Bucket(usize),
    /// Position `1` inside bucket `0` (chained hash tables)
    Entry(usize, usize),
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Index(i) => write!(f, "[{}]", i),
            ElementId::Node(id) => write!(f, "node {}", id),
            ElementId::Edge(id) => write!(f, "edge {}", id),
            ElementId::Cell(r, c) => write!(f, "({}, {})", r, c),
            ElementId::Bucket(b) => write!(f, "bucket {}", b),
            ElementId::Entry(b, p) => write!(f, "bucket {}#{}", b, p),
        }
    }
}

/// What an element is doing in a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Comparing,
    Swapping,
    Overwriting,
    Pivot,
    Sorted,
    Visiting,
    Visited,
    Frontier,
    Relaxing,
    Collision,
    Probing,
    Found,
    Path,
    Active,
    Computing,
    Dependency,
    Inserted,
    Removed,
    Rotating,
    Low,
    High,
    Mid,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Comparing => "comparing",
            Role::Swapping => "swapping",
            Role::Overwriting => "overwriting",
            Role::Pivot => "pivot",
            Role::Sorted => "sorted",
            Role::Visiting => "visiting",
            Role::Visited => "visited",
            Role::Frontier => "frontier",
            Role::Relaxing => "relaxing",
            Role::Collision => "collision",
            Role::Probing => "probing",
            Role::Found => "found",
            Role::Path => "path",
            Role::Active => "active",
            Role::Computing => "computing",
            Role::Dependency => "dependency",
            Role::Inserted => "inserted",
            Role::Removed => "removed",
            Role::Rotating => "rotating",
            Role::Low => "low",
            Role::High => "high",
            Role::Mid => "mid",
        }
    }
}

/// Role-tagged element set of one step.
///
/// Ordered so that two runs with the same input compare and print equally.
/// Inserting an element twice keeps the later role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlights(BTreeMap<ElementId, Role>);

impl Highlights {
    pub fn new() -> Self {
        Highlights(BTreeMap::new())
    }

    /// Builder form of [`Highlights::insert`]
    pub fn with(mut self, id: ElementId, role: Role) -> Self {
        self.0.insert(id, role);
        self
    }

    pub fn insert(&mut self, id: ElementId, role: Role) {
        self.0.insert(id, role);
    }

    pub fn role_of(&self, id: ElementId) -> Option<Role> {
        self.0.get(&id).copied()
    }

    /// All elements carrying `role`, in element order
    pub fn with_role(&self, role: Role) -> Vec<ElementId> {
        self.0
            .iter()
            .filter(|(_, r)| **r == role)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ElementId, &Role)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ElementId, Role)> for Highlights {
    fn from_iter<I: IntoIterator<Item = (ElementId, Role)>>(iter: I) -> Self {
        Highlights(iter.into_iter().collect())
    }
}

/// Final answer attached to the step that concludes an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultMarker {
    /// Index or node id where the target was found
    Found(usize),
    NotFound,
    /// Computed scalar (DP optimum, popped value, ...)
    Value(i64),
    /// Computed text (LCS string, traversal listing, ...)
    Text(String),
    /// Ordered elements of a reconstructed path or visit order
    Path(Vec<ElementId>),
    /// Final distance table, `None` for unreachable nodes
    Distances(Vec<Option<u64>>),
}

impl fmt::Display for ResultMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultMarker::Found(i) => write!(f, "found at {}", i),
            ResultMarker::NotFound => write!(f, "not found"),
            ResultMarker::Value(v) => write!(f, "{}", v),
            ResultMarker::Text(s) => write!(f, "\"{}\"", s),
            ResultMarker::Path(ids) => {
                let parts: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
                write!(f, "{}", parts.join(" -> "))
            }
            ResultMarker::Distances(d) => {
                let parts: Vec<String> = d
                    .iter()
                    .map(|d| d.map_or_else(|| "inf".to_string(), |d| d.to_string()))
                    .collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

/// One immutable frame of a timeline.
///
/// Steps are only created by a [`Recorder`](super::Recorder); consumers get
/// shared references through the [`Timeline`](super::Timeline).
#[derive(Debug, Clone, PartialEq)]
pub struct Step<S> {
    snapshot: S,
    highlighted: Highlights,
    message: String,
    result: Option<ResultMarker>,
}

impl<S> Step<S> {
    pub(crate) fn new(
        snapshot: S,
        highlighted: Highlights,
        message: String,
        result: Option<ResultMarker>,
    ) -> Self {
        Step {
            snapshot,
            highlighted,
            message,
            result,
        }
    }

    pub fn snapshot(&self) -> &S {
        &self.snapshot
    }

    pub fn highlighted(&self) -> &Highlights {
        &self.highlighted
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn result(&self) -> Option<&ResultMarker> {
        self.result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlights_keep_latest_role() {
        let h = Highlights::new()
            .with(ElementId::Index(2), Role::Comparing)
            .with(ElementId::Index(0), Role::Sorted)
            .with(ElementId::Index(2), Role::Swapping);
        assert_eq!(h.len(), 2);
        assert_eq!(h.role_of(ElementId::Index(2)), Some(Role::Swapping));
        assert_eq!(h.with_role(Role::Sorted), vec![ElementId::Index(0)]);
    }

    #[test]
    fn test_result_marker_display() {
        assert_eq!(ResultMarker::Found(4).to_string(), "found at 4");
        assert_eq!(
            ResultMarker::Distances(vec![Some(0), None]).to_string(),
            "[0, inf]"
        );
        assert_eq!(
            ResultMarker::Path(vec![ElementId::Node(0), ElementId::Node(3)]).to_string(),
            "node 0 -> node 3"
        );
    }
}
