//! Weighted graph with traversal bookkeeping
//!
//! Besides the node and edge sets the state carries everything a traversal
//! exposes to the learner: per-node and per-edge status, the auxiliary
//! frontier (queue, stack or priority list), the distance and predecessor
//! tables, and the visit order.

use super::NodeId;
use crate::error::{InputError, Result};
use crate::snapshot::{DomainKind, DomainState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Unvisited,
    Frontier,
    Current,
    Visited,
    Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStatus {
    Idle,
    Considering,
    Tree,
    Path,
}

/// Discipline of the auxiliary structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierKind {
    Queue,
    Stack,
    Priority,
}

/// One entry of the auxiliary structure; `priority` is the tentative
/// distance for Dijkstra's priority list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierEntry {
    pub node: NodeId,
    pub priority: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphState {
    pub labels: Vec<String>,
    pub edges: Vec<Edge>,
    pub directed: bool,
    pub node_status: Vec<NodeStatus>,
    pub edge_status: Vec<EdgeStatus>,
    pub frontier_kind: Option<FrontierKind>,
    pub frontier: Vec<FrontierEntry>,
    pub distances: Vec<Option<u64>>,
    pub previous: Vec<Option<NodeId>>,
    pub visit_order: Vec<NodeId>,
}

impl GraphState {
    pub fn new(labels: Vec<String>, directed: bool) -> Self {
        let n = labels.len();
        GraphState {
            labels,
            edges: Vec::new(),
            directed,
            node_status: vec![NodeStatus::Unvisited; n],
            edge_status: Vec::new(),
            frontier_kind: None,
            frontier: Vec::new(),
            distances: vec![None; n],
            previous: vec![None; n],
            visit_order: Vec::new(),
        }
    }

    /// Graph with nodes labelled `A`, `B`, ... and the given weighted edges
    pub fn with_edges(
        node_count: usize,
        edges: &[(NodeId, NodeId, u32)],
        directed: bool,
    ) -> Result<Self> {
        let labels = (0..node_count).map(default_label).collect();
        let mut graph = GraphState::new(labels, directed);
        for &(from, to, weight) in edges {
            graph.add_edge(from, to, weight)?;
        }
        Ok(graph)
    }

    /// The six-node weighted graph used when no graph is supplied
    pub fn sample() -> Self {
        let edges = [
            (0, 1, 4),
            (0, 2, 2),
            (1, 2, 5),
            (1, 3, 10),
            (2, 4, 3),
            (4, 3, 4),
            (3, 5, 11),
        ];
        match GraphState::with_edges(6, &edges, false) {
            Ok(graph) => graph,
            Err(_) => unreachable!("sample edges reference existing nodes"),
        }
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn check_node(&self, id: NodeId) -> Result<NodeId> {
        if id >= self.node_count() {
            return Err(InputError::UnknownNode {
                id,
                count: self.node_count(),
            });
        }
        Ok(id)
    }

    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: u32) -> Result<usize> {
        self.check_node(from)?;
        self.check_node(to)?;
        self.edges.push(Edge { from, to, weight });
        self.edge_status.push(EdgeStatus::Idle);
        Ok(self.edges.len() - 1)
    }

    pub fn label(&self, id: NodeId) -> &str {
        self.labels.get(id).map_or("?", |s| s.as_str())
    }

    /// Outgoing `(edge index, neighbour, weight)` triples, sorted by
    /// neighbour id then edge index so traversals are deterministic
    pub fn neighbors(&self, node: NodeId) -> Vec<(usize, NodeId, u32)> {
        let mut out: Vec<(usize, NodeId, u32)> = self
            .edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| {
                if e.from == node {
                    Some((i, e.to, e.weight))
                } else if !self.directed && e.to == node {
                    Some((i, e.from, e.weight))
                } else {
                    None
                }
            })
            .collect();
        out.sort_by_key(|&(i, n, _)| (n, i));
        out
    }

    /// Clear every piece of traversal bookkeeping
    pub fn reset_traversal(&mut self) {
        let n = self.node_count();
        self.node_status = vec![NodeStatus::Unvisited; n];
        self.edge_status = vec![EdgeStatus::Idle; self.edges.len()];
        self.frontier_kind = None;
        self.frontier.clear();
        self.distances = vec![None; n];
        self.previous = vec![None; n];
        self.visit_order.clear();
    }

    /// Edge index joining two nodes, honouring direction
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<usize> {
        self.edges.iter().position(|e| {
            (e.from == from && e.to == to) || (!self.directed && e.from == to && e.to == from)
        })
    }

    /// Walk predecessor links back from `target`; `None` when unreachable
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        self.distances.get(target).copied().flatten()?;
        let mut path = vec![target];
        let mut current = target;
        while let Some(prev) = self.previous[current] {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        Some(path)
    }

    fn frontier_line(&self) -> String {
        let name = match self.frontier_kind {
            Some(FrontierKind::Queue) => "queue",
            Some(FrontierKind::Stack) => "stack",
            Some(FrontierKind::Priority) => "priority",
            None => return "frontier: -".to_string(),
        };
        let items: Vec<String> = self
            .frontier
            .iter()
            .map(|e| match e.priority {
                Some(p) => format!("{}({})", self.label(e.node), p),
                None => self.label(e.node).to_string(),
            })
            .collect();
        format!("{}: [{}]", name, items.join(", "))
    }
}

/// `A`..`Z`, then `N26`, `N27`, ...
pub fn default_label(i: usize) -> String {
    if i < 26 {
        ((b'A' + i as u8) as char).to_string()
    } else {
        format!("N{}", i)
    }
}

impl DomainState for GraphState {
    fn kind(&self) -> DomainKind {
        DomainKind::Graph
    }

    fn describe(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (id, label) in self.labels.iter().enumerate() {
            let status = match self.node_status[id] {
                NodeStatus::Unvisited => "",
                NodeStatus::Frontier => " [frontier]",
                NodeStatus::Current => " [current]",
                NodeStatus::Visited => " [visited]",
                NodeStatus::Path => " [path]",
            };
            let dist = match self.distances[id] {
                Some(d) => format!(" d={}", d),
                None => String::new(),
            };
            let adj: Vec<String> = self
                .neighbors(id)
                .iter()
                .map(|&(_, n, w)| format!("{}:{}", self.label(n), w))
                .collect();
            lines.push(format!("{}{}{} -> {}", label, status, dist, adj.join(" ")));
        }
        lines.push(self.frontier_line());
        if !self.visit_order.is_empty() {
            let order: Vec<&str> = self.visit_order.iter().map(|&n| self.label(n)).collect();
            lines.push(format!("visited: {}", order.join(" ")));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_are_sorted_and_undirected() {
        let graph = GraphState::with_edges(3, &[(0, 2, 1), (1, 0, 7)], false).unwrap();
        let n: Vec<NodeId> = graph.neighbors(0).iter().map(|&(_, n, _)| n).collect();
        assert_eq!(n, vec![1, 2]);
        assert_eq!(graph.edge_between(2, 0), Some(0));
    }

    #[test]
    fn test_directed_edges_are_one_way() {
        let graph = GraphState::with_edges(2, &[(0, 1, 1)], true).unwrap();
        assert_eq!(graph.neighbors(1).len(), 0);
        assert_eq!(graph.edge_between(1, 0), None);
    }

    #[test]
    fn test_unknown_node_rejected() {
        let mut graph = GraphState::new(vec!["A".into()], false);
        assert_eq!(
            graph.add_edge(0, 3, 1),
            Err(InputError::UnknownNode { id: 3, count: 1 })
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(default_label(0), "A");
        assert_eq!(default_label(25), "Z");
        assert_eq!(default_label(26), "N26");
    }
}
