use super::rejected;
use crate::error::{check_len, InputError, Result};
use crate::model::graph::GraphState;
use crate::model::NodeId;
use crate::playback::{Publish, Session};
use crate::runners::graph::{self, GraphAlgorithm};
use rustc_hash::FxHashMap;
use tracing::info;

/// Resolve a node given by label (`"C"`) or by index (`"2"`)
pub fn parse_node(graph: &GraphState, token: &str) -> Result<NodeId> {
    let token = token.trim();
    let by_label: FxHashMap<&str, NodeId> = graph
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| (label.as_str(), i))
        .collect();
    if let Some(&id) = by_label.get(token) {
        return Ok(id);
    }
    let id = token
        .parse::<usize>()
        .map_err(|_| InputError::NotANumber(token.to_string()))?;
    graph.check_node(id)
}

/// Parse `"A-B:4, B-C"` into weighted edges; the weight defaults to 1.
/// `node_count` is checked against `max` before any node is allocated.
pub fn parse_edges(
    node_count: usize,
    list: &str,
    directed: bool,
    max: usize,
) -> Result<GraphState> {
    if node_count == 0 {
        return Err(InputError::Empty("graph"));
    }
    check_len("graph", node_count, max)?;
    let mut graph = GraphState::with_edges(node_count, &[], directed)?;
    for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (ends, weight) = match item.split_once(':') {
            Some((ends, w)) => {
                let w = w
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| InputError::NotANumber(w.trim().to_string()))?;
                (ends, w)
            }
            None => (item, 1),
        };
        let (from, to) = ends
            .split_once('-')
            .ok_or_else(|| InputError::NotANumber(item.to_string()))?;
        let from = parse_node(&graph, from)?;
        let to = parse_node(&graph, to)?;
        graph.add_edge(from, to, weight)?;
    }
    Ok(graph)
}

impl Session<GraphState> {
    /// Traverse from `start`, optionally stopping at `target`
    pub fn run(
        &mut self,
        algorithm: GraphAlgorithm,
        start: NodeId,
        target: Option<NodeId>,
    ) -> Result<()> {
        let current = self.committed();
        current.check_node(start).map_err(rejected("run"))?;
        if let Some(t) = target {
            current.check_node(t).map_err(rejected("run"))?;
        }
        info!(algorithm = algorithm.name(), start, ?target, "graph traversal");
        let timeline = graph::run(current, algorithm, start, target);
        self.launch(timeline, Publish::Batch);
        Ok(())
    }

    /// Install a new graph
    pub fn load(&mut self, graph: GraphState) -> Result<()> {
        let max = self.config().max_elements;
        check_len("graph", graph.node_count(), max).map_err(rejected("load"))?;
        if graph.node_count() == 0 {
            return Err(InputError::Empty("graph")).map_err(rejected("load"));
        }
        self.replace(graph);
        Ok(())
    }

    /// Forget the last traversal, keeping nodes and edges
    pub fn reset(&mut self) {
        let mut graph = self.committed().clone();
        graph.reset_traversal();
        self.replace(graph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_ELEMENTS as MAX;

    #[test]
    fn test_parse_edges() {
        let graph = parse_edges(3, "A-B:4, 1-2", false, MAX).unwrap();
        assert_eq!(graph.edges.len(), 2);
        let first = graph.edges[0];
        assert_eq!((first.from, first.to, first.weight), (0, 1, 4));
        assert_eq!(graph.edges[1].weight, 1);
    }

    #[test]
    fn test_parse_edges_rejects_unknown_nodes() {
        assert_eq!(
            parse_edges(2, "0-5", false, MAX).unwrap_err(),
            InputError::UnknownNode { id: 5, count: 2 }
        );
        assert!(parse_edges(2, "A:B", false, MAX).is_err());
    }

    #[test]
    fn test_node_count_is_checked_first() {
        assert_eq!(
            parse_edges(usize::MAX, "A-B", false, MAX).unwrap_err(),
            InputError::TooLarge {
                what: "graph",
                len: usize::MAX,
                max: MAX
            }
        );
        assert_eq!(
            parse_edges(0, "", false, MAX).unwrap_err(),
            InputError::Empty("graph")
        );
    }
}
