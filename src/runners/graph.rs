//! Graph traversals: BFS, DFS and Dijkstra
//!
//! The auxiliary structure of each traversal (FIFO queue, LIFO stack or the
//! priority list ordered by tentative distance) is part of every recorded
//! snapshot so the learner can watch its discipline.

use crate::model::graph::{EdgeStatus, FrontierEntry, FrontierKind, GraphState, NodeStatus};
use crate::model::NodeId;
use crate::snapshot::{
    DomainKind, ElementId, Highlights, Recorder, ResultMarker, Role, Timeline, TimelineRecorder,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GraphAlgorithm {
    Bfs,
    Dfs,
    Dijkstra,
}

impl GraphAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            GraphAlgorithm::Bfs => "BFS",
            GraphAlgorithm::Dfs => "DFS",
            GraphAlgorithm::Dijkstra => "Dijkstra",
        }
    }
}

/// Run `algorithm` from `start` on a copy of `graph`. With a `target` the
/// search stops once it is reached and the path is reconstructed.
pub fn run(
    graph: &GraphState,
    algorithm: GraphAlgorithm,
    start: NodeId,
    target: Option<NodeId>,
) -> Timeline<GraphState> {
    let mut state = graph.clone();
    let mut rec = TimelineRecorder::new(DomainKind::Graph);
    run_with(&mut state, algorithm, start, target, &mut rec);
    rec.finish(&state)
}

pub fn run_with<R: Recorder<GraphState>>(
    state: &mut GraphState,
    algorithm: GraphAlgorithm,
    start: NodeId,
    target: Option<NodeId>,
    rec: &mut R,
) {
    state.reset_traversal();
    if start >= state.node_count() {
        rec.record_result(
            state,
            Highlights::new(),
            format!("Start node {} does not exist", start),
            ResultMarker::NotFound,
        );
        return;
    }

    match algorithm {
        GraphAlgorithm::Bfs => bfs(state, start, target, rec),
        GraphAlgorithm::Dfs => dfs(state, start, target, rec),
        GraphAlgorithm::Dijkstra => dijkstra(state, start, target, rec),
    }
    conclude(state, algorithm, start, target, rec);
}

fn node(id: NodeId) -> ElementId {
    ElementId::Node(id)
}

fn push(state: &mut GraphState, id: NodeId, priority: Option<u64>) {
    state.frontier.push(FrontierEntry { node: id, priority });
    state.node_status[id] = NodeStatus::Frontier;
}

fn visit(state: &mut GraphState, id: NodeId) {
    state.node_status[id] = NodeStatus::Current;
    state.visit_order.push(id);
}

fn bfs<R: Recorder<GraphState>>(
    state: &mut GraphState,
    start: NodeId,
    target: Option<NodeId>,
    rec: &mut R,
) {
    state.frontier_kind = Some(FrontierKind::Queue);
    state.distances[start] = Some(0);
    push(state, start, None);
    rec.record(
        state,
        Highlights::new().with(node(start), Role::Frontier),
        format!("BFS from {}: enqueue {}", state.label(start), state.label(start)),
    );

    while !state.frontier.is_empty() {
        let u = state.frontier.remove(0).node;
        visit(state, u);
        rec.record(
            state,
            Highlights::new().with(node(u), Role::Visiting),
            format!("Dequeue {} and visit it", state.label(u)),
        );
        if target == Some(u) {
            state.node_status[u] = NodeStatus::Visited;
            return;
        }

        for (edge, v, _) in state.neighbors(u) {
            let h = Highlights::new()
                .with(node(u), Role::Visiting)
                .with(ElementId::Edge(edge), Role::Active)
                .with(node(v), Role::Comparing);
            if state.node_status[v] == NodeStatus::Unvisited {
                state.distances[v] = state.distances[u].map(|d| d + 1);
                state.previous[v] = Some(u);
                state.edge_status[edge] = EdgeStatus::Tree;
                push(state, v, None);
                rec.record(
                    state,
                    h,
                    format!("{} is undiscovered: enqueue it", state.label(v)),
                );
            } else {
                rec.record(
                    state,
                    h,
                    format!("{} was already discovered, skip", state.label(v)),
                );
            }
        }
        state.node_status[u] = NodeStatus::Visited;
    }
}

fn dfs<R: Recorder<GraphState>>(
    state: &mut GraphState,
    start: NodeId,
    target: Option<NodeId>,
    rec: &mut R,
) {
    state.frontier_kind = Some(FrontierKind::Stack);
    state.distances[start] = Some(0);
    push(state, start, None);
    rec.record(
        state,
        Highlights::new().with(node(start), Role::Frontier),
        format!("DFS from {}: push {}", state.label(start), state.label(start)),
    );

    while let Some(entry) = state.frontier.pop() {
        let u = entry.node;
        if state.node_status[u] == NodeStatus::Visited {
            rec.record(
                state,
                Highlights::new().with(node(u), Role::Visited),
                format!("Pop {}: already visited, skip", state.label(u)),
            );
            continue;
        }
        if let Some(p) = state.previous[u] {
            state.distances[u] = state.distances[p].map(|d| d + 1);
            if let Some(edge) = state.edge_between(p, u) {
                state.edge_status[edge] = EdgeStatus::Tree;
            }
        }
        visit(state, u);
        rec.record(
            state,
            Highlights::new().with(node(u), Role::Visiting),
            format!("Pop {} and visit it", state.label(u)),
        );
        if target == Some(u) {
            state.node_status[u] = NodeStatus::Visited;
            return;
        }

        // reverse so the smallest neighbour ends on top of the stack
        let mut pushed = Vec::new();
        for (_, v, _) in state.neighbors(u).into_iter().rev() {
            if state.node_status[v] != NodeStatus::Visited {
                state.previous[v] = Some(u);
                push(state, v, None);
                pushed.push(v);
            }
        }
        state.node_status[u] = NodeStatus::Visited;
        if !pushed.is_empty() {
            let names: Vec<&str> = pushed.iter().map(|&v| state.label(v)).collect();
            let message = format!(
                "Push unvisited neighbours of {}: {}",
                state.label(u),
                names.join(", ")
            );
            let h: Highlights = pushed.iter().map(|&v| (node(v), Role::Frontier)).collect();
            rec.record(state, h, message);
        }
    }
}

fn dijkstra<R: Recorder<GraphState>>(
    state: &mut GraphState,
    start: NodeId,
    target: Option<NodeId>,
    rec: &mut R,
) {
    state.frontier_kind = Some(FrontierKind::Priority);
    state.distances[start] = Some(0);
    push(state, start, Some(0));
    rec.record(
        state,
        Highlights::new().with(node(start), Role::Frontier),
        format!("Dijkstra from {}: distance 0, every other node inf", state.label(start)),
    );

    let mut tree_edge: Vec<Option<usize>> = vec![None; state.node_count()];
    while !state.frontier.is_empty() {
        state.frontier.sort_by_key(|e| (e.priority, e.node));
        let entry = state.frontier.remove(0);
        let u = entry.node;
        let du = state.distances[u].unwrap_or(0);
        visit(state, u);
        rec.record(
            state,
            Highlights::new().with(node(u), Role::Visiting),
            format!("Extract {} with the smallest distance {}", state.label(u), du),
        );
        if target == Some(u) {
            state.node_status[u] = NodeStatus::Visited;
            return;
        }

        for (edge, v, w) in state.neighbors(u) {
            if state.node_status[v] == NodeStatus::Visited {
                continue;
            }
            let candidate = du + u64::from(w);
            let h = Highlights::new()
                .with(node(u), Role::Visiting)
                .with(ElementId::Edge(edge), Role::Active)
                .with(node(v), Role::Relaxing);
            match state.distances[v] {
                Some(dv) if candidate >= dv => {
                    rec.record(
                        state,
                        h,
                        format!(
                            "Edge {}-{}: {} + {} = {} is not shorter than {}",
                            state.label(u),
                            state.label(v),
                            du,
                            w,
                            candidate,
                            dv
                        ),
                    );
                }
                old => {
                    state.distances[v] = Some(candidate);
                    state.previous[v] = Some(u);
                    if let Some(prev_edge) = tree_edge[v] {
                        state.edge_status[prev_edge] = EdgeStatus::Idle;
                    }
                    tree_edge[v] = Some(edge);
                    state.edge_status[edge] = EdgeStatus::Tree;
                    match state.frontier.iter_mut().find(|e| e.node == v) {
                        Some(e) => e.priority = Some(candidate),
                        None => push(state, v, Some(candidate)),
                    }
                    state.frontier.sort_by_key(|e| (e.priority, e.node));
                    let was = old.map_or_else(|| "inf".to_string(), |d| d.to_string());
                    rec.record(
                        state,
                        h,
                        format!(
                            "Relax {}-{}: distance of {} improves from {} to {}",
                            state.label(u),
                            state.label(v),
                            state.label(v),
                            was,
                            candidate
                        ),
                    );
                }
            }
        }
        state.node_status[u] = NodeStatus::Visited;
    }
}

fn conclude<R: Recorder<GraphState>>(
    state: &mut GraphState,
    algorithm: GraphAlgorithm,
    start: NodeId,
    target: Option<NodeId>,
    rec: &mut R,
) {
    let Some(target) = target else {
        match algorithm {
            GraphAlgorithm::Dijkstra => {
                let distances = state.distances.clone();
                rec.record_result(
                    state,
                    Highlights::new(),
                    format!("All nodes reachable from {} are settled", state.label(start)),
                    ResultMarker::Distances(distances),
                );
            }
            _ => {
                let order: Vec<&str> = state.visit_order.iter().map(|&n| state.label(n)).collect();
                let message = format!("{} visit order: {}", algorithm.name(), order.join(" "));
                let path = state.visit_order.iter().map(|&n| node(n)).collect();
                rec.record_result(state, Highlights::new(), message, ResultMarker::Path(path));
            }
        }
        return;
    };

    let Some(path) = state.path_to(target) else {
        rec.record_result(
            state,
            Highlights::new().with(node(target), Role::Collision),
            format!(
                "Target {} is unreachable from {}",
                state.label(target),
                state.label(start)
            ),
            ResultMarker::NotFound,
        );
        return;
    };

    let mut h = Highlights::new();
    for (i, &n) in path.iter().enumerate() {
        state.node_status[n] = NodeStatus::Path;
        h.insert(node(n), Role::Path);
        if i > 0 {
            if let Some(edge) = state.edge_between(path[i - 1], n) {
                state.edge_status[edge] = EdgeStatus::Path;
                h.insert(ElementId::Edge(edge), Role::Path);
            }
        }
        rec.record(state, h.clone(), format!("Path: {}", state.label(n)));
    }
    let names: Vec<&str> = path.iter().map(|&n| state.label(n)).collect();
    let cost = state.distances[target].unwrap_or(0);
    let message = match algorithm {
        GraphAlgorithm::Dijkstra => format!("Shortest path {} (cost {})", names.join(" -> "), cost),
        GraphAlgorithm::Bfs => format!("Path {} ({} edges)", names.join(" -> "), cost),
        GraphAlgorithm::Dfs => format!("Path found: {}", names.join(" -> ")),
    };
    rec.record_result(
        state,
        h,
        message,
        ResultMarker::Path(path.iter().map(|&n| node(n)).collect()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bfs_queue_is_fifo() {
        // A connects to B and C, B to D
        let graph = GraphState::with_edges(4, &[(0, 1, 1), (0, 2, 1), (1, 3, 1)], false).unwrap();
        let timeline = run(&graph, GraphAlgorithm::Bfs, 0, None);
        let last = timeline.last().snapshot();
        assert_eq!(last.visit_order, vec![0, 1, 2, 3]);

        // after visiting A the queue holds B then C
        let step = timeline
            .steps()
            .iter()
            .find(|s| s.message() == "C is undiscovered: enqueue it")
            .unwrap();
        let queued: Vec<NodeId> = step.snapshot().frontier.iter().map(|e| e.node).collect();
        assert_eq!(queued, vec![1, 2]);
    }

    #[test]
    fn test_dfs_goes_deep_first() {
        let graph = GraphState::with_edges(4, &[(0, 1, 1), (0, 2, 1), (1, 3, 1)], false).unwrap();
        let timeline = run(&graph, GraphAlgorithm::Dfs, 0, None);
        assert_eq!(timeline.last().snapshot().visit_order, vec![0, 1, 3, 2]);
    }

    #[test]
    fn test_invalid_start_is_narrated() {
        let graph = GraphState::sample();
        let timeline = run(&graph, GraphAlgorithm::Bfs, 42, None);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.last().result(), Some(&ResultMarker::NotFound));
    }
}
