// Integration tests for graph traversal and Dijkstra

use algoscope::commands::graph::{parse_edges, parse_node};
use algoscope::config::{PlaybackConfig, DEFAULT_MAX_ELEMENTS};
use algoscope::model::graph::GraphState;
use algoscope::playback::Session;
use algoscope::runners::graph::{self, GraphAlgorithm};
use algoscope::snapshot::{ElementId, ResultMarker};

/// Bellman-Ford over the edge list, used as an independent reference
fn reference_distances(graph: &GraphState, start: usize) -> Vec<Option<u64>> {
    let n = graph.node_count();
    let mut dist: Vec<Option<u64>> = vec![None; n];
    dist[start] = Some(0);
    for _ in 0..n {
        for e in &graph.edges {
            let mut relax = |a: usize, b: usize| {
                if let Some(d) = dist[a] {
                    let candidate = d + e.weight as u64;
                    if dist[b].map_or(true, |cur| candidate < cur) {
                        dist[b] = Some(candidate);
                    }
                }
            };
            relax(e.from, e.to);
            if !graph.directed {
                relax(e.to, e.from);
            }
        }
    }
    dist
}

fn distances(timeline_result: Option<&ResultMarker>) -> Vec<Option<u64>> {
    match timeline_result {
        Some(ResultMarker::Distances(d)) => d.clone(),
        other => panic!("expected distances, got {:?}", other),
    }
}

#[test]
fn test_dijkstra_matches_reference_on_sample() {
    let sample = GraphState::sample();
    for start in 0..sample.node_count() {
        let timeline = graph::run(&sample, GraphAlgorithm::Dijkstra, start, None);
        assert_eq!(
            distances(timeline.last().result()),
            reference_distances(&sample, start),
            "start {}",
            start
        );
    }
}

#[test]
fn test_dijkstra_matches_reference_on_directed_graph() {
    let edges = "A-B:7, A-C:1, C-B:2, B-D:1, C-D:9";
    let graph = parse_edges(5, edges, true, DEFAULT_MAX_ELEMENTS).unwrap();
    let timeline = graph::run(&graph, GraphAlgorithm::Dijkstra, 0, None);
    let got = distances(timeline.last().result());
    assert_eq!(got, reference_distances(&graph, 0));
    assert_eq!(got, vec![Some(0), Some(3), Some(1), Some(4), None]);
}

#[test]
fn test_dijkstra_path_to_target() {
    let sample = GraphState::sample();
    let timeline = graph::run(&sample, GraphAlgorithm::Dijkstra, 0, Some(3));
    let expected: Vec<ElementId> = [0, 2, 4, 3].iter().map(|&n| ElementId::Node(n)).collect();
    assert_eq!(timeline.last().result(), Some(&ResultMarker::Path(expected)));
    assert_eq!(timeline.last().message(), "Shortest path A -> C -> E -> D (cost 9)");
}

#[test]
fn test_bfs_visits_every_reachable_node_once() {
    let sample = GraphState::sample();
    let timeline = graph::run(&sample, GraphAlgorithm::Bfs, 0, None);
    let order = &timeline.last().snapshot().visit_order;
    assert_eq!(order.len(), sample.node_count());
    assert_eq!(order[0], 0);
    let mut sorted = order.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), order.len());
}

#[test]
fn test_dfs_and_bfs_report_visit_order() {
    let graph = parse_edges(4, "A-B, A-C, B-D", false, DEFAULT_MAX_ELEMENTS).unwrap();
    let bfs = graph::run(&graph, GraphAlgorithm::Bfs, 0, None);
    assert_eq!(bfs.last().snapshot().visit_order, vec![0, 1, 2, 3]);
    let dfs = graph::run(&graph, GraphAlgorithm::Dfs, 0, None);
    assert_eq!(dfs.last().snapshot().visit_order, vec![0, 1, 3, 2]);
}

#[test]
fn test_unreachable_target_is_narrated() {
    let graph = parse_edges(3, "A-B", false, DEFAULT_MAX_ELEMENTS).unwrap();
    let timeline = graph::run(&graph, GraphAlgorithm::Bfs, 0, Some(2));
    assert_eq!(timeline.last().result(), Some(&ResultMarker::NotFound));
    assert!(timeline.last().message().contains("unreachable"));
}

#[test]
fn test_session_validates_nodes() {
    let mut session = Session::new(GraphState::sample(), PlaybackConfig::batch());
    assert!(session.run(GraphAlgorithm::Bfs, 17, None).is_err());
    assert!(session.controller().timeline().is_none());

    let target = parse_node(session.committed(), "F").unwrap();
    session.run(GraphAlgorithm::Dijkstra, 0, Some(target)).unwrap();
    assert!(session.total_steps() > 1);
    assert_eq!(session.committed().visit_order.first(), Some(&0));
}

#[test]
fn test_runs_are_deterministic() {
    let sample = GraphState::sample();
    for algorithm in [GraphAlgorithm::Bfs, GraphAlgorithm::Dfs, GraphAlgorithm::Dijkstra] {
        assert_eq!(
            graph::run(&sample, algorithm, 0, Some(5)),
            graph::run(&sample, algorithm, 0, Some(5)),
            "{:?}",
            algorithm
        );
    }
}

#[test]
fn test_oversized_node_count_is_rejected() {
    assert!(parse_edges(DEFAULT_MAX_ELEMENTS + 1, "A-B", false, DEFAULT_MAX_ELEMENTS).is_err());
    assert!(parse_edges(usize::MAX, "", true, DEFAULT_MAX_ELEMENTS).is_err());
}
