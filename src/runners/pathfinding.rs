//! Shortest paths on a weighted 4-neighbour grid
//!
//! Dijkstra and A* honour cell weights (the cost of entering a cell); BFS and
//! DFS count hops. Once the finish is reached the predecessor chain is walked
//! back to the start as a separate run of steps.

use crate::model::grid::{CellKind, Coord, GridState};
use crate::snapshot::{
    DomainKind, ElementId, Highlights, Recorder, ResultMarker, Role, Timeline, TimelineRecorder,
};
use rustc_hash::FxHashSet;
use std::collections::{BTreeSet, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PathAlgorithm {
    Dijkstra,
    #[value(name = "astar")]
    AStar,
    Bfs,
    Dfs,
}

impl PathAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            PathAlgorithm::Dijkstra => "Dijkstra",
            PathAlgorithm::AStar => "A*",
            PathAlgorithm::Bfs => "BFS",
            PathAlgorithm::Dfs => "DFS",
        }
    }
}

fn cell(at: Coord) -> ElementId {
    ElementId::Cell(at.0, at.1)
}

pub fn run(grid: &GridState, algorithm: PathAlgorithm) -> Timeline<GridState> {
    let mut working = grid.clone();
    let mut rec = TimelineRecorder::new(DomainKind::Pathfinding);
    run_with(&mut working, algorithm, &mut rec);
    rec.finish(&working)
}

/// Search from `state.start` to `state.finish`. Returns the path, start first.
pub fn run_with<R: Recorder<GridState>>(
    state: &mut GridState,
    algorithm: PathAlgorithm,
    rec: &mut R,
) -> Option<Vec<Coord>> {
    state.clear_search();
    let (start, finish) = (state.start, state.finish);
    rec.record(
        state,
        Highlights::new()
            .with(cell(start), Role::Active)
            .with(cell(finish), Role::Active),
        format!(
            "{} from {:?} to {:?}",
            algorithm.name(),
            start,
            finish
        ),
    );

    let reached = match algorithm {
        PathAlgorithm::Dijkstra => best_first(state, false, rec),
        PathAlgorithm::AStar => best_first(state, true, rec),
        PathAlgorithm::Bfs => breadth_first(state, rec),
        PathAlgorithm::Dfs => depth_first(state, rec),
    };

    if !reached {
        rec.record_result(
            state,
            Highlights::new().with(cell(finish), Role::Active),
            format!("No path found: {:?} is unreachable", finish),
            ResultMarker::NotFound,
        );
        return None;
    }
    Some(reconstruct(state, rec))
}

fn visit_message(state: &GridState, at: Coord, astar: bool) -> String {
    let c = state.cell(at);
    match (astar, c.g, c.h, c.f) {
        (true, Some(g), Some(h), Some(f)) => {
            format!("Visit {:?} (g={}, h={}, f={})", at, g, h, f)
        }
        _ => format!("Visit {:?} (distance {})", at, c.distance.unwrap_or(0)),
    }
}

/// Dijkstra, or A* when `astar` is set. The open set orders by
/// `(priority, h, coord)` so ties resolve the same way every run.
fn best_first<R: Recorder<GridState>>(state: &mut GridState, astar: bool, rec: &mut R) -> bool {
    let start = state.start;
    let h0 = if astar { state.manhattan(start) } else { 0 };
    {
        let c = state.cell_mut(start);
        c.distance = Some(0);
        if astar {
            c.g = Some(0);
            c.h = Some(h0);
            c.f = Some(h0);
        }
    }
    let mut open: BTreeSet<(u32, u32, Coord)> = BTreeSet::new();
    open.insert((h0, h0, start));
    let mut closed: FxHashSet<Coord> = FxHashSet::default();

    while let Some((_, _, current)) = open.pop_first() {
        if !closed.insert(current) {
            continue;
        }
        state.mark(current, CellKind::Visited);
        let frontier: Highlights = open
            .iter()
            .filter(|(_, _, at)| !closed.contains(at))
            .map(|&(_, _, at)| (cell(at), Role::Frontier))
            .collect();
        let message = visit_message(state, current, astar);
        rec.record(state, frontier.with(cell(current), Role::Visiting), message);
        if current == state.finish {
            return true;
        }

        let base = state.cell(current).distance.unwrap_or(0);
        for next in state.neighbors(current) {
            if closed.contains(&next) {
                continue;
            }
            let cost = base.saturating_add(state.cell(next).weight);
            let known = state.cell(next).distance;
            if known.is_some_and(|d| cost >= d) {
                continue;
            }
            let h = if astar { state.manhattan(next) } else { 0 };
            let priority = cost.saturating_add(h);
            {
                let c = state.cell_mut(next);
                c.distance = Some(cost);
                c.previous = Some(current);
                if astar {
                    c.g = Some(cost);
                    c.h = Some(h);
                    c.f = Some(priority);
                }
            }
            open.insert((priority, h, next));
            let was = known.map_or("inf".to_string(), |d| d.to_string());
            let message = if astar {
                format!(
                    "Update {:?}: g={} (was {}), h={}, f={}",
                    next, cost, was, h, priority
                )
            } else {
                format!("Update {:?}: distance {} (was {})", next, cost, was)
            };
            rec.record(
                state,
                Highlights::new()
                    .with(cell(current), Role::Visiting)
                    .with(cell(next), Role::Relaxing),
                message,
            );
        }
    }
    false
}

fn breadth_first<R: Recorder<GridState>>(state: &mut GridState, rec: &mut R) -> bool {
    let start = state.start;
    state.cell_mut(start).distance = Some(0);
    let mut queue = VecDeque::from([start]);
    let mut discovered: FxHashSet<Coord> = FxHashSet::default();
    discovered.insert(start);

    while let Some(current) = queue.pop_front() {
        state.mark(current, CellKind::Visited);
        let message = visit_message(state, current, false);
        rec.record(
            state,
            Highlights::new().with(cell(current), Role::Visiting),
            message,
        );
        if current == state.finish {
            return true;
        }
        let hops = state.cell(current).distance.unwrap_or(0) + 1;
        let mut found = Vec::new();
        for next in state.neighbors(current) {
            if discovered.insert(next) {
                let c = state.cell_mut(next);
                c.distance = Some(hops);
                c.previous = Some(current);
                queue.push_back(next);
                found.push(next);
            }
        }
        if !found.is_empty() {
            let h: Highlights = queue.iter().map(|&at| (cell(at), Role::Frontier)).collect();
            rec.record(
                state,
                h.with(cell(current), Role::Visiting),
                format!("Enqueue {:?}", found),
            );
        }
    }
    false
}

fn depth_first<R: Recorder<GridState>>(state: &mut GridState, rec: &mut R) -> bool {
    let start = state.start;
    state.cell_mut(start).distance = Some(0);
    let mut stack = vec![start];
    let mut visited: FxHashSet<Coord> = FxHashSet::default();

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        state.mark(current, CellKind::Visited);
        let message = visit_message(state, current, false);
        rec.record(
            state,
            Highlights::new().with(cell(current), Role::Visiting),
            message,
        );
        if current == state.finish {
            return true;
        }
        let hops = state.cell(current).distance.unwrap_or(0) + 1;
        // reversed so the first neighbour (up) is explored first
        let mut pushed = Vec::new();
        for next in state.neighbors(current).into_iter().rev() {
            if visited.contains(&next) {
                continue;
            }
            let c = state.cell_mut(next);
            c.distance = Some(hops);
            c.previous = Some(current);
            stack.push(next);
            pushed.push(next);
        }
        if !pushed.is_empty() {
            let h: Highlights = stack
                .iter()
                .filter(|at| !visited.contains(*at))
                .map(|&at| (cell(at), Role::Frontier))
                .collect();
            rec.record(
                state,
                h.with(cell(current), Role::Visiting),
                format!("Push {:?}", pushed),
            );
        }
    }
    false
}

/// Walk predecessors from finish back to start, animating each cell
fn reconstruct<R: Recorder<GridState>>(state: &mut GridState, rec: &mut R) -> Vec<Coord> {
    let (start, finish) = (state.start, state.finish);
    rec.record(
        state,
        Highlights::new().with(cell(finish), Role::Found),
        format!("Reached {:?}, tracing the path back", finish),
    );

    let mut path = vec![finish];
    let mut at = finish;
    let mut lit = Highlights::new().with(cell(finish), Role::Path);
    while let Some(prev) = state.cell(at).previous {
        state.mark(prev, CellKind::Path);
        lit.insert(cell(prev), Role::Path);
        rec.record(state, lit.clone(), format!("Path: {:?}", prev));
        path.push(prev);
        at = prev;
        if at == start {
            break;
        }
    }
    path.reverse();

    let cost: u32 = path.iter().skip(1).map(|&at| state.cell(at).weight).sum();
    rec.record_result(
        state,
        lit,
        format!(
            "Path found: {} cells, cost {}",
            path.len(),
            cost
        ),
        ResultMarker::Path(path.iter().map(|&at| cell(at)).collect()),
    );
    path
}
