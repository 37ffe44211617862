// Integration tests for grid pathfinding

use algoscope::commands::pathfinding::parse_coord;
use algoscope::config::PlaybackConfig;
use algoscope::model::grid::{Coord, GridState};
use algoscope::playback::Session;
use algoscope::runners::pathfinding::{self, PathAlgorithm};
use algoscope::snapshot::{ElementId, ResultMarker};

const MAZE: &str = "
    S...#....
    .##.#.##.
    ...3#....
    #.#...#.#
    ....#...F
";

const WEIGHTED: &str = "
    S19..
    .#9#.
    .1111
    .#.#F
";

/// Plain O(n^2) Dijkstra over the grid, used as an independent reference
fn reference_cost(grid: &GridState) -> Option<u32> {
    let n = grid.rows * grid.cols;
    let index = |at: Coord| at.0 * grid.cols + at.1;
    let mut dist: Vec<Option<u32>> = vec![None; n];
    let mut done = vec![false; n];
    dist[index(grid.start)] = Some(0);
    loop {
        let next = (0..n)
            .filter(|&i| !done[i])
            .filter_map(|i| dist[i].map(|d| (d, i)))
            .min();
        let Some((d, i)) = next else {
            break;
        };
        done[i] = true;
        let at = (i / grid.cols, i % grid.cols);
        for nb in grid.neighbors(at) {
            let candidate = d + grid.cell(nb).weight;
            if dist[index(nb)].map_or(true, |cur| candidate < cur) {
                dist[index(nb)] = Some(candidate);
            }
        }
    }
    dist[index(grid.finish)]
}

fn path_of(result: Option<&ResultMarker>) -> Vec<Coord> {
    match result {
        Some(ResultMarker::Path(cells)) => cells
            .iter()
            .map(|id| match id {
                ElementId::Cell(r, c) => (*r, *c),
                other => panic!("unexpected path element {:?}", other),
            })
            .collect(),
        other => panic!("expected a path, got {:?}", other),
    }
}

fn cost_of(grid: &GridState, path: &[Coord]) -> u32 {
    path.iter().skip(1).map(|&at| grid.cell(at).weight).sum()
}

fn assert_connected(grid: &GridState, path: &[Coord]) {
    assert_eq!(path.first(), Some(&grid.start));
    assert_eq!(path.last(), Some(&grid.finish));
    for pair in path.windows(2) {
        assert!(grid.neighbors(pair[0]).contains(&pair[1]), "{:?}", pair);
    }
}

#[test]
fn test_weighted_algorithms_match_reference() {
    for layout in [MAZE, WEIGHTED] {
        let grid = GridState::parse(layout).unwrap();
        let expected = reference_cost(&grid).expect("reachable");
        for algorithm in [PathAlgorithm::Dijkstra, PathAlgorithm::AStar] {
            let timeline = pathfinding::run(&grid, algorithm);
            let path = path_of(timeline.last().result());
            assert_connected(&grid, &path);
            assert_eq!(cost_of(&grid, &path), expected, "{:?}", algorithm);
        }
    }
}

#[test]
fn test_bfs_finds_fewest_cells() {
    let grid = GridState::parse(MAZE).unwrap();
    let timeline = pathfinding::run(&grid, PathAlgorithm::Bfs);
    let path = path_of(timeline.last().result());
    assert_connected(&grid, &path);
    // BFS ignores the weighted cell and counts moves only
    assert_eq!(path.len() - 1, 12);
}

#[test]
fn test_dfs_finds_some_path() {
    let grid = GridState::parse(MAZE).unwrap();
    let timeline = pathfinding::run(&grid, PathAlgorithm::Dfs);
    assert_connected(&grid, &path_of(timeline.last().result()));
}

#[test]
fn test_walled_off_finish_is_narrated() {
    let grid = GridState::parse("S.#\n..#\n##F").unwrap();
    for algorithm in [
        PathAlgorithm::Dijkstra,
        PathAlgorithm::AStar,
        PathAlgorithm::Bfs,
        PathAlgorithm::Dfs,
    ] {
        let timeline = pathfinding::run(&grid, algorithm);
        assert_eq!(timeline.last().result(), Some(&ResultMarker::NotFound));
        assert!(timeline.last().message().starts_with("No path found"));
    }
}

#[test]
fn test_runs_are_deterministic() {
    let grid = GridState::parse(MAZE).unwrap();
    assert_eq!(
        pathfinding::run(&grid, PathAlgorithm::AStar),
        pathfinding::run(&grid, PathAlgorithm::AStar)
    );
}

#[test]
fn test_session_grid_editing() {
    let grid = GridState::parse("S..\n...\n..F").unwrap();
    let mut session = Session::new(grid, PlaybackConfig::batch());
    session.run(PathAlgorithm::Bfs).unwrap();
    assert!(session.controller().timeline().is_some());

    // an edit drops the installed timeline and the old search marks
    assert!(session.toggle_wall(parse_coord("1,1").unwrap()).unwrap());
    assert!(session.controller().timeline().is_none());
    assert!(session.committed().is_wall((1, 1)));
    assert!(session.committed().cell((0, 1)).distance.is_none());

    assert!(session.toggle_wall(session.committed().start).is_err());
    assert!(session.set_weight((5, 5), 3).is_err());
    assert!(parse_coord("1;1").is_err());

    session.set_start((0, 2)).unwrap();
    session.run(PathAlgorithm::Dijkstra).unwrap();
    session.seek(usize::MAX);
    let path = path_of(session.current_step().unwrap().result());
    assert_eq!(path, vec![(0, 2), (1, 2), (2, 2)]);
}

#[test]
fn test_weights_outside_digit_range_are_rejected() {
    let grid = GridState::parse("S..F\n....").unwrap();
    let mut session = Session::new(grid, PlaybackConfig::batch());
    assert!(session.set_weight((0, 1), u32::MAX).is_err());
    assert!(session.set_weight((0, 1), 0).is_err());
    assert_eq!(session.committed().cell((0, 1)).weight, 1);

    session.set_weight((0, 1), 9).unwrap();
    session.set_weight((0, 2), 9).unwrap();
    for algorithm in [PathAlgorithm::Dijkstra, PathAlgorithm::AStar, PathAlgorithm::Bfs] {
        session.run(algorithm).unwrap();
        session.seek(usize::MAX);
        let path = path_of(session.current_step().unwrap().result());
        assert_eq!(path.last(), Some(&(0, 3)), "{:?}", algorithm);
    }

    session.run(PathAlgorithm::Dijkstra).unwrap();
    session.seek(usize::MAX);
    let path = path_of(session.current_step().unwrap().result());
    assert_eq!(path, vec![(0, 0), (1, 0), (1, 1), (1, 2), (1, 3), (0, 3)]);
}
