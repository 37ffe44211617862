// Integration tests for the dynamic programming runners

use algoscope::commands::dp::parse_items;
use algoscope::config::PlaybackConfig;
use algoscope::model::dp::{DpGrid, DpPhase};
use algoscope::playback::Session;
use algoscope::runners::dp::{self, Item};
use algoscope::snapshot::{ElementId, NullRecorder, ResultMarker, Role, Timeline};

/// Every cell read by a computing step must already hold a value
fn assert_dependencies_filled_first(timeline: &Timeline<DpGrid>) {
    for step in timeline.steps() {
        for dep in step.highlighted().with_role(Role::Dependency) {
            let ElementId::Cell(r, c) = dep else {
                panic!("dependency on a non-cell element {:?}", dep);
            };
            assert!(
                step.snapshot().cell((r, c)).value.is_some(),
                "{}: dependency ({}, {}) is empty",
                step.message(),
                r,
                c
            );
        }
    }
}

#[test]
fn test_lcs_result() {
    let timeline = dp::lcs("ABC", "AC");
    let last = timeline.last();
    assert_eq!(last.result(), Some(&ResultMarker::Text("AC".to_string())));
    assert_eq!(last.message(), "LCS is \"AC\" (length 2)");
    let grid = last.snapshot();
    assert_eq!(grid.value((3, 2)), 2);
    assert_eq!(grid.phase, DpPhase::Done);
    assert_dependencies_filled_first(&timeline);
}

#[test]
fn test_lcs_of_disjoint_strings_is_empty() {
    let timeline = dp::lcs("AB", "CD");
    assert_eq!(
        timeline.last().result(),
        Some(&ResultMarker::Text(String::new()))
    );
    assert_eq!(timeline.last().snapshot().value((2, 2)), 0);
}

#[test]
fn test_knapsack_best_value() {
    let items = parse_items("1:1, 3:4, 4:5, 5:7").unwrap();
    let timeline = dp::knapsack(&items, 7);
    assert_eq!(timeline.last().result(), Some(&ResultMarker::Value(9)));
    assert_dependencies_filled_first(&timeline);

    let mut grid = dp::knapsack_grid(&items, 7);
    let (best, chosen) = dp::knapsack_with(&mut grid, &items, 7, &mut NullRecorder);
    assert_eq!(best, 9);
    let weight: usize = chosen.iter().map(|&i| items[i - 1].weight).sum();
    let value: i64 = chosen.iter().map(|&i| items[i - 1].value).sum();
    assert!(weight <= 7);
    assert_eq!(value, 9);
}

#[test]
fn test_knapsack_nothing_fits() {
    let items = [Item::new(5, 10)];
    let timeline = dp::knapsack(&items, 4);
    assert_eq!(timeline.last().result(), Some(&ResultMarker::Value(0)));
}

#[test]
fn test_fibonacci() {
    let timeline = dp::fibonacci(10);
    assert_eq!(timeline.last().result(), Some(&ResultMarker::Value(55)));
    assert_dependencies_filled_first(&timeline);

    let timeline = dp::fibonacci(92);
    assert_eq!(
        timeline.last().result(),
        Some(&ResultMarker::Value(7_540_113_804_746_346_429))
    );
}

#[test]
fn test_fibonacci_overflow_is_narrated() {
    let timeline = dp::fibonacci(93);
    assert_eq!(timeline.last().result(), Some(&ResultMarker::NotFound));
    assert_eq!(
        timeline.last().message(),
        "Overflow: fib(93) does not fit in 64 bits"
    );
}

#[test]
fn test_session_validation() {
    let empty = DpGrid::new("", Vec::new(), Vec::new());
    let mut session = Session::new(empty, PlaybackConfig::batch());
    assert!(session.fibonacci(-1).is_err());
    assert!(session.fibonacci(93).is_err());
    assert!(session.knapsack(&[], 5).is_err());
    assert!(session.lcs(&"X".repeat(40), "X").is_err());
    assert!(session.controller().timeline().is_none());

    session.lcs("AGGTAB", "GXTXAYB").unwrap();
    session.seek(usize::MAX);
    assert_eq!(
        session.current_step().unwrap().result(),
        Some(&ResultMarker::Text("GTAB".to_string()))
    );
}

#[test]
fn test_parse_items_rejects_garbage() {
    assert!(parse_items("3").is_err());
    assert!(parse_items("0:5").is_err());
    assert!(parse_items("a:b").is_err());
    assert_eq!(parse_items("2:3").unwrap(), vec![Item::new(2, 3)]);
}

#[test]
fn test_tables_are_deterministic() {
    assert_eq!(dp::lcs("AGGTAB", "GXTXAYB"), dp::lcs("AGGTAB", "GXTXAYB"));
    let items = parse_items("1:1, 3:4, 4:5, 5:7").unwrap();
    assert_eq!(dp::knapsack(&items, 7), dp::knapsack(&items, 7));
    assert_eq!(dp::fibonacci(12), dp::fibonacci(12));
}
