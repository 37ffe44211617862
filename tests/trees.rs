// Integration tests for BST and AVL trees

use std::time::Duration;

use algoscope::config::PlaybackConfig;
use algoscope::model::tree::{TreeKind, TreeState};
use algoscope::playback::Session;
use algoscope::runners::tree::{self, TraversalOrder};
use algoscope::snapshot::ResultMarker;

fn root_value(tree: &TreeState) -> i64 {
    tree.value(tree.root.expect("non-empty tree"))
}

#[test]
fn test_avl_single_left_rotation() {
    let tree = tree::build(TreeKind::Avl, &[1, 2]);
    let timeline = tree::insert(&tree, 3);

    let rotations: Vec<&str> = timeline
        .messages()
        .into_iter()
        .filter(|m| m.starts_with("Left rotation"))
        .collect();
    assert_eq!(rotations.len(), 1);
    assert!(!timeline
        .messages()
        .iter()
        .any(|m| m.starts_with("Right rotation")));

    let last = timeline.last().snapshot();
    assert_eq!(root_value(last), 2);
    assert!(last.is_balanced());
    assert_eq!(last.values_in_order(), vec![1, 2, 3]);
}

#[test]
fn test_avl_stays_balanced_under_sequential_inserts() {
    let values: Vec<i64> = (1..=31).collect();
    let avl = tree::build(TreeKind::Avl, &values);
    assert!(avl.is_balanced());
    assert!(avl.is_search_tree());
    assert_eq!(avl.height(avl.root), 5);

    let bst = tree::build(TreeKind::Bst, &values);
    assert_eq!(bst.height(bst.root), 31);
}

#[test]
fn test_bulk_build_matches_narrated_inserts() {
    let values = [50, 20, 70, 10, 30, 25, 27];
    let built = tree::build(TreeKind::Avl, &values);
    let narrated = tree::insert_many(&TreeState::new(TreeKind::Avl), &values);
    assert_eq!(narrated.last().snapshot(), &built);
}

#[test]
fn test_duplicate_insert_leaves_tree_unchanged() {
    let tree = tree::build(TreeKind::Bst, &[8, 4, 12]);
    let timeline = tree::insert(&tree, 4);
    assert_eq!(timeline.last().snapshot(), &tree);
    assert!(matches!(
        timeline.last().result(),
        Some(ResultMarker::Found(_))
    ));
}

#[test]
fn test_remove_with_two_children_uses_successor() {
    let tree = tree::build(TreeKind::Bst, &[8, 4, 12, 10, 14]);
    let timeline = tree::remove(&tree, 12);
    let last = timeline.last().snapshot();
    assert_eq!(last.values_in_order(), vec![4, 8, 10, 14]);
    assert!(last.is_search_tree());
    assert!(timeline
        .messages()
        .iter()
        .any(|m| m.starts_with("Successor is 14")));
}

#[test]
fn test_remove_missing_value_is_narrated() {
    let tree = tree::build(TreeKind::Avl, &[2, 1, 3]);
    let timeline = tree::remove(&tree, 9);
    assert_eq!(timeline.last().result(), Some(&ResultMarker::NotFound));
    assert_eq!(timeline.last().snapshot(), &tree);
}

#[test]
fn test_search_path() {
    let tree = tree::build(TreeKind::Bst, &[8, 4, 12, 10]);
    let timeline = tree::search(&tree, 10);
    assert!(matches!(
        timeline.last().result(),
        Some(ResultMarker::Found(_))
    ));
    let timeline = tree::search(&tree, 11);
    assert_eq!(timeline.last().result(), Some(&ResultMarker::NotFound));
}

#[test]
fn test_traversal_result_lists_values() {
    let tree = tree::build(TreeKind::Bst, &[4, 2, 6]);
    let timeline = tree::traverse(&tree, TraversalOrder::PreOrder);
    assert_eq!(timeline.last().message(), "pre-order traversal: 4 2 6");
    // visit steps plus the opening and closing steps
    assert_eq!(timeline.len(), 5);
}

#[test]
fn test_paced_insert_through_session() {
    let config = PlaybackConfig {
        pace_delay: Duration::from_millis(100),
        ..PlaybackConfig::default()
    };
    let mut session = Session::new(TreeState::new(TreeKind::Avl), config);
    session.build(&[1, 2]).unwrap();
    session.insert(3).unwrap();
    assert!(session.is_generating());
    assert_eq!(session.total_steps(), 1);

    while session.is_generating() {
        session.tick(Duration::from_millis(100));
    }
    assert_eq!(root_value(session.committed()), 2);
    assert_eq!(session.cursor_index() + 1, session.total_steps());
    assert_eq!(session.narration().len(), session.total_steps());
}

#[test]
fn test_session_rejects_out_of_range_values() {
    let mut session = Session::new(TreeState::new(TreeKind::Bst), PlaybackConfig::batch());
    assert!(session.insert(1_000_000).is_err());
    assert!(session.committed().is_empty());
    assert!(session.traverse(TraversalOrder::InOrder).is_err());
}

#[test]
fn test_avl_remove_rebalances_with_single_rotation() {
    let tree = tree::build(TreeKind::Avl, &[2, 1, 4, 3, 5]);
    assert!(tree.is_balanced());
    let timeline = tree::remove(&tree, 1);

    let messages = timeline.messages();
    assert!(messages.iter().any(|m| m.starts_with("Left rotation at 2")));
    assert!(!messages.iter().any(|m| m.starts_with("Right rotation")));

    let last = timeline.last().snapshot();
    assert_eq!(root_value(last), 4);
    assert!(last.is_balanced());
    assert!(last.is_search_tree());
    assert_eq!(last.values_in_order(), vec![2, 3, 4, 5]);
}

#[test]
fn test_avl_remove_rebalances_with_double_rotation() {
    let tree = tree::build(TreeKind::Avl, &[2, 1, 5, 4]);
    let timeline = tree::remove(&tree, 1);

    let messages = timeline.messages();
    assert!(messages.iter().any(|m| m.starts_with("Right rotation at 5")));
    assert!(messages.iter().any(|m| m.starts_with("Left rotation at 2")));

    let last = timeline.last().snapshot();
    assert_eq!(root_value(last), 4);
    assert!(last.is_balanced());
    assert_eq!(last.values_in_order(), vec![2, 4, 5]);
}

#[test]
fn test_avl_stays_balanced_while_draining() {
    let values: Vec<i64> = (1..=31).collect();
    let mut current = tree::build(TreeKind::Avl, &values);
    for v in (1..=31).step_by(2).chain((2..=30).step_by(2)) {
        let timeline = tree::remove(&current, v);
        current = timeline.last().snapshot().clone();
        assert!(current.is_balanced(), "unbalanced after removing {}", v);
        assert!(current.is_search_tree(), "out of order after removing {}", v);
        assert_eq!(current.find(v), None);
    }
    assert!(current.is_empty());
}

#[test]
fn test_tree_operations_are_deterministic() {
    let tree = tree::build(TreeKind::Avl, &[50, 30, 70, 20, 40, 60, 80]);
    assert_eq!(tree::insert(&tree, 35), tree::insert(&tree, 35));
    assert_eq!(tree::remove(&tree, 30), tree::remove(&tree, 30));
    assert_eq!(tree::search(&tree, 60), tree::search(&tree, 60));
    assert_eq!(
        tree::traverse(&tree, TraversalOrder::LevelOrder),
        tree::traverse(&tree, TraversalOrder::LevelOrder)
    );
}

#[test]
fn test_arena_does_not_grow_across_operations() {
    let values: Vec<i64> = (1..=10).collect();
    let mut session = Session::new(TreeState::new(TreeKind::Avl), PlaybackConfig::batch());
    session.build(&values).unwrap();
    for _ in 0..50 {
        session.insert(100).unwrap();
        session.remove(100).unwrap();
        session.remove(5).unwrap();
        session.insert(5).unwrap();
        assert!(session.committed().slot_count() <= values.len() + 1);
    }
    assert_eq!(session.committed().values_in_order(), values);
    assert!(session.committed().is_balanced());
}
