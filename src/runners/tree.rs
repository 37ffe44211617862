//! BST and AVL operations
//!
//! Insertion performs the usual BST descent. For AVL trees the heights along
//! the insertion path are then recomputed bottom-up and any node with
//! `|balance| > 1` is fixed with a single (LL/RR) or double (LR/RL) rotation.
//! A double rotation is chosen when the inserted value lies on the inner side
//! of the heavy child. Removal uses the in-order successor and rebalances by
//! the heavy child's own balance.
//!
//! Duplicates and missing values end the timeline with a narrated step; they
//! never leave the tree partially modified.

use crate::model::tree::{TreeKind, TreeState};
use crate::model::NodeId;
use crate::snapshot::{
    DomainKind, ElementId, Highlights, NullRecorder, Recorder, ResultMarker, Role, Timeline,
    TimelineRecorder,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TraversalOrder {
    InOrder,
    PreOrder,
    PostOrder,
    LevelOrder,
}

impl TraversalOrder {
    fn name(self) -> &'static str {
        match self {
            TraversalOrder::InOrder => "in-order",
            TraversalOrder::PreOrder => "pre-order",
            TraversalOrder::PostOrder => "post-order",
            TraversalOrder::LevelOrder => "level-order",
        }
    }
}

/// How the imbalance at a node is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Case {
    LeftLeft,
    LeftRight,
    RightRight,
    RightLeft,
}

impl Case {
    fn name(self) -> &'static str {
        match self {
            Case::LeftLeft => "left-left",
            Case::LeftRight => "left-right",
            Case::RightRight => "right-right",
            Case::RightLeft => "right-left",
        }
    }
}

fn node(id: NodeId) -> ElementId {
    ElementId::Node(id)
}

fn one(id: NodeId, role: Role) -> Highlights {
    Highlights::new().with(node(id), role)
}

// Timelines start from a compacted copy; node ids are stable within one
// timeline only.

/// Narrated insertion of one value into a copy of `tree`
pub fn insert(tree: &TreeState, value: i64) -> Timeline<TreeState> {
    let mut working = tree.compacted();
    let mut rec = TimelineRecorder::new(DomainKind::Tree);
    insert_with(&mut working, value, &mut rec);
    rec.finish(&working)
}

/// Narrated insertion of several values into one timeline
pub fn insert_many(tree: &TreeState, values: &[i64]) -> Timeline<TreeState> {
    let mut working = tree.compacted();
    let mut rec = TimelineRecorder::new(DomainKind::Tree);
    for &value in values {
        insert_with(&mut working, value, &mut rec);
    }
    rec.finish(&working)
}

/// Instant bulk build through the same insertion core
pub fn build(kind: TreeKind, values: &[i64]) -> TreeState {
    let mut tree = TreeState::new(kind);
    for &value in values {
        insert_with(&mut tree, value, &mut NullRecorder);
    }
    tree
}

pub fn search(tree: &TreeState, value: i64) -> Timeline<TreeState> {
    let mut working = tree.compacted();
    let mut rec = TimelineRecorder::new(DomainKind::Tree);
    search_with(&mut working, value, &mut rec);
    rec.finish(&working)
}

pub fn remove(tree: &TreeState, value: i64) -> Timeline<TreeState> {
    let mut working = tree.compacted();
    let mut rec = TimelineRecorder::new(DomainKind::Tree);
    remove_with(&mut working, value, &mut rec);
    rec.finish(&working)
}

pub fn traverse(tree: &TreeState, order: TraversalOrder) -> Timeline<TreeState> {
    let tree = tree.compacted();
    let mut rec = TimelineRecorder::new(DomainKind::Tree);
    traverse_with(&tree, order, &mut rec);
    rec.finish(&tree)
}

/// Insert `value`; returns false (and leaves the tree untouched) for a
/// duplicate
pub fn insert_with<R: Recorder<TreeState>>(
    tree: &mut TreeState,
    value: i64,
    rec: &mut R,
) -> bool {
    rec.record(tree, Highlights::new(), format!("Inserting {}", value));

    let Some(root) = tree.root else {
        let id = tree.alloc(value);
        tree.root = Some(id);
        rec.record(
            tree,
            one(id, Role::Inserted),
            format!("Tree was empty: {} becomes the root", value),
        );
        return true;
    };

    let mut path = Vec::new();
    let mut current = root;
    loop {
        path.push(current);
        let v = tree.value(current);
        if value == v {
            rec.record_result(
                tree,
                one(current, Role::Found),
                format!("{} already exists in the tree, nothing inserted", value),
                ResultMarker::Found(current),
            );
            return false;
        }
        let go_left = value < v;
        rec.record(
            tree,
            one(current, Role::Visiting),
            format!(
                "{} {} {}: go {}",
                value,
                if go_left { "<" } else { ">" },
                v,
                if go_left { "left" } else { "right" }
            ),
        );
        let next = if go_left {
            tree.left(current)
        } else {
            tree.right(current)
        };
        match next {
            Some(child) => current = child,
            None => {
                let id = tree.alloc(value);
                if go_left {
                    tree.set_left(current, Some(id));
                } else {
                    tree.set_right(current, Some(id));
                }
                rec.record(
                    tree,
                    one(id, Role::Inserted),
                    format!(
                        "Inserted {} as the {} child of {}",
                        value,
                        if go_left { "left" } else { "right" },
                        v
                    ),
                );
                break;
            }
        }
    }

    retrace(tree, &path, rec, |tree, id, bf| {
        // inner side of the heavy child means a double rotation
        if bf > 1 {
            let child = tree.left(id).map_or(value, |c| tree.value(c));
            if value < child {
                Case::LeftLeft
            } else {
                Case::LeftRight
            }
        } else {
            let child = tree.right(id).map_or(value, |c| tree.value(c));
            if value > child {
                Case::RightRight
            } else {
                Case::RightLeft
            }
        }
    });

    rec.record(tree, Highlights::new(), format!("Insertion of {} complete", value));
    true
}

pub fn search_with<R: Recorder<TreeState>>(
    tree: &mut TreeState,
    value: i64,
    rec: &mut R,
) -> Option<NodeId> {
    rec.record(tree, Highlights::new(), format!("Searching for {}", value));
    let mut current = tree.root;
    while let Some(id) = current {
        let v = tree.value(id);
        if v == value {
            rec.record_result(
                tree,
                one(id, Role::Found),
                format!("Found {}", value),
                ResultMarker::Found(id),
            );
            return Some(id);
        }
        let go_left = value < v;
        rec.record(
            tree,
            one(id, Role::Visiting),
            format!(
                "{} {} {}: go {}",
                value,
                if go_left { "<" } else { ">" },
                v,
                if go_left { "left" } else { "right" }
            ),
        );
        current = if go_left { tree.left(id) } else { tree.right(id) };
    }
    rec.record_result(
        tree,
        Highlights::new(),
        format!("Not found: {} is not in the tree", value),
        ResultMarker::NotFound,
    );
    None
}

/// Remove `value`; returns false when it is not present
pub fn remove_with<R: Recorder<TreeState>>(
    tree: &mut TreeState,
    value: i64,
    rec: &mut R,
) -> bool {
    rec.record(tree, Highlights::new(), format!("Removing {}", value));

    let mut path = Vec::new();
    let mut current = tree.root;
    let target = loop {
        let Some(id) = current else {
            rec.record_result(
                tree,
                Highlights::new(),
                format!("Not found: {} is not in the tree, nothing removed", value),
                ResultMarker::NotFound,
            );
            return false;
        };
        let v = tree.value(id);
        if v == value {
            rec.record(tree, one(id, Role::Found), format!("Found {}", value));
            break id;
        }
        rec.record(
            tree,
            one(id, Role::Visiting),
            format!("{} {} {}", value, if value < v { "<" } else { ">" }, v),
        );
        path.push(id);
        current = if value < v { tree.left(id) } else { tree.right(id) };
    };

    match (tree.left(target), tree.right(target)) {
        (Some(_), Some(right)) => {
            path.push(target);
            let mut successor = right;
            while let Some(next) = tree.left(successor) {
                rec.record(
                    tree,
                    one(successor, Role::Visiting),
                    "Looking for the in-order successor".to_string(),
                );
                path.push(successor);
                successor = next;
            }
            let succ_value = tree.value(successor);
            rec.record(
                tree,
                Highlights::new()
                    .with(node(target), Role::Removed)
                    .with(node(successor), Role::Swapping),
                format!("Successor is {}: copy it into the removed position", succ_value),
            );
            if let Some(n) = tree.node_mut(target) {
                n.value = succ_value;
            }
            let parent = path.last().copied();
            let succ_right = tree.right(successor);
            replace_child(tree, parent, successor, succ_right);
            tree.release(successor);
            rec.record(
                tree,
                one(target, Role::Inserted),
                format!("Removed {}, {} took its place", value, succ_value),
            );
        }
        (left, right) => {
            let child = left.or(right);
            let parent = path.last().copied();
            replace_child(tree, parent, target, child);
            tree.release(target);
            let message = match child {
                Some(c) => format!("Removed {}, child {} moves up", value, tree.value(c)),
                None => format!("Removed leaf {}", value),
            };
            rec.record(tree, Highlights::new(), message);
        }
    }

    retrace(tree, &path, rec, |tree, id, bf| {
        if bf > 1 {
            let child_bf = tree.left(id).map_or(0, |c| tree.balance(c));
            if child_bf >= 0 {
                Case::LeftLeft
            } else {
                Case::LeftRight
            }
        } else {
            let child_bf = tree.right(id).map_or(0, |c| tree.balance(c));
            if child_bf <= 0 {
                Case::RightRight
            } else {
                Case::RightLeft
            }
        }
    });

    rec.record(tree, Highlights::new(), format!("Removal of {} complete", value));
    true
}

pub fn traverse_with<R: Recorder<TreeState>>(
    tree: &TreeState,
    order: TraversalOrder,
    rec: &mut R,
) -> Vec<i64> {
    let mut ids = Vec::with_capacity(tree.len());
    match order {
        TraversalOrder::LevelOrder => {
            let mut queue = std::collections::VecDeque::new();
            queue.extend(tree.root);
            while let Some(id) = queue.pop_front() {
                ids.push(id);
                queue.extend(tree.left(id));
                queue.extend(tree.right(id));
            }
        }
        _ => collect_depth_first(tree, tree.root, order, &mut ids),
    }

    rec.record(
        tree,
        Highlights::new(),
        format!("Starting {} traversal", order.name()),
    );
    let mut visited = Highlights::new();
    let mut values = Vec::with_capacity(ids.len());
    for &id in &ids {
        values.push(tree.value(id));
        let mut h = visited.clone();
        h.insert(node(id), Role::Visiting);
        rec.record(
            tree,
            h,
            format!("Visit {} ({} so far)", tree.value(id), values.len()),
        );
        visited.insert(node(id), Role::Visited);
    }
    let listing: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    rec.record_result(
        tree,
        visited,
        format!("{} traversal: {}", order.name(), listing.join(" ")),
        ResultMarker::Path(ids.iter().map(|&id| node(id)).collect()),
    );
    values
}

fn collect_depth_first(
    tree: &TreeState,
    id: Option<NodeId>,
    order: TraversalOrder,
    out: &mut Vec<NodeId>,
) {
    let Some(id) = id else {
        return;
    };
    if order == TraversalOrder::PreOrder {
        out.push(id);
    }
    collect_depth_first(tree, tree.left(id), order, out);
    if order == TraversalOrder::InOrder {
        out.push(id);
    }
    collect_depth_first(tree, tree.right(id), order, out);
    if order == TraversalOrder::PostOrder {
        out.push(id);
    }
}

/// Point `parent`'s link (or the root) at `new` instead of `old`
fn replace_child(tree: &mut TreeState, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
    match parent {
        None => tree.root = new,
        Some(p) if tree.left(p) == Some(old) => tree.set_left(p, new),
        Some(p) => tree.set_right(p, new),
    }
}

/// Walk `path` (root first) bottom-up, recomputing heights and, for AVL
/// trees, rebalancing every node whose balance leaves `-1..=1`
fn retrace<R, F>(tree: &mut TreeState, path: &[NodeId], rec: &mut R, classify: F)
where
    R: Recorder<TreeState>,
    F: Fn(&TreeState, NodeId, i32) -> Case,
{
    for (depth, &id) in path.iter().enumerate().rev() {
        let before = tree.height(Some(id));
        tree.update_height(id);
        if tree.kind != TreeKind::Avl {
            continue;
        }
        let after = tree.height(Some(id));
        let bf = tree.balance(id);
        let v = tree.value(id);
        if bf.abs() <= 1 {
            if before != after {
                rec.record(
                    tree,
                    one(id, Role::Active),
                    format!("Height of {} is now {} (balance {})", v, after, bf),
                );
            }
            continue;
        }

        let case = classify(tree, id, bf);
        rec.record(
            tree,
            one(id, Role::Pivot),
            format!("{} is unbalanced (balance {}): {} case", v, bf, case.name()),
        );
        let parent = if depth == 0 { None } else { Some(path[depth - 1]) };
        match case {
            Case::LeftLeft => {
                rotate_right(tree, id, parent, rec);
            }
            Case::RightRight => {
                rotate_left(tree, id, parent, rec);
            }
            Case::LeftRight => {
                if let Some(child) = tree.left(id) {
                    rotate_left(tree, child, Some(id), rec);
                }
                rotate_right(tree, id, parent, rec);
            }
            Case::RightLeft => {
                if let Some(child) = tree.right(id) {
                    rotate_right(tree, child, Some(id), rec);
                }
                rotate_left(tree, id, parent, rec);
            }
        }
    }
}

fn rotate_left<R: Recorder<TreeState>>(
    tree: &mut TreeState,
    x: NodeId,
    parent: Option<NodeId>,
    rec: &mut R,
) -> NodeId {
    let Some(y) = tree.right(x) else {
        return x;
    };
    rec.record(
        tree,
        Highlights::new()
            .with(node(x), Role::Rotating)
            .with(node(y), Role::Pivot),
        format!(
            "Left rotation at {}: {} moves up",
            tree.value(x),
            tree.value(y)
        ),
    );
    let inner = tree.left(y);
    tree.set_right(x, inner);
    tree.set_left(y, Some(x));
    tree.update_height(x);
    tree.update_height(y);
    replace_child(tree, parent, x, Some(y));
    rec.record(
        tree,
        Highlights::new()
            .with(node(x), Role::Rotating)
            .with(node(y), Role::Pivot),
        format!(
            "After left rotation: {} (h={}) is the subtree root, {} has h={}",
            tree.value(y),
            tree.height(Some(y)),
            tree.value(x),
            tree.height(Some(x))
        ),
    );
    y
}

fn rotate_right<R: Recorder<TreeState>>(
    tree: &mut TreeState,
    y: NodeId,
    parent: Option<NodeId>,
    rec: &mut R,
) -> NodeId {
    let Some(x) = tree.left(y) else {
        return y;
    };
    rec.record(
        tree,
        Highlights::new()
            .with(node(y), Role::Rotating)
            .with(node(x), Role::Pivot),
        format!(
            "Right rotation at {}: {} moves up",
            tree.value(y),
            tree.value(x)
        ),
    );
    let inner = tree.right(x);
    tree.set_left(y, inner);
    tree.set_right(x, Some(y));
    tree.update_height(y);
    tree.update_height(x);
    replace_child(tree, parent, y, Some(x));
    rec.record(
        tree,
        Highlights::new()
            .with(node(y), Role::Rotating)
            .with(node(x), Role::Pivot),
        format!(
            "After right rotation: {} (h={}) is the subtree root, {} has h={}",
            tree.value(x),
            tree.height(Some(x)),
            tree.value(y),
            tree.height(Some(y))
        ),
    );
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_rotation_left_right() {
        let tree = build(TreeKind::Avl, &[30, 10]);
        let timeline = insert(&tree, 20);
        let messages = timeline.messages();
        assert!(messages.iter().any(|m| m.contains("left-right case")));
        assert!(messages.iter().any(|m| m.starts_with("Left rotation at 10")));
        assert!(messages.iter().any(|m| m.starts_with("Right rotation at 30")));

        let last = timeline.last().snapshot();
        assert_eq!(last.value(last.root.unwrap()), 20);
        assert!(last.is_balanced());
    }

    #[test]
    fn test_bst_does_not_rotate() {
        let tree = build(TreeKind::Bst, &[1, 2, 3, 4]);
        assert_eq!(tree.height(tree.root), 4);
        assert_eq!(tree.values_in_order(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_traversal_orders() {
        let tree = build(TreeKind::Bst, &[4, 2, 6, 1, 3]);
        let mut rec = NullRecorder;
        assert_eq!(
            traverse_with(&tree, TraversalOrder::InOrder, &mut rec),
            vec![1, 2, 3, 4, 6]
        );
        assert_eq!(
            traverse_with(&tree, TraversalOrder::PreOrder, &mut rec),
            vec![4, 2, 1, 3, 6]
        );
        assert_eq!(
            traverse_with(&tree, TraversalOrder::PostOrder, &mut rec),
            vec![1, 3, 2, 6, 4]
        );
        assert_eq!(
            traverse_with(&tree, TraversalOrder::LevelOrder, &mut rec),
            vec![4, 2, 6, 1, 3]
        );
    }
}
