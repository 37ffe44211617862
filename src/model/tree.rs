//! Binary search tree arena
//!
//! Nodes live in a slot vector addressed by [`NodeId`]. Removed nodes leave an
//! empty slot behind so that ids stay stable for the lifetime of a timeline.
//! Heights are stored per node (leaf = 1); the AVL balance factor is always
//! derived from child heights and never stored.

use super::NodeId;
use crate::snapshot::{DomainKind, DomainState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TreeKind {
    Bst,
    Avl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub value: i64,
    pub height: u32,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeState {
    pub kind: TreeKind,
    pub root: Option<NodeId>,
    nodes: Vec<Option<TreeNode>>,
}

impl TreeState {
    pub fn new(kind: TreeKind) -> Self {
        TreeState {
            kind,
            root: None,
            nodes: Vec::new(),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id).and_then(|slot| slot.as_ref())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut TreeNode> {
        self.nodes.get_mut(id).and_then(|slot| slot.as_mut())
    }

    /// Value of a live node. Ids handed out by this arena are always live
    /// until [`TreeState::release`] is called on them.
    pub fn value(&self, id: NodeId) -> i64 {
        self.node(id).map_or(0, |n| n.value)
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.left)
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.right)
    }

    /// Allocate a detached leaf
    pub fn alloc(&mut self, value: i64) -> NodeId {
        self.nodes.push(Some(TreeNode {
            value,
            height: 1,
            left: None,
            right: None,
        }));
        self.nodes.len() - 1
    }

    /// Drop a node from the arena; its slot stays empty
    pub fn release(&mut self, id: NodeId) {
        if let Some(slot) = self.nodes.get_mut(id) {
            *slot = None;
        }
    }

    pub fn set_left(&mut self, id: NodeId, child: Option<NodeId>) {
        if let Some(node) = self.node_mut(id) {
            node.left = child;
        }
    }

    pub fn set_right(&mut self, id: NodeId, child: Option<NodeId>) {
        if let Some(node) = self.node_mut(id) {
            node.right = child;
        }
    }

    /// Height of a subtree, 0 for an empty one
    pub fn height(&self, id: Option<NodeId>) -> u32 {
        id.and_then(|id| self.node(id)).map_or(0, |n| n.height)
    }

    /// Recompute a node's height from its children
    pub fn update_height(&mut self, id: NodeId) {
        let h = 1 + self.height(self.left(id)).max(self.height(self.right(id)));
        if let Some(node) = self.node_mut(id) {
            node.height = h;
        }
    }

    /// `height(left) - height(right)`
    pub fn balance(&self, id: NodeId) -> i32 {
        self.height(self.left(id)) as i32 - self.height(self.right(id)) as i32
    }

    /// Copy with the empty slots squeezed out. Live nodes keep their
    /// relative order, so an arena without holes keeps every id.
    pub fn compacted(&self) -> TreeState {
        let mut remap = vec![None; self.nodes.len()];
        for (new, old) in self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(old, _)| old)
            .enumerate()
        {
            remap[old] = Some(new);
        }
        let moved = |id: Option<NodeId>| id.and_then(|id| remap.get(id).copied().flatten());
        let nodes = self
            .nodes
            .iter()
            .flatten()
            .map(|n| {
                Some(TreeNode {
                    left: moved(n.left),
                    right: moved(n.right),
                    ..n.clone()
                })
            })
            .collect();
        TreeState {
            kind: self.kind,
            root: moved(self.root),
            nodes,
        }
    }

    /// Arena slots in use, live or empty
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Locate a value without recording anything
    pub fn find(&self, value: i64) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let v = self.value(id);
            if value == v {
                return Some(id);
            }
            current = if value < v { self.left(id) } else { self.right(id) };
        }
        None
    }

    /// Parent of a node reachable from the root
    pub fn parent_of(&self, target: NodeId) -> Option<NodeId> {
        let value = self.value(target);
        let mut current = self.root;
        while let Some(id) = current {
            if self.left(id) == Some(target) || self.right(id) == Some(target) {
                return Some(id);
            }
            current = if value < self.value(id) {
                self.left(id)
            } else {
                self.right(id)
            };
        }
        None
    }

    /// Values in ascending (in-order) order
    pub fn values_in_order(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut current = self.root;
        while current.is_some() || !stack.is_empty() {
            while let Some(id) = current {
                stack.push(id);
                current = self.left(id);
            }
            if let Some(id) = stack.pop() {
                out.push(self.value(id));
                current = self.right(id);
            }
        }
        out
    }

    /// Check the strict BST ordering property
    pub fn is_search_tree(&self) -> bool {
        self.values_in_order().windows(2).all(|w| w[0] < w[1])
    }

    /// Check `|balance| <= 1` and stored heights at every node
    pub fn is_balanced(&self) -> bool {
        fn check(tree: &TreeState, id: Option<NodeId>) -> Option<u32> {
            let Some(id) = id else {
                return Some(0);
            };
            let node = tree.node(id)?;
            let lh = check(tree, node.left)?;
            let rh = check(tree, node.right)?;
            let h = 1 + lh.max(rh);
            if (lh as i64 - rh as i64).abs() > 1 || h != node.height {
                return None;
            }
            Some(h)
        }
        check(self, self.root).is_some()
    }

    fn describe_into(&self, id: Option<NodeId>, depth: usize, lines: &mut Vec<String>) {
        let Some(id) = id else {
            return;
        };
        self.describe_into(self.right(id), depth + 1, lines);
        let suffix = match self.kind {
            TreeKind::Avl => format!(" (h={}, bf={})", self.height(Some(id)), self.balance(id)),
            TreeKind::Bst => String::new(),
        };
        lines.push(format!("{}{}{}", "    ".repeat(depth), self.value(id), suffix));
        self.describe_into(self.left(id), depth + 1, lines);
    }
}

impl DomainState for TreeState {
    fn kind(&self) -> DomainKind {
        DomainKind::Tree
    }

    fn describe(&self) -> Vec<String> {
        if self.root.is_none() {
            return vec!["(empty tree)".to_string()];
        }
        let mut lines = Vec::new();
        self.describe_into(self.root, 0, &mut lines);
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heights_and_balance() {
        let mut tree = TreeState::new(TreeKind::Avl);
        let root = tree.alloc(10);
        let left = tree.alloc(5);
        let left_left = tree.alloc(1);
        tree.root = Some(root);
        tree.set_left(root, Some(left));
        tree.set_left(left, Some(left_left));
        tree.update_height(left);
        tree.update_height(root);

        assert_eq!(tree.height(Some(root)), 3);
        assert_eq!(tree.balance(root), 2);
        assert!(!tree.is_balanced());
        assert!(tree.is_search_tree());
        assert_eq!(tree.parent_of(left_left), Some(left));
        assert_eq!(tree.find(5), Some(left));
        assert_eq!(tree.find(7), None);
    }

    #[test]
    fn test_compaction_drops_empty_slots() {
        let mut tree = TreeState::new(TreeKind::Bst);
        let a = tree.alloc(1);
        let b = tree.alloc(2);
        let c = tree.alloc(3);
        tree.root = Some(b);
        tree.set_left(b, Some(a));
        tree.set_right(b, Some(c));
        tree.update_height(b);
        assert_eq!(tree.compacted(), tree);

        tree.set_left(b, None);
        tree.release(a);
        tree.update_height(b);
        let compact = tree.compacted();
        assert_eq!(compact.slot_count(), 2);
        assert_eq!(compact.root, Some(0));
        assert_eq!(compact.right(0), Some(1));
        assert_eq!(compact.values_in_order(), vec![2, 3]);
        assert_eq!(compact.height(compact.root), 2);
    }

    #[test]
    fn test_release_keeps_ids_stable() {
        let mut tree = TreeState::new(TreeKind::Bst);
        let a = tree.alloc(1);
        let b = tree.alloc(2);
        tree.release(a);
        assert!(tree.node(a).is_none());
        assert_eq!(tree.value(b), 2);
        assert_eq!(tree.alloc(3), 2);
    }
}
