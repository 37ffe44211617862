//! Linked list arena and bounded stack/queue

use super::{bracketed, NodeId};
use crate::snapshot::{DomainKind, DomainState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    pub value: i64,
    pub next: Option<NodeId>,
}

/// Singly linked list stored as an arena with a head link
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkedListState {
    pub head: Option<NodeId>,
    nodes: Vec<Option<ListNode>>,
}

impl LinkedListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: &[i64]) -> Self {
        let mut list = LinkedListState::new();
        let mut tail: Option<NodeId> = None;
        for &v in values {
            let id = list.alloc(v);
            match tail {
                Some(t) => list.set_next(t, Some(id)),
                None => list.head = Some(id),
            }
            tail = Some(id);
        }
        list
    }

    pub fn node(&self, id: NodeId) -> Option<&ListNode> {
        self.nodes.get(id).and_then(|slot| slot.as_ref())
    }

    pub fn value(&self, id: NodeId) -> i64 {
        self.node(id).map_or(0, |n| n.value)
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.next)
    }

    pub fn set_next(&mut self, id: NodeId, next: Option<NodeId>) {
        if let Some(Some(node)) = self.nodes.get_mut(id) {
            node.next = next;
        }
    }

    pub fn alloc(&mut self, value: i64) -> NodeId {
        self.nodes.push(Some(ListNode { value, next: None }));
        self.nodes.len() - 1
    }

    pub fn release(&mut self, id: NodeId) {
        if let Some(slot) = self.nodes.get_mut(id) {
            *slot = None;
        }
    }

    /// Copy with the empty slots squeezed out, live nodes in their
    /// original relative order
    pub fn compacted(&self) -> LinkedListState {
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
        LinkedListState {
            head: moved(self.head),
            nodes: self
                .nodes
                .iter()
                .flatten()
                .map(|n| {
                    Some(ListNode {
                        value: n.value,
                        next: moved(n.next),
                    })
                })
                .collect(),
        }
    }

    /// Arena slots in use, live or empty
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node ids in list order
    pub fn order(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.head;
        while let Some(id) = current {
            out.push(id);
            current = self.next(id);
        }
        out
    }

    pub fn values(&self) -> Vec<i64> {
        self.order().into_iter().map(|id| self.value(id)).collect()
    }

    pub fn len(&self) -> usize {
        self.order().len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

impl DomainState for LinkedListState {
    fn kind(&self) -> DomainKind {
        DomainKind::LinkedList
    }

    fn describe(&self) -> Vec<String> {
        let parts: Vec<String> = self
            .order()
            .into_iter()
            .map(|id| format!("[{}]", self.value(id)))
            .collect();
        if parts.is_empty() {
            vec!["head -> null".to_string()]
        } else {
            vec![format!("head -> {} -> null", parts.join(" -> "))]
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundedKind {
    Stack,
    Queue,
}

/// Fixed-capacity stack or queue.
///
/// For a stack the top is the last item; for a queue the front is the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedState {
    pub kind: BoundedKind,
    pub items: Vec<i64>,
    pub capacity: usize,
}

impl BoundedState {
    pub fn new(kind: BoundedKind, capacity: usize) -> Self {
        BoundedState {
            kind,
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Index of the element `pop`/`dequeue` would remove
    pub fn exit_index(&self) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        match self.kind {
            BoundedKind::Stack => Some(self.items.len() - 1),
            BoundedKind::Queue => Some(0),
        }
    }
}

impl DomainState for BoundedState {
    fn kind(&self) -> DomainKind {
        match self.kind {
            BoundedKind::Stack => DomainKind::Stack,
            BoundedKind::Queue => DomainKind::Queue,
        }
    }

    fn describe(&self) -> Vec<String> {
        let label = match self.kind {
            BoundedKind::Stack => "bottom -> top",
            BoundedKind::Queue => "front -> back",
        };
        vec![
            format!("{}: {}", label, bracketed(&self.items)),
            format!("size {}/{}", self.items.len(), self.capacity),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_from_values() {
        let list = LinkedListState::from_values(&[3, 1, 4]);
        assert_eq!(list.values(), vec![3, 1, 4]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.describe(), vec!["head -> [3] -> [1] -> [4] -> null"]);
    }

    #[test]
    fn test_bounded_exit_index() {
        let mut stack = BoundedState::new(BoundedKind::Stack, 2);
        stack.items = vec![1, 2];
        assert!(stack.is_full());
        assert_eq!(stack.exit_index(), Some(1));

        let mut queue = BoundedState::new(BoundedKind::Queue, 3);
        queue.items = vec![1, 2];
        assert_eq!(queue.exit_index(), Some(0));
    }
}
