//! Linked list pointer walks and bounded stack/queue operations

use crate::model::linear::{BoundedKind, BoundedState, LinkedListState};
use crate::model::NodeId;
use crate::snapshot::{
    DomainKind, ElementId, Highlights, Recorder, ResultMarker, Role, Timeline, TimelineRecorder,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOp {
    InsertHead(i64),
    InsertTail(i64),
    InsertAt(usize, i64),
    Remove(i64),
    Search(i64),
}

/// Runs on a compacted copy, so removed nodes do not pile up across operations
pub fn list(state: &LinkedListState, op: ListOp) -> Timeline<LinkedListState> {
    let mut working = state.compacted();
    let mut rec = TimelineRecorder::new(DomainKind::LinkedList);
    list_with(&mut working, op, &mut rec);
    rec.finish(&working)
}

fn node(id: NodeId) -> ElementId {
    ElementId::Node(id)
}

pub fn list_with<R: Recorder<LinkedListState>>(
    state: &mut LinkedListState,
    op: ListOp,
    rec: &mut R,
) {
    match op {
        ListOp::InsertHead(value) => insert_at(state, 0, value, rec),
        ListOp::InsertTail(value) => {
            let len = state.len();
            insert_at(state, len, value, rec)
        }
        ListOp::InsertAt(index, value) => insert_at(state, index, value, rec),
        ListOp::Remove(value) => remove(state, value, rec),
        ListOp::Search(value) => {
            search(state, value, rec);
        }
    }
}

/// Walk `steps` links from the head, recording each hop
fn walk<R: Recorder<LinkedListState>>(
    state: &LinkedListState,
    steps: usize,
    rec: &mut R,
) -> Option<NodeId> {
    let mut current = state.head?;
    rec.record(
        state,
        Highlights::new().with(node(current), Role::Visiting),
        format!("current = head ({})", state.value(current)),
    );
    for _ in 1..steps {
        current = state.next(current)?;
        rec.record(
            state,
            Highlights::new().with(node(current), Role::Visiting),
            format!("current = current.next ({})", state.value(current)),
        );
    }
    Some(current)
}

fn insert_at<R: Recorder<LinkedListState>>(
    state: &mut LinkedListState,
    index: usize,
    value: i64,
    rec: &mut R,
) {
    let len = state.len();
    rec.record(
        state,
        Highlights::new(),
        format!("Inserting {} at index {}", value, index),
    );
    if index > len {
        rec.record_result(
            state,
            Highlights::new(),
            format!(
                "Index {} is past the end of the list (length {}), nothing inserted",
                index, len
            ),
            ResultMarker::NotFound,
        );
        return;
    }

    let id = if index == 0 {
        let head = state.head;
        let id = state.alloc(value);
        state.set_next(id, head);
        rec.record(
            state,
            Highlights::new().with(node(id), Role::Inserted),
            format!("new node {}: next = head", value),
        );
        state.head = Some(id);
        id
    } else {
        let Some(prev) = walk(state, index, rec) else {
            return;
        };
        let after = state.next(prev);
        let id = state.alloc(value);
        state.set_next(id, after);
        rec.record(
            state,
            Highlights::new()
                .with(node(prev), Role::Visiting)
                .with(node(id), Role::Inserted),
            format!("new node {}: next = current.next", value),
        );
        state.set_next(prev, Some(id));
        id
    };
    let h = Highlights::new().with(node(id), Role::Inserted);
    rec.record_result(
        state,
        h,
        format!("Linked {} in at index {}, length {}", value, index, len + 1),
        ResultMarker::Found(index),
    );
}

fn remove<R: Recorder<LinkedListState>>(state: &mut LinkedListState, value: i64, rec: &mut R) {
    rec.record(state, Highlights::new(), format!("Removing {}", value));
    let mut prev: Option<NodeId> = None;
    let mut current = state.head;
    let mut index = 0;
    while let Some(id) = current {
        let found = state.value(id) == value;
        rec.record(
            state,
            Highlights::new().with(node(id), Role::Comparing),
            format!(
                "Index {}: {} {} {}",
                index,
                state.value(id),
                if found { "==" } else { "!=" },
                value
            ),
        );
        if found {
            let next = state.next(id);
            let message = match prev {
                Some(p) => {
                    state.set_next(p, next);
                    format!("previous.next skips over {}", value)
                }
                None => {
                    state.head = next;
                    format!("head moves past {}", value)
                }
            };
            rec.record(
                state,
                Highlights::new().with(node(id), Role::Removed),
                message,
            );
            state.release(id);
            rec.record_result(
                state,
                Highlights::new(),
                format!("Removed {} from index {}", value, index),
                ResultMarker::Found(index),
            );
            return;
        }
        prev = Some(id);
        current = state.next(id);
        index += 1;
    }
    rec.record_result(
        state,
        Highlights::new(),
        format!("Not found: {} is not in the list, nothing removed", value),
        ResultMarker::NotFound,
    );
}

fn search<R: Recorder<LinkedListState>>(
    state: &LinkedListState,
    value: i64,
    rec: &mut R,
) -> Option<usize> {
    rec.record(state, Highlights::new(), format!("Searching for {}", value));
    for (index, id) in state.order().into_iter().enumerate() {
        if state.value(id) == value {
            rec.record_result(
                state,
                Highlights::new().with(node(id), Role::Found),
                format!("Found {} at index {}", value, index),
                ResultMarker::Found(index),
            );
            return Some(index);
        }
        rec.record(
            state,
            Highlights::new().with(node(id), Role::Comparing),
            format!("Index {}: {} != {}, follow next", index, state.value(id), value),
        );
    }
    rec.record_result(
        state,
        Highlights::new(),
        format!("Not found: reached null without finding {}", value),
        ResultMarker::NotFound,
    );
    None
}

/// Push/pop/peek on a stack, enqueue/dequeue/peek on a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundedOp {
    Push(i64),
    Pop,
    Peek,
}

pub fn bounded(state: &BoundedState, op: BoundedOp) -> Timeline<BoundedState> {
    let kind = match state.kind {
        BoundedKind::Stack => DomainKind::Stack,
        BoundedKind::Queue => DomainKind::Queue,
    };
    let mut working = state.clone();
    let mut rec = TimelineRecorder::new(kind);
    bounded_with(&mut working, op, &mut rec);
    rec.finish(&working)
}

fn index(i: usize) -> ElementId {
    ElementId::Index(i)
}

pub fn bounded_with<R: Recorder<BoundedState>>(
    state: &mut BoundedState,
    op: BoundedOp,
    rec: &mut R,
) {
    let is_stack = state.kind == BoundedKind::Stack;
    match op {
        BoundedOp::Push(value) => {
            let verb = if is_stack { "Pushing" } else { "Enqueuing" };
            rec.record(state, Highlights::new(), format!("{} {}", verb, value));
            if state.is_full() {
                let message = if is_stack {
                    format!(
                        "Stack Overflow: cannot push {}, capacity {}",
                        value, state.capacity
                    )
                } else {
                    format!(
                        "Queue is full: cannot enqueue {}, capacity {}",
                        value, state.capacity
                    )
                };
                rec.record_result(state, Highlights::new(), message, ResultMarker::NotFound);
                return;
            }
            state.items.push(value);
            let at = state.items.len() - 1;
            let place = if is_stack { "top" } else { "back" };
            rec.record_result(
                state,
                Highlights::new().with(index(at), Role::Inserted),
                format!("{} is now at the {} (size {})", value, place, state.len()),
                ResultMarker::Value(value),
            );
        }
        BoundedOp::Pop | BoundedOp::Peek => {
            let Some(at) = state.exit_index() else {
                let message = if is_stack {
                    "Stack Underflow: the stack is empty"
                } else {
                    "Queue is empty"
                };
                rec.record_result(state, Highlights::new(), message, ResultMarker::NotFound);
                return;
            };
            let value = state.items[at];
            let place = if is_stack { "top" } else { "front" };
            if op == BoundedOp::Peek {
                rec.record_result(
                    state,
                    Highlights::new().with(index(at), Role::Found),
                    format!("Peek: {} is at the {}", value, place),
                    ResultMarker::Value(value),
                );
                return;
            }
            rec.record(
                state,
                Highlights::new().with(index(at), Role::Removed),
                format!("Removing {} from the {}", value, place),
            );
            state.items.remove(at);
            let verb = if is_stack { "Popped" } else { "Dequeued" };
            rec.record_result(
                state,
                Highlights::new(),
                format!("{} {} (size {})", verb, value, state.len()),
                ResultMarker::Value(value),
            );
        }
    }
}
