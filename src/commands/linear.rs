use super::{check_value, check_values, rejected};
use crate::error::{check_len, InputError, Result};
use crate::model::linear::{BoundedKind, BoundedState, LinkedListState};
use crate::playback::{Publish, Session};
use crate::runners::linear::{self, BoundedOp, ListOp};
use tracing::info;

impl Session<LinkedListState> {
    fn list_op(&mut self, op: ListOp) -> Result<()> {
        let value = match op {
            ListOp::InsertHead(v)
            | ListOp::InsertTail(v)
            | ListOp::InsertAt(_, v)
            | ListOp::Remove(v)
            | ListOp::Search(v) => v,
        };
        check_value(value).map_err(rejected("list"))?;
        if matches!(
            op,
            ListOp::InsertHead(_) | ListOp::InsertTail(_) | ListOp::InsertAt(..)
        ) {
            let max = self.config().max_elements;
            check_len("list", self.committed().len() + 1, max).map_err(rejected("list"))?;
        }
        info!(?op, "linked list");
        let timeline = linear::list(self.committed(), op);
        self.launch(timeline, Publish::Paced);
        Ok(())
    }

    pub fn insert_head(&mut self, value: i64) -> Result<()> {
        self.list_op(ListOp::InsertHead(value))
    }

    pub fn insert_tail(&mut self, value: i64) -> Result<()> {
        self.list_op(ListOp::InsertTail(value))
    }

    pub fn insert_at(&mut self, index: usize, value: i64) -> Result<()> {
        self.list_op(ListOp::InsertAt(index, value))
    }

    pub fn remove(&mut self, value: i64) -> Result<()> {
        self.list_op(ListOp::Remove(value))
    }

    pub fn search(&mut self, value: i64) -> Result<()> {
        self.list_op(ListOp::Search(value))
    }

    pub fn reset(&mut self, values: &[i64]) -> Result<()> {
        let max = self.config().max_elements;
        check_len("list", values.len(), max)
            .and_then(|_| check_values(values))
            .map_err(rejected("reset"))?;
        self.replace(LinkedListState::from_values(values));
        Ok(())
    }
}

/// An empty stack or queue holding at most `capacity` items
pub fn bounded(kind: BoundedKind, capacity: usize, max: usize) -> Result<BoundedState> {
    if capacity == 0 || capacity > max {
        return Err(InputError::InvalidCapacity(capacity));
    }
    Ok(BoundedState::new(kind, capacity))
}

impl Session<BoundedState> {
    fn bounded_op(&mut self, op: BoundedOp) -> Result<()> {
        if let BoundedOp::Push(value) = op {
            check_value(value).map_err(rejected("push"))?;
        }
        info!(?op, kind = ?self.committed().kind, "bounded structure");
        let timeline = linear::bounded(self.committed(), op);
        self.launch(timeline, Publish::Paced);
        Ok(())
    }

    pub fn push(&mut self, value: i64) -> Result<()> {
        self.bounded_op(BoundedOp::Push(value))
    }

    pub fn pop(&mut self) -> Result<()> {
        self.bounded_op(BoundedOp::Pop)
    }

    pub fn peek(&mut self) -> Result<()> {
        self.bounded_op(BoundedOp::Peek)
    }

    /// Queue name for [`push`](Self::push)
    pub fn enqueue(&mut self, value: i64) -> Result<()> {
        self.push(value)
    }

    /// Queue name for [`pop`](Self::pop)
    pub fn dequeue(&mut self) -> Result<()> {
        self.pop()
    }

    /// Replace the contents with `values` instantly, in push order
    pub fn fill(&mut self, values: &[i64]) -> Result<()> {
        let capacity = self.committed().capacity;
        check_len("stack or queue", values.len(), capacity)
            .and_then(|_| check_values(values))
            .map_err(rejected("fill"))?;
        self.edit(|state| {
            state.items = values.to_vec();
            Ok(())
        })
    }

    /// Empty the structure, optionally with a new capacity
    pub fn reset(&mut self, capacity: Option<usize>) -> Result<()> {
        let current = self.committed();
        let capacity = capacity.unwrap_or(current.capacity);
        let fresh = bounded(current.kind, capacity, self.config().max_elements)
            .map_err(rejected("reset"))?;
        self.replace(fresh);
        Ok(())
    }
}
