use super::{check_value, check_values, rejected};
use crate::error::{check_len, InputError, Result};
use crate::model::tree::TreeState;
use crate::playback::{Publish, Session};
use crate::runners::tree::{self, TraversalOrder};
use tracing::info;

impl Session<TreeState> {
    /// Narrated insertion of one value
    pub fn insert(&mut self, value: i64) -> Result<()> {
        check_value(value).map_err(rejected("insert"))?;
        let max = self.config().max_elements;
        check_len("tree", self.committed().len() + 1, max).map_err(rejected("insert"))?;
        info!(value, kind = ?self.committed().kind, "tree insert");
        let timeline = tree::insert(self.committed(), value);
        self.launch(timeline, Publish::Paced);
        Ok(())
    }

    pub fn search(&mut self, value: i64) -> Result<()> {
        check_value(value).map_err(rejected("search"))?;
        info!(value, "tree search");
        let timeline = tree::search(self.committed(), value);
        self.launch(timeline, Publish::Batch);
        Ok(())
    }

    pub fn remove(&mut self, value: i64) -> Result<()> {
        check_value(value).map_err(rejected("remove"))?;
        info!(value, "tree remove");
        let timeline = tree::remove(self.committed(), value);
        self.launch(timeline, Publish::Paced);
        Ok(())
    }

    pub fn traverse(&mut self, order: TraversalOrder) -> Result<()> {
        if self.committed().is_empty() {
            return Err(InputError::Empty("tree")).map_err(rejected("traverse"));
        }
        info!(?order, "tree traversal");
        let timeline = tree::traverse(self.committed(), order);
        self.launch(timeline, Publish::Batch);
        Ok(())
    }

    /// Build a tree from `values` instantly, without a timeline
    pub fn build(&mut self, values: &[i64]) -> Result<()> {
        let max = self.config().max_elements;
        check_len("tree", values.len(), max)
            .and_then(|_| check_values(values))
            .map_err(rejected("build"))?;
        info!(len = values.len(), "tree bulk build");
        let kind = self.committed().kind;
        self.replace(tree::build(kind, values));
        Ok(())
    }

    /// Empty the tree, keeping its kind
    pub fn reset(&mut self) {
        let kind = self.committed().kind;
        self.replace(TreeState::new(kind));
    }
}
