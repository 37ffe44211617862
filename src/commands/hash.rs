use super::rejected;
use crate::error::{InputError, Result};
use crate::model::hash::{HashTableState, Strategy};
use crate::playback::{Publish, Session};
use crate::runners::hashing;
use crate::snapshot::NullRecorder;
use tracing::info;

/// Keys are trimmed; blank keys are rejected
fn check_key(key: &str) -> Result<&str> {
    let key = key.trim();
    if key.is_empty() {
        return Err(InputError::Empty("key"));
    }
    Ok(key)
}

/// A table with `size` buckets, validated against `max`
pub fn table(strategy: Strategy, size: usize, max: usize) -> Result<HashTableState> {
    if size == 0 || size > max {
        return Err(InputError::InvalidCapacity(size));
    }
    Ok(HashTableState::new(strategy, size))
}

impl Session<HashTableState> {
    pub fn insert(&mut self, key: &str) -> Result<()> {
        let key = check_key(key).map_err(rejected("insert"))?;
        info!(key, strategy = ?self.committed().strategy(), "hash insert");
        let timeline = hashing::insert(self.committed(), key);
        self.launch(timeline, Publish::Paced);
        Ok(())
    }

    pub fn search(&mut self, key: &str) -> Result<()> {
        let key = check_key(key).map_err(rejected("search"))?;
        info!(key, "hash search");
        let timeline = hashing::search(self.committed(), key);
        self.launch(timeline, Publish::Paced);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        let key = check_key(key).map_err(rejected("remove"))?;
        info!(key, "hash remove");
        let timeline = hashing::remove(self.committed(), key);
        self.launch(timeline, Publish::Paced);
        Ok(())
    }

    /// Insert `keys` instantly, without a timeline
    pub fn fill(&mut self, keys: &[&str]) -> Result<()> {
        let keys = keys
            .iter()
            .map(|k| check_key(k))
            .collect::<Result<Vec<_>>>()
            .map_err(rejected("fill"))?;
        info!(len = keys.len(), "hash bulk fill");
        self.edit(|table| {
            for key in keys {
                hashing::insert_with(table, key, &mut NullRecorder);
            }
            Ok(())
        })
    }

    /// Empty table with a new strategy and bucket count
    pub fn reset(&mut self, strategy: Strategy, size: usize) -> Result<()> {
        let max = self.config().max_elements;
        let fresh = table(strategy, size, max).map_err(rejected("reset"))?;
        self.replace(fresh);
        Ok(())
    }
}
