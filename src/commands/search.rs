use super::{check_value, check_values, rejected};
use crate::error::{check_len, InputError, Result};
use crate::model::array::SearchState;
use crate::playback::{Publish, Session};
use crate::runners::search;
use tracing::info;

/// Index of the first element smaller than its predecessor
fn first_unsorted(values: &[i64]) -> Option<usize> {
    values.windows(2).position(|w| w[0] > w[1]).map(|i| i + 1)
}

impl Session<SearchState> {
    /// Replace the searched array. It must be sorted ascending.
    pub fn reset(&mut self, values: &[i64]) -> Result<()> {
        let max = self.config().max_elements;
        let checked = check_len("array", values.len(), max)
            .and_then(|_| check_values(values))
            .and_then(|_| match first_unsorted(values) {
                Some(index) => Err(InputError::Unsorted { index }),
                None => Ok(()),
            });
        checked.map_err(rejected("reset"))?;
        self.replace(SearchState::new(values.to_vec(), 0));
        Ok(())
    }

    pub fn search(&mut self, target: i64) -> Result<()> {
        check_value(target).map_err(rejected("search"))?;
        if self.committed().values.is_empty() {
            return Err(InputError::Empty("array")).map_err(rejected("search"));
        }
        info!(target, len = self.committed().values.len(), "binary search");
        let timeline = search::run(&self.committed().values, target);
        self.launch(timeline, Publish::Batch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_unsorted() {
        assert_eq!(first_unsorted(&[1, 2, 2, 5]), None);
        assert_eq!(first_unsorted(&[1, 3, 2]), Some(2));
    }
}
