use super::{check_values, rejected};
use crate::error::{check_len, InputError, Result};
use crate::model::array::ArrayState;
use crate::playback::{Publish, Session};
use crate::runners::sorting::{self, SortAlgorithm};
use tracing::info;

impl Session<ArrayState> {
    /// Replace the array with `values`
    pub fn reset(&mut self, values: &[i64]) -> Result<()> {
        let max = self.config().max_elements;
        check_len("array", values.len(), max)
            .and_then(|_| check_values(values))
            .map_err(rejected("reset"))?;
        self.replace(ArrayState::new(values.to_vec()));
        Ok(())
    }

    /// Sort the committed array and install the narrated timeline
    pub fn sort(&mut self, algorithm: SortAlgorithm) -> Result<()> {
        if self.committed().is_empty() {
            return Err(InputError::Empty("array")).map_err(rejected("sort"));
        }
        info!(algorithm = algorithm.name(), len = self.committed().len(), "sort");
        let timeline = sorting::run(&self.committed().values, algorithm);
        self.launch(timeline, Publish::Batch);
        Ok(())
    }
}
