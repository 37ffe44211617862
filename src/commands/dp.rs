use super::{check_value, rejected};
use crate::error::{check_len, check_range, InputError, Result};
use crate::model::dp::DpGrid;
use crate::playback::{Publish, Session};
use crate::runners::dp::{self, Item};
use tracing::info;

/// Longest input string the LCS table accepts
pub const MAX_LCS_LEN: usize = 24;

/// Largest Fibonacci index that fits an `i64`
pub const MAX_FIBONACCI: i64 = 92;

/// Largest knapsack capacity
pub const MAX_CAPACITY: usize = 64;

/// Parse `"1:1, 3:4"` into knapsack items (`weight:value`)
pub fn parse_items(list: &str) -> Result<Vec<Item>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|token| {
            let invalid = || InputError::InvalidItem(token.to_string());
            let (w, v) = token.split_once(':').ok_or_else(invalid)?;
            let weight = w.trim().parse::<usize>().map_err(|_| invalid())?;
            let value = v.trim().parse::<i64>().map_err(|_| invalid())?;
            if weight == 0 || value < 0 {
                return Err(invalid());
            }
            check_value(value)?;
            Ok(Item::new(weight, value))
        })
        .collect()
}

impl Session<DpGrid> {
    pub fn lcs(&mut self, a: &str, b: &str) -> Result<()> {
        let checked = check_len("first string", a.chars().count(), MAX_LCS_LEN)
            .and_then(|_| check_len("second string", b.chars().count(), MAX_LCS_LEN));
        checked.map_err(rejected("lcs"))?;
        info!(a, b, "longest common subsequence");
        self.launch(dp::lcs(a, b), Publish::Batch);
        Ok(())
    }

    pub fn knapsack(&mut self, items: &[Item], capacity: usize) -> Result<()> {
        if items.is_empty() {
            return Err(InputError::Empty("items")).map_err(rejected("knapsack"));
        }
        if capacity == 0 || capacity > MAX_CAPACITY {
            return Err(InputError::InvalidCapacity(capacity)).map_err(rejected("knapsack"));
        }
        let max = self.config().max_elements;
        check_len("items", items.len(), max).map_err(rejected("knapsack"))?;
        info!(items = items.len(), capacity, "knapsack");
        self.launch(dp::knapsack(items, capacity), Publish::Batch);
        Ok(())
    }

    pub fn fibonacci(&mut self, n: i64) -> Result<()> {
        let n = check_range(n, 0, MAX_FIBONACCI).map_err(rejected("fibonacci"))?;
        info!(n, "fibonacci");
        self.launch(dp::fibonacci(n as usize), Publish::Batch);
        Ok(())
    }
}
