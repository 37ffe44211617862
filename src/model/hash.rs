//! Fixed-size hash table with chaining or linear probing

use crate::snapshot::{DomainKind, DomainState};

/// Collision resolution strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    Chaining,
    #[value(name = "probing")]
    LinearProbing,
}

/// One slot of an open-addressing table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Empty,
    Occupied(String),
    /// Removed entry; probing continues past it
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Buckets {
    Chained(Vec<Vec<String>>),
    Open(Vec<Slot>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashTableState {
    pub buckets: Buckets,
    pub count: usize,
}

impl HashTableState {
    pub fn new(strategy: Strategy, size: usize) -> Self {
        let buckets = match strategy {
            Strategy::Chaining => Buckets::Chained(vec![Vec::new(); size]),
            Strategy::LinearProbing => Buckets::Open(vec![Slot::Empty; size]),
        };
        HashTableState { buckets, count: 0 }
    }

    pub fn strategy(&self) -> Strategy {
        match self.buckets {
            Buckets::Chained(_) => Strategy::Chaining,
            Buckets::Open(_) => Strategy::LinearProbing,
        }
    }

    /// Number of buckets
    pub fn size(&self) -> usize {
        match &self.buckets {
            Buckets::Chained(b) => b.len(),
            Buckets::Open(s) => s.len(),
        }
    }

    /// `count / size`
    pub fn load_factor(&self) -> f64 {
        if self.size() == 0 {
            return 0.0;
        }
        self.count as f64 / self.size() as f64
    }

    /// Bucket index for a key
    pub fn index_of(&self, key: &str) -> usize {
        if self.size() == 0 {
            return 0;
        }
        (hash_key(key) % self.size() as u64) as usize
    }

    /// Every stored key, bucket by bucket
    pub fn keys(&self) -> Vec<&str> {
        match &self.buckets {
            Buckets::Chained(b) => b.iter().flatten().map(|k| k.as_str()).collect(),
            Buckets::Open(s) => s
                .iter()
                .filter_map(|slot| match slot {
                    Slot::Occupied(k) => Some(k.as_str()),
                    _ => None,
                })
                .collect(),
        }
    }
}

/// Numeric keys hash to their own value, anything else to the sum of its
/// bytes.
pub fn hash_key(key: &str) -> u64 {
    match key.parse::<u64>() {
        Ok(n) => n,
        Err(_) => key.bytes().map(u64::from).sum(),
    }
}

impl DomainState for HashTableState {
    fn kind(&self) -> DomainKind {
        DomainKind::HashTable
    }

    fn describe(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.size() + 1);
        match &self.buckets {
            Buckets::Chained(buckets) => {
                for (i, chain) in buckets.iter().enumerate() {
                    if chain.is_empty() {
                        lines.push(format!("{:>3}: -", i));
                    } else {
                        lines.push(format!("{:>3}: {}", i, chain.join(" -> ")));
                    }
                }
            }
            Buckets::Open(slots) => {
                for (i, slot) in slots.iter().enumerate() {
                    let text = match slot {
                        Slot::Empty => "-".to_string(),
                        Slot::Occupied(k) => k.clone(),
                        Slot::Deleted => "<deleted>".to_string(),
                    };
                    lines.push(format!("{:>3}: {}", i, text));
                }
            }
        }
        lines.push(format!(
            "items: {}  load factor: {:.2}",
            self.count,
            self.load_factor()
        ));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_key() {
        assert_eq!(hash_key("15"), 15);
        assert_eq!(hash_key("ab"), 97 + 98);
    }

    #[test]
    fn test_index_and_load_factor() {
        let mut table = HashTableState::new(Strategy::Chaining, 10);
        assert_eq!(table.index_of("25"), 5);
        assert_eq!(table.load_factor(), 0.0);
        table.count = 4;
        assert!((table.load_factor() - 0.4).abs() < f64::EPSILON);
    }
}
