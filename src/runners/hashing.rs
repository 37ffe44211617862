//! Hash table insert, search and remove
//!
//! Every probe (linear probing) or chain position (chaining) that is
//! inspected is recorded, not just the final slot.

use crate::model::hash::{hash_key, Buckets, HashTableState, Slot};
use crate::snapshot::{
    DomainKind, ElementId, Highlights, Recorder, ResultMarker, Role, Timeline, TimelineRecorder,
};

pub fn insert(table: &HashTableState, key: &str) -> Timeline<HashTableState> {
    let mut working = table.clone();
    let mut rec = TimelineRecorder::new(DomainKind::HashTable);
    insert_with(&mut working, key, &mut rec);
    rec.finish(&working)
}

pub fn search(table: &HashTableState, key: &str) -> Timeline<HashTableState> {
    let mut working = table.clone();
    let mut rec = TimelineRecorder::new(DomainKind::HashTable);
    search_with(&mut working, key, &mut rec);
    rec.finish(&working)
}

pub fn remove(table: &HashTableState, key: &str) -> Timeline<HashTableState> {
    let mut working = table.clone();
    let mut rec = TimelineRecorder::new(DomainKind::HashTable);
    remove_with(&mut working, key, &mut rec);
    rec.finish(&working)
}

fn bucket(i: usize) -> ElementId {
    ElementId::Bucket(i)
}

/// Record the hash computation and return the home bucket
fn locate<R: Recorder<HashTableState>>(state: &HashTableState, key: &str, rec: &mut R) -> usize {
    let h = hash_key(key);
    let index = state.index_of(key);
    rec.record(
        state,
        Highlights::new().with(bucket(index), Role::Active),
        format!(
            "hash(\"{}\") = {}, {} mod {} = {}",
            key,
            h,
            h,
            state.size(),
            index
        ),
    );
    index
}

/// Insert `key`; false for a duplicate or a full table
pub fn insert_with<R: Recorder<HashTableState>>(
    state: &mut HashTableState,
    key: &str,
    rec: &mut R,
) -> bool {
    rec.record(state, Highlights::new(), format!("Inserting \"{}\"", key));
    if state.size() == 0 {
        rec.record_result(
            state,
            Highlights::new(),
            "Hash table has no buckets".to_string(),
            ResultMarker::NotFound,
        );
        return false;
    }
    let home = locate(state, key, rec);
    let size = state.size();

    let placed = match &state.buckets {
        Buckets::Chained(buckets) => {
            let chain = buckets[home].clone();
            for (pos, existing) in chain.iter().enumerate() {
                let h = Highlights::new().with(ElementId::Entry(home, pos), Role::Comparing);
                if existing == key {
                    rec.record_result(
                        state,
                        h.with(ElementId::Entry(home, pos), Role::Found),
                        format!("\"{}\" is already in bucket {}, nothing inserted", key, home),
                        ResultMarker::Found(home),
                    );
                    return false;
                }
                rec.record(
                    state,
                    h,
                    format!("Chain position {} holds \"{}\", keep walking", pos, existing),
                );
            }
            if !chain.is_empty() {
                rec.record(
                    state,
                    Highlights::new().with(bucket(home), Role::Collision),
                    format!(
                        "Collision at bucket {}: append to a chain of {}",
                        home,
                        chain.len()
                    ),
                );
            }
            Some((home, chain.len()))
        }
        Buckets::Open(slots) => {
            let slots = slots.clone();
            let mut tombstone = None;
            let mut found_empty = None;
            let mut index = home;
            for _ in 0..size {
                match &slots[index] {
                    Slot::Empty => {
                        rec.record(
                            state,
                            Highlights::new().with(bucket(index), Role::Probing),
                            format!("Slot {} is empty", index),
                        );
                        found_empty = Some(index);
                        break;
                    }
                    Slot::Occupied(existing) if existing == key => {
                        rec.record_result(
                            state,
                            Highlights::new().with(bucket(index), Role::Found),
                            format!("\"{}\" is already in slot {}, nothing inserted", key, index),
                            ResultMarker::Found(index),
                        );
                        return false;
                    }
                    Slot::Occupied(existing) => {
                        let next = (index + 1) % size;
                        rec.record(
                            state,
                            Highlights::new().with(bucket(index), Role::Collision),
                            format!(
                                "Collision: slot {} holds \"{}\", probe slot {}",
                                index, existing, next
                            ),
                        );
                    }
                    Slot::Deleted => {
                        let next = (index + 1) % size;
                        tombstone.get_or_insert(index);
                        rec.record(
                            state,
                            Highlights::new().with(bucket(index), Role::Probing),
                            format!(
                                "Slot {} is a tombstone, keep probing slot {} for duplicates",
                                index, next
                            ),
                        );
                    }
                }
                index = (index + 1) % size;
            }
            tombstone.or(found_empty).map(|i| (i, 0))
        }
    };

    let Some((index, pos)) = placed else {
        rec.record_result(
            state,
            Highlights::new(),
            format!("Hash table is full: \"{}\" was not inserted", key),
            ResultMarker::NotFound,
        );
        return false;
    };

    let element = match &mut state.buckets {
        Buckets::Chained(buckets) => {
            buckets[index].push(key.to_string());
            ElementId::Entry(index, pos)
        }
        Buckets::Open(slots) => {
            slots[index] = Slot::Occupied(key.to_string());
            bucket(index)
        }
    };
    state.count += 1;
    rec.record_result(
        state,
        Highlights::new().with(element, Role::Inserted),
        format!(
            "Inserted \"{}\" into bucket {} (load factor {}/{} = {:.2})",
            key,
            index,
            state.count,
            state.size(),
            state.load_factor()
        ),
        ResultMarker::Found(index),
    );
    true
}

/// Where a key lives: bucket index plus chain position
fn find_with<R: Recorder<HashTableState>>(
    state: &HashTableState,
    key: &str,
    rec: &mut R,
) -> Option<(usize, usize)> {
    if state.size() == 0 {
        return None;
    }
    let home = locate(state, key, rec);
    let size = state.size();
    match &state.buckets {
        Buckets::Chained(buckets) => {
            for (pos, existing) in buckets[home].iter().enumerate() {
                let h = Highlights::new().with(ElementId::Entry(home, pos), Role::Comparing);
                if existing == key {
                    return Some((home, pos));
                }
                rec.record(
                    state,
                    h,
                    format!("Chain position {} holds \"{}\", keep walking", pos, existing),
                );
            }
            None
        }
        Buckets::Open(slots) => {
            let mut index = home;
            for _ in 0..size {
                match &slots[index] {
                    Slot::Empty => {
                        rec.record(
                            state,
                            Highlights::new().with(bucket(index), Role::Probing),
                            format!("Slot {} is empty, stop probing", index),
                        );
                        return None;
                    }
                    Slot::Occupied(existing) if existing == key => return Some((index, 0)),
                    Slot::Occupied(existing) => {
                        rec.record(
                            state,
                            Highlights::new().with(bucket(index), Role::Probing),
                            format!("Slot {} holds \"{}\", probe the next slot", index, existing),
                        );
                    }
                    Slot::Deleted => {
                        rec.record(
                            state,
                            Highlights::new().with(bucket(index), Role::Probing),
                            format!("Slot {} is a tombstone, probe the next slot", index),
                        );
                    }
                }
                index = (index + 1) % size;
            }
            rec.record(
                state,
                Highlights::new(),
                "Probed every slot".to_string(),
            );
            None
        }
    }
}

fn position_element(state: &HashTableState, index: usize, pos: usize) -> ElementId {
    match state.buckets {
        Buckets::Chained(_) => ElementId::Entry(index, pos),
        Buckets::Open(_) => bucket(index),
    }
}

pub fn search_with<R: Recorder<HashTableState>>(
    state: &mut HashTableState,
    key: &str,
    rec: &mut R,
) -> Option<usize> {
    rec.record(state, Highlights::new(), format!("Searching for \"{}\"", key));
    match find_with(state, key, rec) {
        Some((index, pos)) => {
            rec.record_result(
                state,
                Highlights::new().with(position_element(state, index, pos), Role::Found),
                format!("Found \"{}\" in bucket {}", key, index),
                ResultMarker::Found(index),
            );
            Some(index)
        }
        None => {
            rec.record_result(
                state,
                Highlights::new(),
                format!("Not found: \"{}\" is not in the table", key),
                ResultMarker::NotFound,
            );
            None
        }
    }
}

pub fn remove_with<R: Recorder<HashTableState>>(
    state: &mut HashTableState,
    key: &str,
    rec: &mut R,
) -> bool {
    rec.record(state, Highlights::new(), format!("Removing \"{}\"", key));
    let Some((index, pos)) = find_with(state, key, rec) else {
        rec.record_result(
            state,
            Highlights::new(),
            format!("Not found: \"{}\" is not in the table, nothing removed", key),
            ResultMarker::NotFound,
        );
        return false;
    };
    rec.record(
        state,
        Highlights::new().with(position_element(state, index, pos), Role::Removed),
        format!("Found \"{}\" in bucket {}", key, index),
    );
    let note = match &mut state.buckets {
        Buckets::Chained(buckets) => {
            buckets[index].remove(pos);
            "unlinked from its chain"
        }
        Buckets::Open(slots) => {
            slots[index] = Slot::Deleted;
            "slot left as a tombstone"
        }
    };
    state.count -= 1;
    rec.record_result(
        state,
        Highlights::new().with(bucket(index), Role::Removed),
        format!(
            "Removed \"{}\" ({}), load factor {:.2}",
            key,
            note,
            state.load_factor()
        ),
        ResultMarker::Found(index),
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::hash::Strategy;
    use crate::snapshot::NullRecorder;

    #[test]
    fn test_linear_probing_records_every_probe() {
        let mut table = HashTableState::new(Strategy::LinearProbing, 5);
        insert_with(&mut table, "0", &mut NullRecorder);
        insert_with(&mut table, "5", &mut NullRecorder);
        let timeline = insert(&table, "10");
        let collisions = timeline
            .messages()
            .iter()
            .filter(|m| m.starts_with("Collision"))
            .count();
        assert_eq!(collisions, 2);
        assert_eq!(timeline.last().result(), Some(&ResultMarker::Found(2)));
    }

    #[test]
    fn test_full_table_is_terminal_step() {
        let mut table = HashTableState::new(Strategy::LinearProbing, 2);
        assert!(insert_with(&mut table, "1", &mut NullRecorder));
        assert!(insert_with(&mut table, "2", &mut NullRecorder));
        let timeline = insert(&table, "3");
        assert_eq!(
            timeline.last().message(),
            "Hash table is full: \"3\" was not inserted"
        );
        assert_eq!(timeline.last().snapshot(), &table);
    }

    #[test]
    fn test_tombstone_is_reused() {
        let mut table = HashTableState::new(Strategy::LinearProbing, 5);
        insert_with(&mut table, "1", &mut NullRecorder);
        insert_with(&mut table, "6", &mut NullRecorder);
        assert!(remove_with(&mut table, "1", &mut NullRecorder));
        // "6" is still reachable past the tombstone
        assert_eq!(search_with(&mut table, "6", &mut NullRecorder), Some(2));
        assert!(insert_with(&mut table, "11", &mut NullRecorder));
        assert_eq!(table.buckets, {
            let mut slots = vec![Slot::Empty; 5];
            slots[1] = Slot::Occupied("11".to_string());
            slots[2] = Slot::Occupied("6".to_string());
            Buckets::Open(slots)
        });
        assert_eq!(table.count, 2);
    }
}
