// Integration tests for the hash table runners

use std::time::Duration;

use algoscope::commands::hash::table;
use algoscope::config::PlaybackConfig;
use algoscope::model::hash::{hash_key, Buckets, HashTableState, Slot, Strategy};
use algoscope::playback::Session;
use algoscope::runners::hashing;
use algoscope::snapshot::{NullRecorder, ResultMarker};

fn filled(strategy: Strategy, size: usize, keys: &[&str]) -> HashTableState {
    let mut state = HashTableState::new(strategy, size);
    for key in keys {
        assert!(hashing::insert_with(&mut state, key, &mut NullRecorder));
    }
    state
}

#[test]
fn test_hash_function() {
    assert_eq!(hash_key("25"), 25);
    assert_eq!(hash_key("ab"), 97 + 98);
}

#[test]
fn test_chaining_appends_in_order() {
    let state = filled(Strategy::Chaining, 10, &["5", "15"]);
    let timeline = hashing::insert(&state, "25");
    assert_eq!(timeline.last().result(), Some(&ResultMarker::Found(5)));
    assert!(timeline
        .messages()
        .contains(&"Collision at bucket 5: append to a chain of 2"));

    match &timeline.last().snapshot().buckets {
        Buckets::Chained(buckets) => {
            assert_eq!(buckets[5], vec!["5", "15", "25"]);
            assert!(buckets.iter().enumerate().all(|(i, b)| i == 5 || b.is_empty()));
        }
        Buckets::Open(_) => panic!("expected a chained table"),
    }
}

#[test]
fn test_load_factor_reported_after_every_insert() {
    let mut state = HashTableState::new(Strategy::Chaining, 4);
    for (n, key) in ["a", "b", "c"].iter().enumerate() {
        let timeline = hashing::insert(&state, key);
        let expected = format!("load factor {}/4 = {:.2})", n + 1, (n + 1) as f64 / 4.0);
        assert!(
            timeline.last().message().ends_with(&expected),
            "{}",
            timeline.last().message()
        );
        state = timeline.last().snapshot().clone();
    }
    assert_eq!(state.count, 3);
    assert_eq!(state.load_factor(), 0.75);
}

#[test]
fn test_linear_probing_wraps_around() {
    let state = filled(Strategy::LinearProbing, 5, &["4", "9"]);
    match &state.buckets {
        Buckets::Open(slots) => {
            assert_eq!(slots[4], Slot::Occupied("4".to_string()));
            assert_eq!(slots[0], Slot::Occupied("9".to_string()));
        }
        Buckets::Chained(_) => panic!("expected an open table"),
    }
    let timeline = hashing::search(&state, "9");
    assert_eq!(timeline.last().result(), Some(&ResultMarker::Found(0)));
}

#[test]
fn test_probing_search_stops_at_empty_slot() {
    let state = filled(Strategy::LinearProbing, 7, &["1", "8"]);
    let timeline = hashing::search(&state, "15");
    assert_eq!(timeline.last().result(), Some(&ResultMarker::NotFound));
    assert!(timeline
        .messages()
        .contains(&"Slot 3 is empty, stop probing"));
}

#[test]
fn test_remove_then_search_past_tombstone() {
    let state = filled(Strategy::LinearProbing, 7, &["1", "8"]);
    let removed = hashing::remove(&state, "1");
    let after = removed.last().snapshot();
    match &after.buckets {
        Buckets::Open(slots) => assert_eq!(slots[1], Slot::Deleted),
        Buckets::Chained(_) => panic!("expected an open table"),
    }
    let timeline = hashing::search(after, "8");
    assert_eq!(timeline.last().result(), Some(&ResultMarker::Found(2)));
}

#[test]
fn test_duplicate_and_missing_keys_are_narrated() {
    let state = filled(Strategy::Chaining, 3, &["x"]);
    let dup = hashing::insert(&state, "x");
    assert_eq!(dup.last().snapshot(), &state);
    assert!(dup.last().message().contains("nothing inserted"));

    let missing = hashing::remove(&state, "y");
    assert_eq!(missing.last().result(), Some(&ResultMarker::NotFound));
    assert_eq!(missing.last().snapshot(), &state);
}

#[test]
fn test_session_fill_and_paced_insert() {
    let config = PlaybackConfig {
        pace_delay: Duration::from_millis(10),
        ..PlaybackConfig::default()
    };
    let mut session = Session::new(table(Strategy::Chaining, 10, 128).unwrap(), config);
    session.fill(&["5", "15"]).unwrap();
    assert_eq!(session.committed().count, 2);
    assert!(session.fill(&["  "]).is_err());

    session.insert("25").unwrap();
    assert!(session.is_generating());
    for _ in 0..100 {
        session.tick(Duration::from_millis(10));
    }
    assert!(!session.is_generating());
    assert_eq!(session.committed().count, 3);
    assert_eq!(
        session.current_step().unwrap().result(),
        Some(&ResultMarker::Found(5))
    );
}

#[test]
fn test_table_size_is_validated() {
    assert!(table(Strategy::LinearProbing, 0, 128).is_err());
    assert!(table(Strategy::LinearProbing, 129, 128).is_err());
}

#[test]
fn test_operations_are_deterministic() {
    for strategy in [Strategy::Chaining, Strategy::LinearProbing] {
        let state = filled(strategy, 7, &["apple", "14", "21", "kiwi"]);
        assert_eq!(hashing::insert(&state, "28"), hashing::insert(&state, "28"));
        assert_eq!(hashing::search(&state, "21"), hashing::search(&state, "21"));
        assert_eq!(hashing::remove(&state, "14"), hashing::remove(&state, "14"));
    }
}
