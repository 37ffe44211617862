//! Binary search over a sorted array

use crate::model::array::SearchState;
use crate::snapshot::{
    DomainKind, ElementId, Highlights, Recorder, ResultMarker, Role, Timeline, TimelineRecorder,
};
use std::cmp::Ordering;

pub fn run(values: &[i64], target: i64) -> Timeline<SearchState> {
    let mut state = SearchState::new(values.to_vec(), target);
    let mut rec = TimelineRecorder::new(DomainKind::BinarySearch);
    search_with(&mut state, &mut rec);
    rec.finish(&state)
}

fn window_highlights(state: &SearchState) -> Highlights {
    let mut h = Highlights::new();
    if let Some((low, high)) = state.window {
        h.insert(ElementId::Index(low), Role::Low);
        h.insert(ElementId::Index(high), Role::High);
    }
    if let Some(mid) = state.mid {
        h.insert(ElementId::Index(mid), Role::Mid);
    }
    h
}

/// Classic `low/high/mid` narrowing. Returns the index of the target.
pub fn search_with<R: Recorder<SearchState>>(
    state: &mut SearchState,
    rec: &mut R,
) -> Option<usize> {
    let target = state.target;
    rec.record(
        state,
        window_highlights(state),
        format!(
            "Searching for {} in {} sorted elements",
            target,
            state.values.len()
        ),
    );

    while let Some((low, high)) = state.window {
        let mid = low + (high - low) / 2;
        state.mid = Some(mid);
        let value = state.values[mid];
        rec.record(
            state,
            window_highlights(state),
            format!("low={}, high={}: mid={} ({})", low, high, mid, value),
        );

        match value.cmp(&target) {
            Ordering::Equal => {
                rec.record_result(
                    state,
                    Highlights::new().with(ElementId::Index(mid), Role::Found),
                    format!("{} == {}: found at index {}", value, target, mid),
                    ResultMarker::Found(mid),
                );
                return Some(mid);
            }
            Ordering::Less => {
                state.window = if mid < high { Some((mid + 1, high)) } else { None };
                let message = match state.window {
                    Some((low, _)) => format!(
                        "{} < {}: search the right half, low={}",
                        value, target, low
                    ),
                    None => format!("{} < {}: nothing left to the right", value, target),
                };
                state.mid = None;
                rec.record(state, window_highlights(state), message);
            }
            Ordering::Greater => {
                state.window = if mid > low { Some((low, mid - 1)) } else { None };
                let message = match state.window {
                    Some((_, high)) => format!(
                        "{} > {}: search the left half, high={}",
                        value, target, high
                    ),
                    None => format!("{} > {}: nothing left to the left", value, target),
                };
                state.mid = None;
                rec.record(state, window_highlights(state), message);
            }
        }
    }

    rec.record_result(
        state,
        Highlights::new(),
        format!("Not found: {} is not in the array", target),
        ResultMarker::NotFound,
    );
    None
}
