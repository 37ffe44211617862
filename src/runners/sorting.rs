//! Comparison sorts
//!
//! Every comparison and every swap or overwrite is recorded together with the
//! accumulated sorted-index set. Quick sort (Lomuto partition, last element as
//! pivot) records the pivot explicitly; merge sort records the writes of each
//! merge rather than swaps.

use crate::model::array::ArrayState;
use crate::snapshot::{
    DomainKind, ElementId, Highlights, Recorder, ResultMarker, Role, Timeline, TimelineRecorder,
};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
}

impl SortAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble sort",
            SortAlgorithm::Selection => "selection sort",
            SortAlgorithm::Insertion => "insertion sort",
            SortAlgorithm::Merge => "merge sort",
            SortAlgorithm::Quick => "quick sort",
            SortAlgorithm::Heap => "heap sort",
        }
    }
}

/// Sort a copy of `values` and return the narrated timeline
pub fn run(values: &[i64], algorithm: SortAlgorithm) -> Timeline<ArrayState> {
    let mut state = ArrayState::new(values.to_vec());
    let mut rec = TimelineRecorder::new(DomainKind::Sorting);
    sort_with(&mut state, algorithm, &mut rec);
    rec.finish(&state)
}

/// Run `algorithm` in place on `state`, reporting through `rec`
pub fn sort_with<R: Recorder<ArrayState>>(
    state: &mut ArrayState,
    algorithm: SortAlgorithm,
    rec: &mut R,
) {
    let n = state.len();
    rec.record(
        state,
        Highlights::new(),
        format!("Starting {} on {} elements", algorithm.name(), n),
    );

    let mut sorter = Sorter {
        state,
        rec,
        comparisons: 0,
        writes: 0,
    };
    if n > 1 {
        match algorithm {
            SortAlgorithm::Bubble => sorter.bubble(),
            SortAlgorithm::Selection => sorter.selection(),
            SortAlgorithm::Insertion => sorter.insertion(),
            SortAlgorithm::Merge => sorter.merge_sort(0, n),
            SortAlgorithm::Quick => sorter.quick(0, n - 1),
            SortAlgorithm::Heap => sorter.heap(),
        }
    }

    let Sorter {
        state,
        rec,
        comparisons,
        writes,
    } = sorter;
    state.mark_all_sorted();
    let all: Highlights = (0..n).map(|i| (ElementId::Index(i), Role::Sorted)).collect();
    rec.record_result(
        state,
        all,
        format!(
            "Array sorted: {} comparisons, {} writes",
            comparisons, writes
        ),
        ResultMarker::Value(comparisons as i64),
    );
}

struct Sorter<'a, R> {
    state: &'a mut ArrayState,
    rec: &'a mut R,
    comparisons: usize,
    writes: usize,
}

impl<R: Recorder<ArrayState>> Sorter<'_, R> {
    fn value(&self, i: usize) -> i64 {
        self.state.values[i]
    }

    fn note(&mut self, highlighted: Highlights, message: String) {
        self.rec.record(self.state, highlighted, message);
    }

    /// Compare `values[i]` with `values[j]`, recording the comparison
    fn compare(&mut self, i: usize, j: usize) -> Ordering {
        self.compare_with(i, j, Highlights::new())
    }

    fn compare_with(&mut self, i: usize, j: usize, extra: Highlights) -> Ordering {
        self.comparisons += 1;
        let (a, b) = (self.value(i), self.value(j));
        // roles in `extra` (pivot, current minimum) win over `Comparing`
        let mut h = Highlights::new()
            .with(ElementId::Index(i), Role::Comparing)
            .with(ElementId::Index(j), Role::Comparing);
        for (id, role) in extra.iter() {
            h.insert(*id, *role);
        }
        let ord = a.cmp(&b);
        let symbol = match ord {
            Ordering::Less => "<",
            Ordering::Equal => "=",
            Ordering::Greater => ">",
        };
        self.note(
            h,
            format!("Comparing a[{}]={} and a[{}]={}: {} {} {}", i, a, j, b, a, symbol, b),
        );
        ord
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.writes += 2;
        self.state.values.swap(i, j);
        let h = Highlights::new()
            .with(ElementId::Index(i), Role::Swapping)
            .with(ElementId::Index(j), Role::Swapping);
        let (a, b) = (self.value(i), self.value(j));
        self.note(h, format!("Swapped a[{}]={} and a[{}]={}", i, a, j, b));
    }

    fn write(&mut self, i: usize, value: i64) {
        self.writes += 1;
        self.state.values[i] = value;
        let h = Highlights::new().with(ElementId::Index(i), Role::Overwriting);
        self.note(h, format!("Wrote {} to a[{}]", value, i));
    }

    fn settle(&mut self, i: usize) {
        self.state.mark_sorted(i);
        let v = self.value(i);
        self.note(
            Highlights::new().with(ElementId::Index(i), Role::Sorted),
            format!("{} is in its final position at index {}", v, i),
        );
    }

    fn bubble(&mut self) {
        let n = self.state.len();
        for pass in 0..n {
            let mut swapped = false;
            for j in 0..n - 1 - pass {
                if self.compare(j, j + 1) == Ordering::Greater {
                    self.swap(j, j + 1);
                    swapped = true;
                }
            }
            self.settle(n - 1 - pass);
            if !swapped {
                self.state.mark_all_sorted();
                self.note(
                    Highlights::new(),
                    format!("No swaps during pass {}, the array is sorted", pass + 1),
                );
                break;
            }
        }
    }

    fn selection(&mut self) {
        let n = self.state.len();
        for i in 0..n {
            let mut min = i;
            for j in i + 1..n {
                let extra = Highlights::new().with(ElementId::Index(min), Role::Pivot);
                if self.compare_with(j, min, extra) == Ordering::Less {
                    min = j;
                    let v = self.value(min);
                    self.note(
                        Highlights::new().with(ElementId::Index(min), Role::Pivot),
                        format!("New minimum {} at index {}", v, min),
                    );
                }
            }
            if min != i {
                self.swap(i, min);
            }
            self.settle(i);
        }
    }

    fn insertion(&mut self) {
        let n = self.state.len();
        self.state.mark_sorted(0);
        for i in 1..n {
            let key = self.value(i);
            self.note(
                Highlights::new().with(ElementId::Index(i), Role::Active),
                format!("Inserting {} into the sorted prefix a[0..{}]", key, i),
            );
            let mut j = i;
            while j > 0 && self.compare(j - 1, j) == Ordering::Greater {
                self.swap(j - 1, j);
                j -= 1;
            }
            self.state.mark_sorted(i);
        }
    }

    /// Sort the half-open range `lo..hi`
    fn merge_sort(&mut self, lo: usize, hi: usize) {
        if hi - lo <= 1 {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        self.merge_sort(lo, mid);
        self.merge_sort(mid, hi);
        self.merge(lo, mid, hi);
    }

    fn merge(&mut self, lo: usize, mid: usize, hi: usize) {
        let left: Vec<i64> = self.state.values[lo..mid].to_vec();
        let right: Vec<i64> = self.state.values[mid..hi].to_vec();
        let range: Highlights = (lo..hi).map(|k| (ElementId::Index(k), Role::Active)).collect();
        self.note(
            range,
            format!("Merging a[{}..{}] and a[{}..{}]", lo, mid, mid, hi),
        );

        let (mut i, mut j, mut k) = (0, 0, lo);
        while i < left.len() && j < right.len() {
            self.comparisons += 1;
            let take_left = left[i] <= right[j];
            let h = Highlights::new()
                .with(ElementId::Index(lo + i), Role::Comparing)
                .with(ElementId::Index(mid + j), Role::Comparing);
            self.note(
                h,
                format!(
                    "Comparing {} (left run) with {} (right run): take {}",
                    left[i],
                    right[j],
                    if take_left { left[i] } else { right[j] }
                ),
            );
            if take_left {
                self.write(k, left[i]);
                i += 1;
            } else {
                self.write(k, right[j]);
                j += 1;
            }
            k += 1;
        }
        while i < left.len() {
            self.write(k, left[i]);
            i += 1;
            k += 1;
        }
        while j < right.len() {
            self.write(k, right[j]);
            j += 1;
            k += 1;
        }
        if lo == 0 && hi == self.state.len() {
            self.state.mark_all_sorted();
        }
    }

    /// Sort the inclusive range `lo..=hi`
    fn quick(&mut self, lo: usize, hi: usize) {
        if lo > hi {
            return;
        }
        if lo == hi {
            self.settle(lo);
            return;
        }
        let p = self.partition(lo, hi);
        if p > lo {
            self.quick(lo, p - 1);
        }
        if p < hi {
            self.quick(p + 1, hi);
        }
    }

    fn partition(&mut self, lo: usize, hi: usize) -> usize {
        let pivot = self.value(hi);
        self.note(
            Highlights::new().with(ElementId::Index(hi), Role::Pivot),
            format!("Partitioning a[{}..={}] around pivot {} (index {})", lo, hi, pivot, hi),
        );
        let mut store = lo;
        for j in lo..hi {
            let extra = Highlights::new().with(ElementId::Index(hi), Role::Pivot);
            if self.compare_with(j, hi, extra) == Ordering::Less {
                if store != j {
                    self.swap(store, j);
                }
                store += 1;
            }
        }
        if store != hi {
            self.swap(store, hi);
        }
        self.settle(store);
        store
    }

    fn heap(&mut self) {
        let n = self.state.len();
        self.note(Highlights::new(), "Building a max-heap".to_string());
        for root in (0..n / 2).rev() {
            self.sift_down(root, n);
        }
        for end in (1..n).rev() {
            self.swap(0, end);
            self.settle(end);
            self.sift_down(0, end);
        }
        self.settle(0);
    }

    fn sift_down(&mut self, mut root: usize, end: usize) {
        loop {
            let left = 2 * root + 1;
            if left >= end {
                return;
            }
            let mut largest = root;
            if self.compare(left, largest) == Ordering::Greater {
                largest = left;
            }
            let right = left + 1;
            if right < end && self.compare(right, largest) == Ordering::Greater {
                largest = right;
            }
            if largest == root {
                return;
            }
            self.swap(root, largest);
            root = largest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::NullRecorder;

    const ALL: [SortAlgorithm; 6] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
        SortAlgorithm::Heap,
    ];

    #[test]
    fn test_null_recorder_sorts_in_place() {
        for algorithm in ALL {
            let mut state = ArrayState::new(vec![9, -3, 5, 5, 0, 12, 1]);
            sort_with(&mut state, algorithm, &mut NullRecorder);
            assert_eq!(state.values, vec![-3, 0, 1, 5, 5, 9, 12], "{:?}", algorithm);
        }
    }

    #[test]
    fn test_trivial_inputs() {
        for algorithm in ALL {
            let timeline = run(&[], algorithm);
            assert_eq!(timeline.len(), 2);
            let timeline = run(&[7], algorithm);
            assert_eq!(timeline.last().snapshot().values, vec![7]);
        }
    }
}
