//! Dynamic programming tables: LCS, 0/1 knapsack and Fibonacci
//!
//! Every cell is shown twice: once while it is being computed, with the
//! cells it reads highlighted as dependencies, and once after its value is
//! written. The fill is followed by a backtrace over the finished table.

use crate::model::dp::{CellRef, DpGrid, DpPhase};
use crate::snapshot::{
    DomainKind, ElementId, Highlights, Recorder, ResultMarker, Role, Timeline, TimelineRecorder,
};

/// A knapsack item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub weight: usize,
    pub value: i64,
}

impl Item {
    pub fn new(weight: usize, value: i64) -> Self {
        Item { weight, value }
    }
}

fn cell(at: CellRef) -> ElementId {
    ElementId::Cell(at.0, at.1)
}

fn computing(at: CellRef, deps: &[CellRef]) -> Highlights {
    let mut h: Highlights = deps.iter().map(|&d| (cell(d), Role::Dependency)).collect();
    h.insert(cell(at), Role::Computing);
    h
}

/// Mark a cell as being computed, record it, then write and record the value
fn compute<R: Recorder<DpGrid>>(
    grid: &mut DpGrid,
    at: CellRef,
    deps: Vec<CellRef>,
    value: i64,
    reason: String,
    rec: &mut R,
) {
    let h = computing(at, &deps);
    grid.begin(at, deps);
    rec.record(grid, h, reason);
    grid.fill(at, value);
    rec.record(
        grid,
        Highlights::new().with(cell(at), Role::Found),
        format!("{}[{}][{}] = {}", grid.title, at.0, at.1, value),
    );
}

pub fn lcs_grid(a: &str, b: &str) -> DpGrid {
    let labels = |s: &str| {
        std::iter::once("-".to_string())
            .chain(s.chars().map(|c| c.to_string()))
            .collect::<Vec<_>>()
    };
    DpGrid::new("LCS", labels(a), labels(b))
}

pub fn lcs(a: &str, b: &str) -> Timeline<DpGrid> {
    let mut grid = lcs_grid(a, b);
    let mut rec = TimelineRecorder::new(DomainKind::DynamicProgramming);
    lcs_with(&mut grid, a, b, &mut rec);
    rec.finish(&grid)
}

/// Longest common subsequence of `a` and `b`, filled into `grid`
pub fn lcs_with<R: Recorder<DpGrid>>(
    grid: &mut DpGrid,
    a: &str,
    b: &str,
    rec: &mut R,
) -> String {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (n, m) = (a.len(), b.len());
    rec.record(
        grid,
        Highlights::new(),
        format!(
            "Longest common subsequence of \"{}\" and \"{}\"",
            a.iter().collect::<String>(),
            b.iter().collect::<String>()
        ),
    );

    for i in 0..=n {
        grid.fill((i, 0), 0);
    }
    for j in 0..=m {
        grid.fill((0, j), 0);
    }
    let base: Highlights = (0..=n)
        .map(|i| (cell((i, 0)), Role::Found))
        .chain((0..=m).map(|j| (cell((0, j)), Role::Found)))
        .collect();
    rec.record(
        grid,
        base,
        "Base case: an empty prefix has an LCS of length 0".to_string(),
    );

    for i in 1..=n {
        for j in 1..=m {
            if a[i - 1] == b[j - 1] {
                let value = grid.value((i - 1, j - 1)) + 1;
                compute(
                    grid,
                    (i, j),
                    vec![(i - 1, j - 1)],
                    value,
                    format!("'{}' == '{}': diagonal + 1", a[i - 1], b[j - 1]),
                    rec,
                );
            } else {
                let up = grid.value((i - 1, j));
                let left = grid.value((i, j - 1));
                compute(
                    grid,
                    (i, j),
                    vec![(i - 1, j), (i, j - 1)],
                    up.max(left),
                    format!(
                        "'{}' != '{}': max(up {}, left {})",
                        a[i - 1],
                        b[j - 1],
                        up,
                        left
                    ),
                    rec,
                );
            }
        }
    }

    grid.phase = DpPhase::Backtrace;
    let mut reversed = Vec::new();
    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        grid.mark_path((i, j));
        let message = if a[i - 1] == b[j - 1] {
            reversed.push(a[i - 1]);
            i -= 1;
            j -= 1;
            format!("'{}' matches: it is part of the subsequence, move diagonally", a[i])
        } else if grid.value((i - 1, j)) >= grid.value((i, j - 1)) {
            i -= 1;
            "No match: move up to the larger neighbour".to_string()
        } else {
            j -= 1;
            "No match: move left to the larger neighbour".to_string()
        };
        rec.record(
            grid,
            Highlights::new().with(cell((i, j)), Role::Path),
            message,
        );
    }
    grid.mark_path((i, j));

    let subsequence: String = reversed.into_iter().rev().collect();
    grid.phase = DpPhase::Done;
    let path: Highlights = grid.path_cells().into_iter().map(|c| (cell(c), Role::Path)).collect();
    rec.record_result(
        grid,
        path,
        format!(
            "LCS is \"{}\" (length {})",
            subsequence,
            grid.value((n, m))
        ),
        ResultMarker::Text(subsequence.clone()),
    );
    subsequence
}

pub fn knapsack_grid(items: &[Item], capacity: usize) -> DpGrid {
    let rows = std::iter::once("-".to_string())
        .chain(items.iter().map(|it| format!("{}/{}", it.weight, it.value)))
        .collect();
    let cols = (0..=capacity).map(|w| w.to_string()).collect();
    DpGrid::new("K", rows, cols)
}

pub fn knapsack(items: &[Item], capacity: usize) -> Timeline<DpGrid> {
    let mut grid = knapsack_grid(items, capacity);
    let mut rec = TimelineRecorder::new(DomainKind::DynamicProgramming);
    knapsack_with(&mut grid, items, capacity, &mut rec);
    rec.finish(&grid)
}

/// 0/1 knapsack. Returns the best value and the chosen item indices.
pub fn knapsack_with<R: Recorder<DpGrid>>(
    grid: &mut DpGrid,
    items: &[Item],
    capacity: usize,
    rec: &mut R,
) -> (i64, Vec<usize>) {
    let n = items.len();
    rec.record(
        grid,
        Highlights::new(),
        format!("0/1 knapsack: {} items, capacity {}", n, capacity),
    );
    for w in 0..=capacity {
        grid.fill((0, w), 0);
    }
    let base: Highlights = (0..=capacity).map(|w| (cell((0, w)), Role::Found)).collect();
    rec.record(
        grid,
        base,
        "Base case: with no items the best value is 0".to_string(),
    );

    for i in 1..=n {
        let item = items[i - 1];
        for w in 0..=capacity {
            let skip = grid.value((i - 1, w));
            if item.weight > w {
                compute(
                    grid,
                    (i, w),
                    vec![(i - 1, w)],
                    skip,
                    format!(
                        "Item {} (weight {}) does not fit in capacity {}: keep {}",
                        i, item.weight, w, skip
                    ),
                    rec,
                );
            } else {
                let take = grid.value((i - 1, w - item.weight)) + item.value;
                compute(
                    grid,
                    (i, w),
                    vec![(i - 1, w), (i - 1, w - item.weight)],
                    skip.max(take),
                    format!(
                        "Item {} at capacity {}: max(skip {}, take {} + {} = {})",
                        i,
                        w,
                        skip,
                        item.value,
                        take - item.value,
                        take
                    ),
                    rec,
                );
            }
        }
    }

    grid.phase = DpPhase::Backtrace;
    let best = grid.value((n, capacity));
    let mut chosen = Vec::new();
    let mut w = capacity;
    for i in (1..=n).rev() {
        grid.mark_path((i, w));
        let message = if grid.value((i, w)) != grid.value((i - 1, w)) {
            chosen.push(i);
            w -= items[i - 1].weight;
            format!("Item {} was taken, remaining capacity {}", i, w)
        } else {
            format!("Item {} was skipped", i)
        };
        rec.record(
            grid,
            Highlights::new().with(cell((i, w)), Role::Path),
            message,
        );
    }
    grid.mark_path((0, w));
    chosen.reverse();

    grid.phase = DpPhase::Done;
    let names: Vec<String> = chosen.iter().map(|i| i.to_string()).collect();
    let path: Highlights = grid.path_cells().into_iter().map(|c| (cell(c), Role::Path)).collect();
    rec.record_result(
        grid,
        path,
        format!("Best value {} using items [{}]", best, names.join(", ")),
        ResultMarker::Value(best),
    );
    (best, chosen)
}

pub fn fibonacci_grid(n: usize) -> DpGrid {
    let cols = (0..=n).map(|i| i.to_string()).collect();
    DpGrid::new("fib", vec!["fib".to_string()], cols)
}

pub fn fibonacci(n: usize) -> Timeline<DpGrid> {
    let mut grid = fibonacci_grid(n);
    let mut rec = TimelineRecorder::new(DomainKind::DynamicProgramming);
    fibonacci_with(&mut grid, n, &mut rec);
    rec.finish(&grid)
}

/// Bottom-up Fibonacci. `None` when the value overflows an `i64`.
pub fn fibonacci_with<R: Recorder<DpGrid>>(
    grid: &mut DpGrid,
    n: usize,
    rec: &mut R,
) -> Option<i64> {
    rec.record(
        grid,
        Highlights::new(),
        format!("Fibonacci numbers up to fib({})", n),
    );
    grid.fill((0, 0), 0);
    let mut base = Highlights::new().with(cell((0, 0)), Role::Found);
    if n >= 1 {
        grid.fill((0, 1), 1);
        base.insert(cell((0, 1)), Role::Found);
    }
    rec.record(grid, base, "Base cases: fib(0) = 0, fib(1) = 1".to_string());

    for i in 2..=n {
        let (a, b) = (grid.value((0, i - 1)), grid.value((0, i - 2)));
        let Some(value) = a.checked_add(b) else {
            rec.record_result(
                grid,
                Highlights::new().with(cell((0, i)), Role::Computing),
                format!("Overflow: fib({}) does not fit in 64 bits", i),
                ResultMarker::NotFound,
            );
            return None;
        };
        compute(
            grid,
            (0, i),
            vec![(0, i - 1), (0, i - 2)],
            value,
            format!("fib({}) = fib({}) + fib({}) = {} + {}", i, i - 1, i - 2, a, b),
            rec,
        );
    }

    grid.phase = DpPhase::Backtrace;
    for i in (2..=n).rev() {
        grid.mark_path((0, i));
        let h = Highlights::new()
            .with(cell((0, i)), Role::Path)
            .with(cell((0, i - 1)), Role::Dependency)
            .with(cell((0, i - 2)), Role::Dependency);
        rec.record(
            grid,
            h,
            format!("fib({}) was built from fib({}) and fib({})", i, i - 1, i - 2),
        );
    }
    grid.mark_path((0, n.min(1)));
    if n >= 1 {
        grid.mark_path((0, 0));
    }

    grid.phase = DpPhase::Done;
    let value = grid.value((0, n));
    rec.record_result(
        grid,
        Highlights::new().with(cell((0, n)), Role::Found),
        format!("fib({}) = {}", n, value),
        ResultMarker::Value(value),
    );
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dp::CellStatus;
    use crate::snapshot::NullRecorder;

    #[test]
    fn test_every_fill_is_preceded_by_its_computing_step() {
        let timeline = lcs("AB", "B");
        for (i, step) in timeline.steps().iter().enumerate() {
            let computing = step
                .highlighted()
                .iter()
                .find(|(_, role)| **role == Role::Computing);
            if let Some((ElementId::Cell(r, c), _)) = computing {
                let cell = step.snapshot().cell((*r, *c));
                assert_eq!(cell.status, CellStatus::Computing);
                assert!(!cell.deps.is_empty());
                let next = timeline.get(i + 1).map(|s| s.snapshot().cell((*r, *c)).value);
                assert!(next.flatten().is_some());
            }
        }
    }

    #[test]
    fn test_knapsack_chooses_items() {
        let items = [Item::new(1, 1), Item::new(3, 4), Item::new(4, 5), Item::new(5, 7)];
        let mut grid = knapsack_grid(&items, 7);
        let (best, chosen) = knapsack_with(&mut grid, &items, 7, &mut NullRecorder);
        assert_eq!(best, 9);
        assert_eq!(chosen, vec![2, 3]);
    }

    #[test]
    fn test_fibonacci() {
        let mut grid = fibonacci_grid(10);
        assert_eq!(fibonacci_with(&mut grid, 10, &mut NullRecorder), Some(55));
        let mut grid = fibonacci_grid(0);
        assert_eq!(fibonacci_with(&mut grid, 0, &mut NullRecorder), Some(0));
        let mut grid = fibonacci_grid(100);
        assert_eq!(fibonacci_with(&mut grid, 100, &mut NullRecorder), None);
    }
}
