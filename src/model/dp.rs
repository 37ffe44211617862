//! Dynamic programming table

use crate::snapshot::{DomainKind, DomainState};

/// Grid coordinate `(row, col)`
pub type CellRef = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    Empty,
    Computing,
    Filled,
    Path,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DpCell {
    pub value: Option<i64>,
    pub status: CellStatus,
    /// Cells the recurrence read to compute this one
    pub deps: Vec<CellRef>,
}

impl DpCell {
    fn empty() -> Self {
        DpCell {
            value: None,
            status: CellStatus::Empty,
            deps: Vec::new(),
        }
    }
}

/// Which part of the algorithm produced a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DpPhase {
    Fill,
    Backtrace,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DpGrid {
    pub title: String,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub phase: DpPhase,
    cells: Vec<Vec<DpCell>>,
}

impl DpGrid {
    pub fn new(title: impl Into<String>, row_labels: Vec<String>, col_labels: Vec<String>) -> Self {
        let cells = vec![vec![DpCell::empty(); col_labels.len()]; row_labels.len()];
        DpGrid {
            title: title.into(),
            row_labels,
            col_labels,
            phase: DpPhase::Fill,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, |r| r.len())
    }

    pub fn cell(&self, at: CellRef) -> &DpCell {
        &self.cells[at.0][at.1]
    }

    /// Value of a filled cell, 0 if it has not been written
    pub fn value(&self, at: CellRef) -> i64 {
        self.cells[at.0][at.1].value.unwrap_or(0)
    }

    pub fn begin(&mut self, at: CellRef, deps: Vec<CellRef>) {
        let cell = &mut self.cells[at.0][at.1];
        cell.status = CellStatus::Computing;
        cell.deps = deps;
    }

    pub fn fill(&mut self, at: CellRef, value: i64) {
        let cell = &mut self.cells[at.0][at.1];
        cell.value = Some(value);
        cell.status = CellStatus::Filled;
    }

    pub fn mark_path(&mut self, at: CellRef) {
        self.cells[at.0][at.1].status = CellStatus::Path;
    }

    /// Cells on the backtraced path, in row-major order
    pub fn path_cells(&self) -> Vec<CellRef> {
        let mut out = Vec::new();
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.status == CellStatus::Path {
                    out.push((r, c));
                }
            }
        }
        out
    }
}

impl DomainState for DpGrid {
    fn kind(&self) -> DomainKind {
        DomainKind::DynamicProgramming
    }

    fn describe(&self) -> Vec<String> {
        let width = 5;
        let mut lines = vec![self.title.clone()];
        let header: String = self
            .col_labels
            .iter()
            .map(|l| format!("{:>width$}", l, width = width))
            .collect();
        lines.push(format!("{:>6}{}", "", header));
        for (r, row) in self.cells.iter().enumerate() {
            let cells: String = row
                .iter()
                .map(|cell| {
                    let text = match (cell.value, cell.status) {
                        (_, CellStatus::Computing) => "?".to_string(),
                        (Some(v), CellStatus::Path) => format!("<{}>", v),
                        (Some(v), _) => v.to_string(),
                        (None, _) => ".".to_string(),
                    };
                    format!("{:>width$}", text, width = width)
                })
                .collect();
            lines.push(format!("{:>6}{}", self.row_labels[r], cells));
        }
        lines
    }
}
