//! Weighted grid for pathfinding
//!
//! Cells are stored row-major. Search scratch (distance, A* scores,
//! predecessor) lives on the cell so every recorded step shows it.

use crate::error::{InputError, Result};
use crate::snapshot::{DomainKind, DomainState};

/// Grid coordinate `(row, col)`
pub type Coord = (usize, usize);

/// Heaviest cell weight, the largest digit a layout can hold
pub const MAX_WEIGHT: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Wall,
    Start,
    Finish,
    Visited,
    Path,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub kind: CellKind,
    /// Cost of entering this cell
    pub weight: u32,
    pub distance: Option<u32>,
    pub g: Option<u32>,
    pub h: Option<u32>,
    pub f: Option<u32>,
    pub previous: Option<Coord>,
}

impl GridCell {
    fn new(kind: CellKind) -> Self {
        GridCell {
            kind,
            weight: 1,
            distance: None,
            g: None,
            h: None,
            f: None,
            previous: None,
        }
    }

    fn clear_scratch(&mut self) {
        self.distance = None;
        self.g = None;
        self.h = None;
        self.f = None;
        self.previous = None;
        if matches!(self.kind, CellKind::Visited | CellKind::Path) {
            self.kind = CellKind::Empty;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    pub rows: usize,
    pub cols: usize,
    pub start: Coord,
    pub finish: Coord,
    cells: Vec<GridCell>,
}

impl GridState {
    pub fn new(rows: usize, cols: usize, start: Coord, finish: Coord) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(InputError::InvalidGrid(format!("{}x{} grid", rows, cols)));
        }
        let mut grid = GridState {
            rows,
            cols,
            start,
            finish,
            cells: vec![GridCell::new(CellKind::Empty); rows * cols],
        };
        grid.check(start)?;
        grid.check(finish)?;
        if start == finish {
            return Err(InputError::InvalidGrid(
                "start and finish must differ".to_string(),
            ));
        }
        grid.cell_mut(start).kind = CellKind::Start;
        grid.cell_mut(finish).kind = CellKind::Finish;
        Ok(grid)
    }

    /// Parse a text layout: `S` start, `F` finish, `#` wall, `.` empty,
    /// digits `1`-`9` weighted empty cells.
    pub fn parse(layout: &str) -> Result<Self> {
        let rows: Vec<&str> = layout
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        if rows.iter().any(|r| r.chars().count() != width) {
            return Err(InputError::InvalidGrid("rows differ in length".to_string()));
        }

        let mut start = None;
        let mut finish = None;
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                match ch {
                    'S' => start = Some((r, c)),
                    'F' => finish = Some((r, c)),
                    _ => {}
                }
            }
        }
        let start = start.ok_or_else(|| InputError::InvalidGrid("no start cell".to_string()))?;
        let finish = finish.ok_or_else(|| InputError::InvalidGrid("no finish cell".to_string()))?;

        let mut grid = GridState::new(height, width, start, finish)?;
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                match ch {
                    '#' => grid.cell_mut((r, c)).kind = CellKind::Wall,
                    '1'..='9' => grid.cell_mut((r, c)).weight = ch as u32 - '0' as u32,
                    '.' | 'S' | 'F' => {}
                    other => {
                        return Err(InputError::InvalidGrid(format!(
                            "unexpected '{}' at ({}, {})",
                            other, r, c
                        )))
                    }
                }
            }
        }
        Ok(grid)
    }

    pub fn check(&self, at: Coord) -> Result<Coord> {
        if at.0 >= self.rows || at.1 >= self.cols {
            return Err(InputError::InvalidGrid(format!(
                "({}, {}) is outside the {}x{} grid",
                at.0, at.1, self.rows, self.cols
            )));
        }
        Ok(at)
    }

    pub fn cell(&self, at: Coord) -> &GridCell {
        &self.cells[at.0 * self.cols + at.1]
    }

    pub fn cell_mut(&mut self, at: Coord) -> &mut GridCell {
        let cols = self.cols;
        &mut self.cells[at.0 * cols + at.1]
    }

    pub fn is_wall(&self, at: Coord) -> bool {
        self.cell(at).kind == CellKind::Wall
    }

    /// Open neighbours in up, right, down, left order
    pub fn neighbors(&self, at: Coord) -> Vec<Coord> {
        let (r, c) = at;
        let mut out = Vec::with_capacity(4);
        if r > 0 {
            out.push((r - 1, c));
        }
        if c + 1 < self.cols {
            out.push((r, c + 1));
        }
        if r + 1 < self.rows {
            out.push((r + 1, c));
        }
        if c > 0 {
            out.push((r, c - 1));
        }
        out.retain(|&n| !self.is_wall(n));
        out
    }

    /// Manhattan distance to the finish cell
    pub fn manhattan(&self, at: Coord) -> u32 {
        (at.0.abs_diff(self.finish.0) + at.1.abs_diff(self.finish.1)) as u32
    }

    /// Mark a visited cell without overwriting start/finish
    pub fn mark(&mut self, at: Coord, kind: CellKind) {
        let cell = self.cell_mut(at);
        if !matches!(cell.kind, CellKind::Start | CellKind::Finish) {
            cell.kind = kind;
        }
    }

    /// Forget the previous search, keeping walls and weights
    pub fn clear_search(&mut self) {
        for cell in &mut self.cells {
            cell.clear_scratch();
        }
    }

    pub fn toggle_wall(&mut self, at: Coord) -> Result<bool> {
        self.check(at)?;
        let cell = self.cell_mut(at);
        match cell.kind {
            CellKind::Start | CellKind::Finish => Err(InputError::InvalidGrid(
                "cannot place a wall on start or finish".to_string(),
            )),
            CellKind::Wall => {
                cell.kind = CellKind::Empty;
                Ok(false)
            }
            _ => {
                cell.kind = CellKind::Wall;
                Ok(true)
            }
        }
    }

    /// Weights are limited to the digits a layout can express
    pub fn set_weight(&mut self, at: Coord, weight: u32) -> Result<()> {
        self.check(at)?;
        if !(1..=MAX_WEIGHT).contains(&weight) {
            return Err(InputError::OutOfRange {
                value: i64::from(weight),
                min: 1,
                max: i64::from(MAX_WEIGHT),
            });
        }
        self.cell_mut(at).weight = weight;
        Ok(())
    }

    pub fn set_start(&mut self, at: Coord) -> Result<()> {
        self.move_endpoint(at, true)
    }

    pub fn set_finish(&mut self, at: Coord) -> Result<()> {
        self.move_endpoint(at, false)
    }

    fn move_endpoint(&mut self, at: Coord, is_start: bool) -> Result<()> {
        self.check(at)?;
        let other = if is_start { self.finish } else { self.start };
        if at == other {
            return Err(InputError::InvalidGrid(
                "start and finish must differ".to_string(),
            ));
        }
        let old = if is_start { self.start } else { self.finish };
        self.cell_mut(old).kind = CellKind::Empty;
        let kind = if is_start {
            self.start = at;
            CellKind::Start
        } else {
            self.finish = at;
            CellKind::Finish
        };
        self.cell_mut(at).kind = kind;
        Ok(())
    }
}

impl DomainState for GridState {
    fn kind(&self) -> DomainKind {
        DomainKind::Pathfinding
    }

    fn describe(&self) -> Vec<String> {
        (0..self.rows)
            .map(|r| {
                (0..self.cols)
                    .map(|c| {
                        let cell = self.cell((r, c));
                        match cell.kind {
                            CellKind::Empty if cell.weight > 1 => {
                                char::from_digit(cell.weight, 10).unwrap_or('?')
                            }
                            CellKind::Empty => '.',
                            CellKind::Wall => '#',
                            CellKind::Start => 'S',
                            CellKind::Finish => 'F',
                            CellKind::Visited => 'o',
                            CellKind::Path => '*',
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout() {
        let grid = GridState::parse("S.#\n.3F").unwrap();
        assert_eq!(grid.rows, 2);
        assert_eq!(grid.cols, 3);
        assert_eq!(grid.start, (0, 0));
        assert_eq!(grid.finish, (1, 2));
        assert!(grid.is_wall((0, 2)));
        assert_eq!(grid.cell((1, 1)).weight, 3);
        assert_eq!(grid.describe(), vec!["S.#", ".3F"]);
    }

    #[test]
    fn test_neighbors_skip_walls() {
        let grid = GridState::parse("S#\n.F").unwrap();
        assert_eq!(grid.neighbors((0, 0)), vec![(1, 0)]);
        assert_eq!(grid.neighbors((1, 0)), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_invalid_layouts() {
        assert!(GridState::parse("..\n.F").is_err());
        assert!(GridState::parse("S.\n.").is_err());
        assert!(GridState::parse("S?F").is_err());
    }

    #[test]
    fn test_weight_range() {
        let mut grid = GridState::parse("S..F").unwrap();
        assert_eq!(grid.set_weight((0, 1), MAX_WEIGHT), Ok(()));
        assert_eq!(
            grid.set_weight((0, 2), u32::MAX),
            Err(InputError::OutOfRange {
                value: u32::MAX as i64,
                min: 1,
                max: 9
            })
        );
        assert!(grid.set_weight((0, 2), 0).is_err());
        assert_eq!(grid.cell((0, 2)).weight, 1);
    }

    #[test]
    fn test_toggle_wall_protects_endpoints() {
        let mut grid = GridState::parse("S.F").unwrap();
        assert!(grid.toggle_wall((0, 0)).is_err());
        assert_eq!(grid.toggle_wall((0, 1)), Ok(true));
        assert_eq!(grid.toggle_wall((0, 1)), Ok(false));
    }
}
