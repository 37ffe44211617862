use super::rejected;
use crate::error::{check_len, InputError, Result};
use crate::model::grid::{Coord, GridState};
use crate::playback::{Publish, Session};
use crate::runners::pathfinding::{self, PathAlgorithm};
use tracing::info;

/// Parse `"row,col"` into a coordinate
pub fn parse_coord(text: &str) -> Result<Coord> {
    let invalid = || InputError::InvalidGrid(format!("'{}' is not row,col", text.trim()));
    let (r, c) = text.split_once(',').ok_or_else(invalid)?;
    let r = r.trim().parse::<usize>().map_err(|_| invalid())?;
    let c = c.trim().parse::<usize>().map_err(|_| invalid())?;
    Ok((r, c))
}

impl Session<GridState> {
    pub fn run(&mut self, algorithm: PathAlgorithm) -> Result<()> {
        info!(
            algorithm = algorithm.name(),
            start = ?self.committed().start,
            finish = ?self.committed().finish,
            "pathfinding"
        );
        let timeline = pathfinding::run(self.committed(), algorithm);
        self.launch(timeline, Publish::Batch);
        Ok(())
    }

    /// Install a grid parsed from a text layout
    pub fn load(&mut self, layout: &str) -> Result<()> {
        let grid = GridState::parse(layout).map_err(rejected("load"))?;
        let max = self.config().max_elements;
        check_len("grid rows", grid.rows, max)
            .and_then(|_| check_len("grid columns", grid.cols, max))
            .map_err(rejected("load"))?;
        self.replace(grid);
        Ok(())
    }

    /// Returns whether the cell is now a wall
    pub fn toggle_wall(&mut self, at: Coord) -> Result<bool> {
        self.edit(|grid| {
            grid.clear_search();
            grid.toggle_wall(at)
        })
        .map_err(rejected("toggle_wall"))
    }

    pub fn set_start(&mut self, at: Coord) -> Result<()> {
        self.edit(|grid| {
            grid.clear_search();
            grid.set_start(at)
        })
        .map_err(rejected("set_start"))
    }

    pub fn set_finish(&mut self, at: Coord) -> Result<()> {
        self.edit(|grid| {
            grid.clear_search();
            grid.set_finish(at)
        })
        .map_err(rejected("set_finish"))
    }

    pub fn set_weight(&mut self, at: Coord, weight: u32) -> Result<()> {
        self.edit(|grid| {
            grid.clear_search();
            grid.set_weight(at, weight)
        })
        .map_err(rejected("set_weight"))
    }

    /// Clear the last search, keeping walls and weights
    pub fn reset(&mut self) {
        let mut grid = self.committed().clone();
        grid.clear_search();
        self.replace(grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord(" 2, 3"), Ok((2, 3)));
        assert!(parse_coord("2").is_err());
        assert!(parse_coord("a,1").is_err());
    }
}
