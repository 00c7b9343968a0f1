use super::grid::Grid;
use super::{Cell, Maze, MazeId};

/// Per-cell integer scratch space owned by a single algorithm run.
///
/// Distances, region ids and protection marks each live in their own
/// `Labels`, never in the maze itself.
#[derive(Debug, Clone)]
pub struct Labels {
    maze: MazeId,
    grid: Grid<u32>,
}

impl Labels {
    pub fn new(maze: &Maze, value: u32) -> Self {
        Labels {
            maze: maze.id(),
            grid: Grid::new(maze.width() as u16, maze.height() as u16, value),
        }
    }

    pub fn get(&self, cell: Cell) -> u32 {
        debug_assert_eq!(cell.maze_id(), self.maze, "label lookup with a foreign cell");
        self.grid[cell.coord()]
    }

    pub fn set(&mut self, cell: Cell, value: u32) {
        debug_assert_eq!(cell.maze_id(), self.maze, "label update with a foreign cell");
        self.grid[cell.coord()] = value;
    }

    pub(crate) fn at(&self, coord: (u16, u16)) -> u32 {
        self.grid[coord]
    }

    /// Sets every label to `value`.
    pub fn reset(&mut self, value: u32) {
        self.grid.fill(value);
    }
}
