use super::{Cell, Maze, MazeId};
use crate::error::{MazeError, Result};

/// An ordered run of cells through one maze.
///
/// Cells are pushed onto and popped from the front (the top of the stack);
/// iteration runs from the bottom, so a route built from the destination
/// backwards reads start to destination once reversed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    maze: MazeId,
    cells: Vec<Cell>,
}

impl Route {
    pub fn new(maze: &Maze) -> Self {
        Route {
            maze: maze.id(),
            cells: Vec::new(),
        }
    }

    pub fn maze_id(&self) -> MazeId {
        self.maze
    }

    /// Adds `cell` to the front. Cells of another maze are rejected.
    pub fn push(&mut self, cell: Cell) -> Result<()> {
        if cell.maze_id() != self.maze {
            return Err(MazeError::ForeignCell {
                row: cell.row(),
                col: cell.col(),
            });
        }
        self.cells.push(cell);
        Ok(())
    }

    /// Adds a cell already known to belong to the bound maze.
    pub(crate) fn push_owned(&mut self, cell: Cell) {
        debug_assert_eq!(cell.maze_id(), self.maze);
        self.cells.push(cell);
    }

    /// The front cell.
    pub fn top(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    pub fn pop(&mut self) -> Option<Cell> {
        self.cells.pop()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Number of cells, which is also the one-based path length.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn reverse(&mut self) {
        self.cells.reverse();
    }

    /// Iterates from the bottom of the route to its front.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Coordinates `(row, col)` from bottom to front.
    pub fn coords(&self) -> Vec<(usize, usize)> {
        self.iter().map(|c| (c.row(), c.col())).collect()
    }
}
