use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::MazeError;

/// Whether a path may traverse a cell.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Passability {
    #[default]
    Passable,
    Obstacle,
}

impl Passability {
    /// The serialized token for this value.
    pub fn as_u8(self) -> u8 {
        match self {
            Passability::Passable => 0,
            Passability::Obstacle => 1,
        }
    }
}

impl TryFrom<u8> for Passability {
    type Error = MazeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Passability::Passable),
            1 => Ok(Passability::Obstacle),
            other => Err(MazeError::InvalidCellValue(other)),
        }
    }
}

impl fmt::Display for Passability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Process-unique identity of a maze instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MazeId(u64);

impl MazeId {
    pub(crate) fn fresh() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        MazeId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A handle to one cell of a specific maze.
///
/// Two cells are equal only when they come from the same maze instance and
/// sit at the same coordinates, so a cell taken from a copy never matches a
/// cell of the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    maze: MazeId,
    row: u16,
    col: u16,
}

impl Cell {
    pub(crate) fn new(maze: MazeId, row: u16, col: u16) -> Self {
        Cell { maze, row, col }
    }

    pub fn maze_id(&self) -> MazeId {
        self.maze
    }

    pub fn row(&self) -> usize {
        self.row as usize
    }

    pub fn col(&self) -> usize {
        self.col as usize
    }

    /// Storage coordinates `(row, col)`.
    pub(crate) fn coord(&self) -> (u16, u16) {
        (self.row, self.col)
    }

    /// Manhattan distance in moves, ignoring obstacles.
    pub fn manhattan(&self, other: &Cell) -> usize {
        self.row.abs_diff(other.row) as usize + self.col.abs_diff(other.col) as usize
    }

    /// Whether `other` is one orthogonal step away.
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.maze == other.maze && self.manhattan(other) == 1
    }
}
