pub mod cell;
mod grid;
mod labels;
pub mod route;
mod text;

use smallvec::SmallVec;

pub use cell::{Cell, MazeId, Passability};
pub use labels::Labels;
pub use route::Route;

use crate::error::{MazeError, Result};
use grid::Grid;

/// Largest accepted width or height.
pub const MAX_SIZE: usize = 50_000;

/// Neighbor offsets `(row, col)` in the fixed visiting order: south, east, north, west.
const DIRECTIONS: [(i64, i64); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Up to four orthogonal neighbors of a cell.
pub type Neighbors = SmallVec<[Cell; 4]>;

/// A rectangular maze of passable cells and obstacles with a fixed start and destination.
pub struct Maze {
    id: MazeId,
    grid: Grid<Passability>,
    start: (u16, u16),
    dest: (u16, u16),
}

impl Maze {
    /// Creates an all-passable maze.
    ///
    /// `start` and `dest` are `(row, col)` pairs and must lie inside the maze.
    pub fn new(
        width: usize,
        height: usize,
        start: (usize, usize),
        dest: (usize, usize),
    ) -> Result<Self> {
        let (width, height) = validate_dimensions(width, height)?;
        Maze::with_grid(Grid::new(width, height, Passability::Passable), start, dest)
    }

    /// Creates a maze from rows of `0`/`1` values.
    ///
    /// Returns [`MazeError::MalformedGrid`] when rows differ in length and
    /// [`MazeError::InvalidCellValue`] for any value other than 0 or 1.
    pub fn from_matrix(
        rows: &[Vec<u8>],
        start: (usize, usize),
        dest: (usize, usize),
    ) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let (w, h) = validate_dimensions(width, height)?;

        let mut grid = Grid::new(w, h, Passability::Passable);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(MazeError::MalformedGrid {
                    line: r + 1,
                    reason: format!("expected {} values, found {}", width, row.len()),
                });
            }
            for (c, &value) in row.iter().enumerate() {
                grid[(r as u16, c as u16)] = Passability::try_from(value)?;
            }
        }
        Maze::with_grid(grid, start, dest)
    }

    fn with_grid(
        grid: Grid<Passability>,
        start: (usize, usize),
        dest: (usize, usize),
    ) -> Result<Self> {
        let start = validate_coord(start, grid.width(), grid.height())?;
        let dest = validate_coord(dest, grid.width(), grid.height())?;
        Ok(Maze {
            id: MazeId::fresh(),
            grid,
            start,
            dest,
        })
    }

    pub fn id(&self) -> MazeId {
        self.id
    }

    pub fn height(&self) -> usize {
        self.grid.height() as usize
    }

    pub fn width(&self) -> usize {
        self.grid.width() as usize
    }

    /// Number of cells in the maze.
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Returns the cell at `(row, col)`, or `None` when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.height() && col < self.width())
            .then(|| Cell::new(self.id, row as u16, col as u16))
    }

    pub fn start(&self) -> Cell {
        Cell::new(self.id, self.start.0, self.start.1)
    }

    pub fn dest(&self) -> Cell {
        Cell::new(self.id, self.dest.0, self.dest.1)
    }

    /// Identity comparison: a cell from another maze is never the start.
    pub fn is_start(&self, cell: Cell) -> bool {
        cell == self.start()
    }

    pub fn is_dest(&self, cell: Cell) -> bool {
        cell == self.dest()
    }

    /// Whether `cell` was handed out by this maze instance.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.maze_id() == self.id
    }

    fn check(&self, cell: Cell) -> Result<(u16, u16)> {
        if self.contains(cell) {
            Ok(cell.coord())
        } else {
            Err(MazeError::ForeignCell {
                row: cell.row(),
                col: cell.col(),
            })
        }
    }

    pub fn passability(&self, cell: Cell) -> Result<Passability> {
        Ok(self.grid[self.check(cell)?])
    }

    pub fn is_passable(&self, cell: Cell) -> Result<bool> {
        Ok(self.passability(cell)? == Passability::Passable)
    }

    pub fn set(&mut self, cell: Cell, value: Passability) -> Result<()> {
        let coord = self.check(cell)?;
        self.grid[coord] = value;
        Ok(())
    }

    /// Sets the cell at `(row, col)` from its serialized value.
    pub fn set_passability(&mut self, row: usize, col: usize, value: u8) -> Result<()> {
        let value = Passability::try_from(value)?;
        let cell = self.cell(row, col).ok_or(MazeError::InvalidCoordinate {
            row,
            col,
            width: self.width(),
            height: self.height(),
        })?;
        self.set(cell, value)
    }

    /// Sets every cell, start and destination included, to `value`.
    pub fn fill(&mut self, value: Passability) {
        self.grid.fill(value);
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.grid
            .enumerate()
            .map(|((row, col), _)| Cell::new(self.id, row, col))
    }

    /// The in-bounds orthogonal neighbors of `cell`, ordered south, east, north, west.
    pub fn neighbors(&self, cell: Cell) -> Result<Neighbors> {
        self.check(cell)?;
        Ok(self.adjacent(cell))
    }

    pub fn passable_neighbors(&self, cell: Cell) -> Result<Neighbors> {
        self.check(cell)?;
        Ok(self.passable_adjacent(cell))
    }

    pub fn obstacle_neighbors(&self, cell: Cell) -> Result<Neighbors> {
        self.check(cell)?;
        Ok(self.obstacle_adjacent(cell))
    }

    /// A dead end has at most one passable neighbor. The cell's own value is not considered.
    pub fn is_dead_end(&self, cell: Cell) -> Result<bool> {
        self.check(cell)?;
        Ok(self.dead_end(cell))
    }

    // The unchecked variants below are for cells this maze handed out itself.

    pub(crate) fn adjacent(&self, cell: Cell) -> Neighbors {
        debug_assert!(self.contains(cell));
        let (row, col) = (cell.row() as i64, cell.col() as i64);
        DIRECTIONS
            .iter()
            .filter_map(|&(dr, dc)| {
                let (r, c) = (row + dr, col + dc);
                let in_bounds = r >= 0
                    && c >= 0
                    && (r as usize) < self.height()
                    && (c as usize) < self.width();
                in_bounds.then(|| Cell::new(self.id, r as u16, c as u16))
            })
            .collect()
    }

    fn adjacent_where(&self, cell: Cell, value: Passability) -> Neighbors {
        let mut neighbors = self.adjacent(cell);
        neighbors.retain(|n| self.grid[n.coord()] == value);
        neighbors
    }

    pub(crate) fn passable_adjacent(&self, cell: Cell) -> Neighbors {
        self.adjacent_where(cell, Passability::Passable)
    }

    pub(crate) fn obstacle_adjacent(&self, cell: Cell) -> Neighbors {
        self.adjacent_where(cell, Passability::Obstacle)
    }

    pub(crate) fn dead_end(&self, cell: Cell) -> bool {
        self.passable_adjacent(cell).len() <= 1
    }

    pub(crate) fn open(&self, cell: Cell) -> bool {
        debug_assert!(self.contains(cell));
        self.grid[cell.coord()] == Passability::Passable
    }

    pub(crate) fn put(&mut self, cell: Cell, value: Passability) {
        debug_assert!(self.contains(cell));
        self.grid[cell.coord()] = value;
    }

    fn all_where(&self, value: Passability) -> Vec<Cell> {
        self.grid
            .enumerate()
            .filter(|&(_, v)| v == value)
            .map(|((row, col), _)| Cell::new(self.id, row, col))
            .collect()
    }

    fn all_labeled(&self, value: Passability, labels: &Labels, label: u32) -> Vec<Cell> {
        self.grid
            .enumerate()
            .filter(|&(coord, v)| v == value && labels.at(coord) == label)
            .map(|((row, col), _)| Cell::new(self.id, row, col))
            .collect()
    }

    pub fn all_obstacles(&self) -> Vec<Cell> {
        self.all_where(Passability::Obstacle)
    }

    pub fn all_passable(&self) -> Vec<Cell> {
        self.all_where(Passability::Passable)
    }

    /// Obstacles whose entry in `labels` equals `label`.
    pub fn all_obstacles_labeled(&self, labels: &Labels, label: u32) -> Vec<Cell> {
        self.all_labeled(Passability::Obstacle, labels, label)
    }

    /// Passable cells whose entry in `labels` equals `label`.
    pub fn all_passable_labeled(&self, labels: &Labels, label: u32) -> Vec<Cell> {
        self.all_labeled(Passability::Passable, labels, label)
    }

    pub fn obstacle_count(&self) -> usize {
        self.grid.values().filter(|&v| v == Passability::Obstacle).count()
    }

    pub fn passable_count(&self) -> usize {
        self.area() - self.obstacle_count()
    }

    /// Percentage of cells that are obstacles.
    pub fn density(&self) -> f64 {
        self.obstacle_count() as f64 * 100.0 / self.area() as f64
    }

    /// Deep copy with a fresh identity. Cells of the copy do not match cells of `self`.
    pub fn copy(&self) -> Maze {
        Maze {
            id: MazeId::fresh(),
            grid: self.grid.clone(),
            start: self.start,
            dest: self.dest,
        }
    }
}

impl Clone for Maze {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl std::fmt::Debug for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Maze")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("start", &self.start)
            .field("dest", &self.dest)
            .field("obstacles", &self.obstacle_count())
            .finish()
    }
}

fn validate_dimensions(width: usize, height: usize) -> Result<(u16, u16)> {
    let valid = |n: usize| (1..=MAX_SIZE).contains(&n);
    if valid(width) && valid(height) {
        Ok((width as u16, height as u16))
    } else {
        Err(MazeError::InvalidDimension { width, height })
    }
}

fn validate_coord(coord: (usize, usize), width: u16, height: u16) -> Result<(u16, u16)> {
    let (row, col) = coord;
    if row < height as usize && col < width as usize {
        Ok((row as u16, col as u16))
    } else {
        Err(MazeError::InvalidCoordinate {
            row,
            col,
            width: width as usize,
            height: height as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(width: usize, height: usize) -> Maze {
        Maze::new(width, height, (0, 0), (height - 1, width - 1)).unwrap()
    }

    #[test]
    fn test_dimension_bounds() {
        assert!(matches!(
            Maze::new(0, 5, (0, 0), (0, 0)),
            Err(MazeError::InvalidDimension { .. })
        ));
        assert!(matches!(
            Maze::new(5, MAX_SIZE + 1, (0, 0), (0, 0)),
            Err(MazeError::InvalidDimension { .. })
        ));
        assert!(Maze::new(1, 1, (0, 0), (0, 0)).is_ok());
    }

    #[test]
    fn test_coordinate_bounds() {
        assert!(matches!(
            Maze::new(5, 5, (5, 0), (0, 0)),
            Err(MazeError::InvalidCoordinate { row: 5, col: 0, .. })
        ));
        assert!(matches!(
            Maze::new(5, 5, (0, 0), (0, 5)),
            Err(MazeError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_from_matrix() {
        let maze = Maze::from_matrix(&[vec![0, 1], vec![0, 0]], (0, 0), (1, 1)).unwrap();
        assert_eq!(maze.width(), 2);
        assert_eq!(maze.height(), 2);
        assert_eq!(maze.obstacle_count(), 1);
        assert!(matches!(
            Maze::from_matrix(&[vec![0, 2]], (0, 0), (0, 1)),
            Err(MazeError::InvalidCellValue(2))
        ));
        assert!(matches!(
            Maze::from_matrix(&[vec![0, 0], vec![0]], (0, 0), (0, 1)),
            Err(MazeError::MalformedGrid { line: 2, .. })
        ));
        assert!(matches!(
            Maze::from_matrix(&[], (0, 0), (0, 0)),
            Err(MazeError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_set_passability() {
        let mut maze = open(3, 3);
        maze.set_passability(1, 1, 1).unwrap();
        assert!(!maze.is_passable(maze.cell(1, 1).unwrap()).unwrap());
        assert!(matches!(
            maze.set_passability(1, 1, 3),
            Err(MazeError::InvalidCellValue(3))
        ));
        assert!(matches!(
            maze.set_passability(3, 0, 1),
            Err(MazeError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_neighbor_order() {
        let maze = open(3, 3);
        let center = maze.cell(1, 1).unwrap();
        let coords = maze
            .neighbors(center)
            .unwrap()
            .iter()
            .map(|c| (c.row(), c.col()))
            .collect::<Vec<_>>();
        assert_eq!(coords, vec![(2, 1), (1, 2), (0, 1), (1, 0)]);

        let corner = maze.cell(0, 0).unwrap();
        let coords = maze
            .neighbors(corner)
            .unwrap()
            .iter()
            .map(|c| (c.row(), c.col()))
            .collect::<Vec<_>>();
        assert_eq!(coords, vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn test_filtered_neighbors_and_dead_end() {
        let mut maze = open(3, 3);
        let center = maze.cell(1, 1).unwrap();
        maze.set_passability(2, 1, 1).unwrap();
        maze.set_passability(1, 2, 1).unwrap();
        maze.set_passability(0, 1, 1).unwrap();
        assert_eq!(maze.obstacle_neighbors(center).unwrap().len(), 3);
        assert_eq!(maze.passable_neighbors(center).unwrap().len(), 1);
        assert!(maze.is_dead_end(center).unwrap());
        // (0, 1) is blocked, leaving (1, 0) as the only way out
        assert!(maze.is_dead_end(maze.cell(0, 0).unwrap()).unwrap());
        assert!(!maze.is_dead_end(maze.cell(1, 0).unwrap()).unwrap());
    }

    #[test]
    fn test_dead_end_boundary() {
        let mut maze = open(3, 3);
        let corner = maze.cell(0, 0).unwrap();
        assert_eq!(maze.passable_neighbors(corner).unwrap().len(), 2);
        assert!(!maze.is_dead_end(corner).unwrap());

        maze.set_passability(1, 0, 1).unwrap();
        assert_eq!(maze.passable_neighbors(corner).unwrap().len(), 1);
        assert!(maze.is_dead_end(corner).unwrap());

        maze.set_passability(0, 1, 1).unwrap();
        assert!(maze.is_dead_end(corner).unwrap());
    }

    #[test]
    fn test_set_rejects_foreign_cell() {
        let mut maze = open(3, 3);
        let other = open(3, 3);
        let foreign = other.cell(2, 1).unwrap();
        assert!(matches!(
            maze.set(foreign, Passability::Obstacle),
            Err(MazeError::ForeignCell { row: 2, col: 1 })
        ));
        assert_eq!(maze.obstacle_count(), 0);
    }

    #[test]
    fn test_foreign_cell_is_rejected() {
        let maze = open(3, 3);
        let other = open(3, 3);
        let foreign = other.cell(1, 1).unwrap();
        assert!(matches!(
            maze.neighbors(foreign),
            Err(MazeError::ForeignCell { row: 1, col: 1 })
        ));
        assert!(maze.is_dead_end(foreign).is_err());
        assert!(matches!(
            maze.passability(foreign),
            Err(MazeError::ForeignCell { row: 1, col: 1 })
        ));
        assert!(matches!(
            maze.is_passable(foreign),
            Err(MazeError::ForeignCell { .. })
        ));
        assert!(matches!(
            maze.passable_neighbors(foreign),
            Err(MazeError::ForeignCell { .. })
        ));
        assert!(matches!(
            maze.obstacle_neighbors(foreign),
            Err(MazeError::ForeignCell { .. })
        ));
        assert!(!maze.is_start(other.start()));
        assert!(maze.is_start(maze.start()));
    }

    #[test]
    fn test_aggregate_queries() {
        let mut maze = open(4, 2);
        maze.set_passability(0, 1, 1).unwrap();
        maze.set_passability(1, 2, 1).unwrap();
        assert_eq!(maze.all_obstacles().len(), 2);
        assert_eq!(maze.all_passable().len(), 6);
        assert_eq!(maze.density(), 25.0);

        let mut labels = Labels::new(&maze, 0);
        labels.set(maze.cell(1, 2).unwrap(), 5);
        let labeled = maze.all_obstacles_labeled(&labels, 5);
        assert_eq!(labeled, vec![maze.cell(1, 2).unwrap()]);
        assert_eq!(maze.all_passable_labeled(&labels, 0).len(), 6);
    }

    #[test]
    fn test_fill() {
        let mut maze = open(3, 2);
        maze.fill(Passability::Obstacle);
        assert_eq!(maze.obstacle_count(), 6);
        maze.fill(Passability::Passable);
        assert_eq!(maze.passable_count(), 6);
    }

    #[test]
    fn test_copy_is_independent() {
        let mut maze = open(3, 3);
        maze.set_passability(1, 1, 1).unwrap();
        let mut copy = maze.copy();
        assert_eq!(copy.to_text(), maze.to_text());
        assert_ne!(copy.id(), maze.id());
        assert_ne!(copy.start(), maze.start());

        copy.set_passability(0, 1, 1).unwrap();
        assert_eq!(maze.obstacle_count(), 1);
        assert_eq!(copy.obstacle_count(), 2);
    }
}
