use std::collections::VecDeque;

use crate::maze::{Cell, Labels, Maze};

/// Breadth-first step counts from the start of a maze.
///
/// The start holds 1 and every reached cell holds one more than its
/// predecessor; 0 means unreached. The destination is labeled but never
/// expanded, so nothing past it is reached through it.
pub struct DistanceField {
    labels: Labels,
    dest: Cell,
}

impl DistanceField {
    pub fn compute(maze: &Maze) -> Self {
        let mut labels = Labels::new(maze, 0);
        let start = maze.start();
        labels.set(start, 1);

        let mut queue = VecDeque::from([start]);
        while let Some(cell) = queue.pop_front() {
            if maze.is_dest(cell) {
                continue;
            }
            let next = labels.get(cell) + 1;
            for neighbor in maze.passable_adjacent(cell) {
                if labels.get(neighbor) == 0 {
                    labels.set(neighbor, next);
                    queue.push_back(neighbor);
                }
            }
        }

        DistanceField {
            labels,
            dest: maze.dest(),
        }
    }

    /// One-based distance of `cell`, or 0 when unreached.
    pub fn get(&self, cell: Cell) -> u32 {
        self.labels.get(cell)
    }

    /// Cell count of a shortest route, `None` when the destination is unreachable.
    pub fn dest_distance(&self) -> Option<usize> {
        match self.labels.get(self.dest) {
            0 => None,
            d => Some(d as usize),
        }
    }
}

/// Cell count of a shortest route from start to destination, start included.
///
/// Stops as soon as the destination is dequeued; `None` when it is unreachable.
pub fn shortest_length(maze: &Maze) -> Option<usize> {
    let mut steps = Labels::new(maze, 0);
    let start = maze.start();
    steps.set(start, 1);

    let mut queue = VecDeque::from([start]);
    while let Some(cell) = queue.pop_front() {
        if maze.is_dest(cell) {
            return Some(steps.get(cell) as usize);
        }
        for neighbor in maze.passable_adjacent(cell) {
            if steps.get(neighbor) == 0 {
                steps.set(neighbor, steps.get(cell) + 1);
                queue.push_back(neighbor);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_grid_length() {
        let maze = Maze::new(3, 3, (0, 0), (2, 2)).unwrap();
        assert_eq!(shortest_length(&maze), Some(5));
        assert_eq!(DistanceField::compute(&maze).dest_distance(), Some(5));
    }

    #[test]
    fn test_start_equals_dest() {
        let maze = Maze::new(1, 1, (0, 0), (0, 0)).unwrap();
        assert_eq!(shortest_length(&maze), Some(1));
    }

    #[test]
    fn test_unreachable() {
        let maze = Maze::from_matrix(&[vec![0, 1, 0]], (0, 0), (0, 2)).unwrap();
        assert_eq!(shortest_length(&maze), None);
        let field = DistanceField::compute(&maze);
        assert_eq!(field.dest_distance(), None);
        assert_eq!(field.get(maze.cell(0, 0).unwrap()), 1);
        assert_eq!(field.get(maze.cell(0, 1).unwrap()), 0);
    }

    #[test]
    fn test_destination_is_not_expanded() {
        let maze = Maze::new(4, 1, (0, 0), (0, 2)).unwrap();
        let field = DistanceField::compute(&maze);
        assert_eq!(field.get(maze.cell(0, 2).unwrap()), 3);
        assert_eq!(field.get(maze.cell(0, 3).unwrap()), 0);
    }

    #[test]
    fn test_detour() {
        let maze = Maze::from_matrix(
            &[vec![0, 1, 0], vec![0, 1, 0], vec![0, 0, 0]],
            (0, 0),
            (0, 2),
        )
        .unwrap();
        assert_eq!(shortest_length(&maze), Some(7));
    }
}
