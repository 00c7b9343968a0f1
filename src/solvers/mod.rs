mod all_shortest;
mod distance;
mod exhaustive;

use crate::maze::{Maze, Route};

pub use all_shortest::solve;
pub use distance::{DistanceField, shortest_length};
pub use exhaustive::solve_exhaustive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    /// Distance labeling followed by backward route reconstruction.
    AllShortest,
    /// Forward expansion of every simple route, for cross-checking.
    Exhaustive,
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::AllShortest => write!(f, "Two-phase Breadth-First Search"),
            Solver::Exhaustive => write!(f, "Exhaustive Route Expansion"),
        }
    }
}

/// Returns every shortest route of `maze` using the chosen algorithm.
pub fn solve_maze(maze: &Maze, solver: Solver) -> Vec<Route> {
    match solver {
        Solver::AllShortest => solve(maze),
        Solver::Exhaustive => solve_exhaustive(maze),
    }
}
