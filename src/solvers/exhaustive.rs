use std::collections::VecDeque;

use super::distance::shortest_length;
use crate::maze::{Maze, Route};

/// Forward route expansion, kept as an oracle for [`super::solve`].
///
/// Grows every simple route from the start breadth-first, dropping routes
/// that hit a dead end other than the destination, until routes grow past the
/// shortest length. Exponential on open mazes; use only on small inputs.
pub fn solve_exhaustive(maze: &Maze) -> Vec<Route> {
    let Some(length) = shortest_length(maze) else {
        return Vec::new();
    };

    let mut routes = Vec::new();
    let mut seed = Route::new(maze);
    seed.push_owned(maze.start());
    if maze.is_dest(maze.start()) {
        routes.push(seed);
        return routes;
    }

    let mut queue = VecDeque::from([seed]);
    while let Some(route) = queue.pop_front() {
        if route.len() >= length {
            break;
        }
        let Some(cell) = route.top() else {
            continue;
        };
        for next in maze.passable_adjacent(cell) {
            if route.contains(next) {
                continue;
            }
            let mut branch = route.clone();
            branch.push_owned(next);
            if maze.is_dest(next) {
                routes.push(branch);
            } else if !maze.dead_end(next) {
                queue.push_back(branch);
            }
        }
    }
    routes
}
