use std::collections::VecDeque;

use super::distance::DistanceField;
use crate::maze::{Maze, Route};

/// Enumerates every shortest route from start to destination.
///
/// Distances come from a forward BFS; routes are then grown backwards from
/// the destination, stepping only onto neighbors exactly one step closer to
/// the start. Each branch yields a distinct route, so there are no duplicates.
/// Returned routes run start to destination. An unreachable destination
/// yields an empty vector.
///
/// Output order follows the south, east, north, west neighbor order.
pub fn solve(maze: &Maze) -> Vec<Route> {
    let field = DistanceField::compute(maze);
    let mut routes = Vec::new();
    if field.dest_distance().is_none() {
        tracing::debug!("[solve] destination unreachable");
        return routes;
    }

    let mut seed = Route::new(maze);
    seed.push_owned(maze.dest());
    let mut queue = VecDeque::from([seed]);

    while let Some(mut route) = queue.pop_front() {
        let Some(cell) = route.top() else {
            continue;
        };
        if maze.is_start(cell) {
            route.reverse();
            routes.push(route);
            continue;
        }

        let step = field.get(cell) - 1;
        let previous = maze
            .passable_adjacent(cell)
            .into_iter()
            .filter(|&p| field.get(p) == step)
            .collect::<Vec<_>>();
        // The last branch reuses the route instead of cloning it
        if let Some((&last, rest)) = previous.split_last() {
            for &p in rest {
                let mut branch = route.clone();
                branch.push_owned(p);
                queue.push_back(branch);
            }
            route.push_owned(last);
            queue.push_back(route);
        }
    }

    tracing::debug!("[solve] found {} shortest routes", routes.len());
    routes
}
