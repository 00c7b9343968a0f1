use std::collections::{HashSet, VecDeque};

use rand::{Rng, rngs::StdRng};

use crate::maze::{Cell, Labels, Maze, Passability, Route};
use crate::solvers::DistanceField;

const UNPROTECTED: u32 = 0;
/// Obstacles bordering the protected route.
const PROTECTED: u32 = 1;

/// Opens `amount` obstacles, preferring those away from one shortest route.
///
/// Obstacles next to the protected route are only opened once every other
/// obstacle is gone, which may then create shortcuts.
pub(super) fn dig_route(maze: &mut Maze, amount: usize, rng: &mut StdRng) {
    let Some(route) = any_shortest_route(maze) else {
        return;
    };

    let mut protection = Labels::new(maze, UNPROTECTED);
    for cell in route.iter() {
        for wall in maze.obstacle_adjacent(cell) {
            protection.set(wall, PROTECTED);
        }
    }

    let mut remaining = amount;
    for label in [UNPROTECTED, PROTECTED] {
        let mut walls = maze.all_obstacles_labeled(&protection, label);
        if label == PROTECTED && remaining > 0 {
            tracing::debug!(
                "[density] opening {} protected obstacles next to the route",
                remaining
            );
        }
        while remaining > 0 && !walls.is_empty() {
            let wall = walls.swap_remove(rng.random_range(0..walls.len()));
            maze.put(wall, Passability::Passable);
            remaining -= 1;
        }
    }
}

/// Closes `amount` passable cells without cutting the start off the destination.
///
/// Dead-end branches are filled from their tips inwards, picking a random
/// branch each time. Cells on the protected route are never filled. When no
/// branch can be shortened any further, random cells off the protected route
/// are filled instead.
pub(super) fn fill_route(maze: &mut Maze, amount: usize, rng: &mut StdRng) {
    let (mut branches, protected) = dead_end_branches(maze);
    let Some(protected) = protected else {
        return;
    };
    let protected = protected.iter().collect::<HashSet<Cell>>();

    let mut remaining = amount;
    while remaining > 0 && !branches.is_empty() {
        let index = rng.random_range(0..branches.len());
        let branch = &mut branches[index];
        match branch.top() {
            Some(tip) if !protected.contains(&tip) && maze.open(tip) => {
                branch.pop();
                maze.put(tip, Passability::Obstacle);
                remaining -= 1;
            }
            _ => {
                branches.swap_remove(index);
            }
        }
    }

    if remaining > 0 {
        tracing::debug!(
            "[density] dead ends exhausted, filling {} cells off the route",
            remaining
        );
        let mut open = maze
            .all_passable()
            .into_iter()
            .filter(|cell| !protected.contains(cell))
            .collect::<Vec<_>>();
        while remaining > 0 && !open.is_empty() {
            let cell = open.swap_remove(rng.random_range(0..open.len()));
            maze.put(cell, Passability::Obstacle);
            remaining -= 1;
        }
    }
}

/// One shortest route, traced back from the destination through the distance field.
fn any_shortest_route(maze: &Maze) -> Option<Route> {
    let field = DistanceField::compute(maze);
    field.dest_distance()?;

    let mut route = Route::new(maze);
    let mut cell = maze.dest();
    route.push_owned(cell);
    while !maze.is_start(cell) {
        let step = field.get(cell) - 1;
        cell = maze
            .passable_adjacent(cell)
            .into_iter()
            .find(|&p| field.get(p) == step)?;
        route.push_owned(cell);
    }
    Some(route)
}

/// Expands simple routes breadth-first from the start.
///
/// Returns every route ending in a dead end, and the first (shortest) route
/// that reaches the destination. The destination is not expanded further.
fn dead_end_branches(maze: &Maze) -> (Vec<Route>, Option<Route>) {
    let mut branches = Vec::new();
    let mut protected = None;

    let mut seed = Route::new(maze);
    seed.push_owned(maze.start());
    if maze.is_dest(maze.start()) {
        return (branches, Some(seed));
    }

    let mut queue = VecDeque::from([seed]);
    while let Some(route) = queue.pop_front() {
        let Some(tip) = route.top() else {
            continue;
        };
        for next in maze.passable_adjacent(tip) {
            if route.contains(next) {
                continue;
            }
            let mut branch = route.clone();
            branch.push_owned(next);
            if maze.is_dest(next) {
                protected.get_or_insert(branch);
            } else if maze.dead_end(next) {
                branches.push(branch);
            } else {
                queue.push_back(branch);
            }
        }
    }
    (branches, protected)
}
