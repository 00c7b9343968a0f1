use rand::{Rng, rngs::StdRng};

use crate::maze::{Cell, Labels, Maze, Passability};

/// Region label of the growth seeded opposite the start.
const START_REGION: u32 = 1;
/// Region label of the growth seeded opposite the destination.
const DEST_REGION: u32 = 2;
/// Obstacles touched by both regions.
const MIXED: u32 = 3;

/// Turns the whole maze into obstacles and carves a new network of passages.
///
/// Two regions grow from random seeds. Where they meet, obstacles are marked
/// as mixed and one of them is opened to join the regions. Finally the start
/// and destination are walked out of any dead end into the network. The
/// result is not guaranteed to connect start and destination.
pub(super) fn carve(maze: &mut Maze, rng: &mut StdRng) {
    let start = maze.start();
    let dest = maze.dest();

    maze.fill(Passability::Obstacle);
    maze.put(start, Passability::Passable);
    maze.put(dest, Passability::Passable);

    let mut regions = Labels::new(maze, 0);
    let first = seed_cell(maze, start, rng);
    let second = seed_cell(maze, dest, rng);
    regions.set(first, START_REGION);
    maze.put(first, Passability::Passable);
    regions.set(second, DEST_REGION);
    maze.put(second, Passability::Passable);

    let mut active = vec![first, second];
    while !active.is_empty() {
        // Randomly select an active cell
        let cell = active.swap_remove(rng.random_range(0..active.len()));
        let region = regions.get(cell);

        // Obstacles that can open without touching another passage
        let mut candidates = Vec::new();
        for wall in maze.obstacle_adjacent(cell) {
            match regions.get(wall) {
                0 => regions.set(wall, region),
                other if other != region => regions.set(wall, MIXED),
                _ => {}
            }
            if maze.dead_end(wall) {
                candidates.push(wall);
            }
        }

        if candidates.is_empty() {
            continue;
        }
        // Always open one so growth never stalls, then each other with even odds
        let chosen = candidates.swap_remove(rng.random_range(0..candidates.len()));
        maze.put(chosen, Passability::Passable);
        active.push(chosen);
        for wall in candidates {
            if rng.random_bool(0.5) {
                maze.put(wall, Passability::Passable);
                active.push(wall);
            }
        }
    }

    let mixed = maze.all_obstacles_labeled(&regions, MIXED);
    if !mixed.is_empty() {
        let joint = mixed[rng.random_range(0..mixed.len())];
        maze.put(joint, Passability::Passable);
    }
    tracing::trace!(
        "[carve] {} passable cells, {} collision candidates",
        maze.passable_count(),
        mixed.len()
    );

    extend_dead_end(maze, start, rng);
    extend_dead_end(maze, dest, rng);
}

/// Picks a random cell in the quadrant diagonally opposite `anchor`.
fn seed_cell(maze: &Maze, anchor: Cell, rng: &mut StdRng) -> Cell {
    let row = opposite_band(anchor.row(), maze.height(), rng);
    let col = opposite_band(anchor.col(), maze.width(), rng);
    // Both indices are drawn below the maze dimensions
    maze.cell(row, col).unwrap_or(anchor)
}

/// Splits `0..len` after `(len - 1) / 2` and draws from the half not holding `anchor`.
/// Falls back to the whole range when that half is empty.
fn opposite_band(anchor: usize, len: usize, rng: &mut StdRng) -> usize {
    let mid = (len - 1) / 2;
    let band = if anchor > mid { 0..mid + 1 } else { mid + 1..len };
    if band.is_empty() {
        rng.random_range(0..len)
    } else {
        rng.random_range(band)
    }
}

/// While `from` is a dead end, opens a random obstacle next to it and continues from there.
fn extend_dead_end(maze: &mut Maze, from: Cell, rng: &mut StdRng) {
    let mut cell = from;
    while maze.dead_end(cell) {
        let walls = maze.obstacle_adjacent(cell);
        if walls.is_empty() {
            break;
        }
        let next = walls[rng.random_range(0..walls.len())];
        maze.put(next, Passability::Passable);
        cell = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;

    #[test]
    fn test_opposite_band() {
        let mut rng = get_rng(Some(7));
        for _ in 0..50 {
            assert!(opposite_band(0, 20, &mut rng) >= 10);
            assert!(opposite_band(19, 20, &mut rng) < 10);
            assert_eq!(opposite_band(0, 1, &mut rng), 0);
            assert_eq!(opposite_band(0, 2, &mut rng), 1);
        }
    }

    #[test]
    fn test_carve_opens_anchors() {
        let mut maze = Maze::new(12, 9, (0, 0), (8, 11)).unwrap();
        let mut rng = get_rng(Some(3));
        carve(&mut maze, &mut rng);
        assert!(maze.open(maze.start()));
        assert!(maze.open(maze.dest()));
        assert!(!maze.passable_adjacent(maze.start()).is_empty());
        assert!(!maze.passable_adjacent(maze.dest()).is_empty());
        assert!(maze.passable_count() > 2);
        assert!(maze.obstacle_count() > 0);
    }

    #[test]
    fn test_carve_single_cell() {
        let mut maze = Maze::new(1, 1, (0, 0), (0, 0)).unwrap();
        let mut rng = get_rng(Some(1));
        carve(&mut maze, &mut rng);
        assert_eq!(maze.obstacle_count(), 0);
    }

    #[test]
    fn test_extend_dead_end_walks_into_network() {
        let mut maze = Maze::from_matrix(
            &[vec![0, 1, 1], vec![1, 1, 1], vec![1, 1, 0]],
            (0, 0),
            (2, 2),
        )
        .unwrap();
        let mut rng = get_rng(Some(11));
        let start = maze.start();
        extend_dead_end(&mut maze, start, &mut rng);
        // The walk ends on a junction
        assert!(!maze.passable_adjacent(start).is_empty());
        assert!(
            maze.all_passable()
                .into_iter()
                .any(|c| c != start && maze.passable_adjacent(c).len() >= 2)
        );
    }
}
