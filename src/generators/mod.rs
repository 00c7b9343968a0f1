use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;

mod carve;
mod density;

use carve::carve;
use density::{dig_route, fill_route};

use crate::error::{MazeError, Result};
use crate::maze::Maze;
use crate::solvers::{shortest_length, solve};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// When a finished maze must have exactly one shortest route.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniquenessGate {
    /// Only for 20x20 mazes with a density above 29%.
    #[default]
    Reference,
    Always,
    Never,
}

impl UniquenessGate {
    pub fn applies(self, width: usize, height: usize, density: u8) -> bool {
        match self {
            UniquenessGate::Reference => width == 20 && height == 20 && density > 29,
            UniquenessGate::Always => true,
            UniquenessGate::Never => false,
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for reproducible output; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub uniqueness: UniquenessGate,
    /// Cap on attempts per maze; `None` retries until an attempt succeeds.
    pub max_attempts: Option<usize>,
}

/// Why a generation attempt was thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Unreachable,
    TooLong { length: usize, limit: usize },
    NotUnique { routes: usize },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Unreachable => write!(f, "destination unreachable"),
            Rejection::TooLong { length, limit } => {
                write!(f, "shortest route of {} cells exceeds {} passable cells", length, limit)
            }
            Rejection::NotUnique { routes } => {
                write!(f, "{} shortest routes instead of one", routes)
            }
        }
    }
}

/// Generates solvable mazes with an exact obstacle count.
pub struct MazeGenerator {
    maze: Maze,
    density: u8,
    target_passable: usize,
    config: GeneratorConfig,
    rng: StdRng,
}

impl MazeGenerator {
    /// Creates a generator for `width` x `height` mazes with `density` percent obstacles.
    ///
    /// `start` and `dest` are `(row, col)` pairs.
    pub fn new(
        width: usize,
        height: usize,
        density: u8,
        start: (usize, usize),
        dest: (usize, usize),
    ) -> Result<Self> {
        MazeGenerator::with_config(width, height, density, start, dest, GeneratorConfig::default())
    }

    /// Fails with [`MazeError::InfeasibleDensity`] when the passable budget is
    /// smaller than the Manhattan route between start and destination.
    pub fn with_config(
        width: usize,
        height: usize,
        density: u8,
        start: (usize, usize),
        dest: (usize, usize),
        config: GeneratorConfig,
    ) -> Result<Self> {
        if density > 100 {
            return Err(MazeError::InvalidDensity(density));
        }
        let maze = Maze::new(width, height, start, dest)?;

        let area = maze.area() as u64;
        // Round half up, in integers
        let obstacles = (area * density as u64 + 50) / 100;
        let target_passable = (area - obstacles) as usize;
        let required = maze.start().manhattan(&maze.dest()) + 1;
        if target_passable < required {
            return Err(MazeError::InfeasibleDensity {
                passable: target_passable,
                required,
            });
        }

        let rng = get_rng(config.seed);
        Ok(MazeGenerator {
            maze,
            density,
            target_passable,
            config,
            rng,
        })
    }

    pub fn width(&self) -> usize {
        self.maze.width()
    }

    pub fn height(&self) -> usize {
        self.maze.height()
    }

    pub fn density(&self) -> u8 {
        self.density
    }

    /// Number of passable cells every generated maze has.
    pub fn target_passable(&self) -> usize {
        self.target_passable
    }

    /// Number of obstacles every generated maze has.
    pub fn target_obstacles(&self) -> usize {
        self.maze.area() - self.target_passable
    }

    /// Generates one maze, retrying whole attempts until one succeeds.
    ///
    /// Returns a copy; the generator keeps reusing its own working maze.
    pub fn generate(&mut self) -> Result<Maze> {
        let mut attempts = 0;
        loop {
            if self.config.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(MazeError::AttemptsExhausted { attempts });
            }
            attempts += 1;
            match self.attempt() {
                Ok(()) => {
                    tracing::debug!(
                        "[generate] {}x{} maze at {}% density after {} attempts",
                        self.width(),
                        self.height(),
                        self.density,
                        attempts
                    );
                    return Ok(self.maze.copy());
                }
                Err(rejection) => {
                    tracing::debug!("[generate] attempt {} rejected: {}", attempts, rejection);
                }
            }
        }
    }

    /// Generates `count` mazes one after another.
    pub fn generate_many(&mut self, count: usize) -> Result<Vec<Maze>> {
        (0..count).map(|_| self.generate()).collect()
    }

    /// Generates `count` mazes on the rayon thread pool.
    ///
    /// Each maze comes from an independent generator. With a configured seed
    /// the output is reproducible and ordered by index.
    pub fn generate_par(&self, count: usize) -> Result<Vec<Maze>> {
        (0..count)
            .into_par_iter()
            .map(|index| self.fork(index).generate())
            .collect()
    }

    fn fork(&self, index: usize) -> MazeGenerator {
        let seed = self
            .config
            .seed
            .map(|s| s.wrapping_add(index as u64).wrapping_add(1));
        MazeGenerator {
            maze: self.maze.copy(),
            density: self.density,
            target_passable: self.target_passable,
            config: GeneratorConfig {
                seed,
                ..self.config.clone()
            },
            rng: get_rng(seed),
        }
    }

    fn attempt(&mut self) -> std::result::Result<(), Rejection> {
        carve(&mut self.maze, &mut self.rng);

        let length = shortest_length(&self.maze).ok_or(Rejection::Unreachable)?;
        if length > self.target_passable {
            return Err(Rejection::TooLong {
                length,
                limit: self.target_passable,
            });
        }

        let passable = self.maze.passable_count();
        if passable < self.target_passable {
            dig_route(&mut self.maze, self.target_passable - passable, &mut self.rng);
        } else if passable > self.target_passable {
            fill_route(&mut self.maze, passable - self.target_passable, &mut self.rng);
        }

        if self
            .config
            .uniqueness
            .applies(self.width(), self.height(), self.density)
        {
            let routes = solve(&self.maze).len();
            if routes != 1 {
                return Err(Rejection::NotUnique { routes });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            seed: Some(seed),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_target_counts() {
        let generator = MazeGenerator::new(20, 20, 35, (0, 0), (19, 19)).unwrap();
        assert_eq!(generator.target_obstacles(), 140);
        assert_eq!(generator.target_passable(), 260);

        // 3 * 5 * 10% = 1.5 rounds up to 2
        let generator = MazeGenerator::new(3, 5, 10, (0, 0), (4, 2)).unwrap();
        assert_eq!(generator.target_obstacles(), 2);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(matches!(
            MazeGenerator::new(10, 10, 101, (0, 0), (9, 9)),
            Err(MazeError::InvalidDensity(101))
        ));
        assert!(matches!(
            MazeGenerator::new(10, 10, 90, (0, 0), (9, 9)),
            Err(MazeError::InfeasibleDensity {
                passable: 10,
                required: 19
            })
        ));
        assert!(matches!(
            MazeGenerator::new(10, 10, 30, (0, 0), (10, 9)),
            Err(MazeError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_uniqueness_gate() {
        assert!(UniquenessGate::Reference.applies(20, 20, 30));
        assert!(!UniquenessGate::Reference.applies(20, 20, 29));
        assert!(!UniquenessGate::Reference.applies(21, 20, 40));
        assert!(UniquenessGate::Always.applies(5, 5, 0));
        assert!(!UniquenessGate::Never.applies(20, 20, 50));
    }

    #[test]
    fn test_generate_is_solvable_and_exact() {
        let mut generator =
            MazeGenerator::with_config(15, 12, 40, (0, 0), (11, 14), seeded(42)).unwrap();
        let maze = generator.generate().unwrap();
        assert_eq!(maze.obstacle_count(), generator.target_obstacles());
        assert!(shortest_length(&maze).is_some());
    }

    #[test]
    fn test_seed_is_reproducible() {
        let mut a = MazeGenerator::with_config(10, 10, 30, (0, 0), (9, 9), seeded(7)).unwrap();
        let mut b = MazeGenerator::with_config(10, 10, 30, (0, 0), (9, 9), seeded(7)).unwrap();
        assert_eq!(a.generate().unwrap().to_text(), b.generate().unwrap().to_text());
    }

    #[test]
    fn test_result_is_a_snapshot() {
        let mut generator =
            MazeGenerator::with_config(8, 8, 30, (0, 0), (7, 7), seeded(3)).unwrap();
        let first = generator.generate().unwrap();
        let text = first.to_text();
        generator.generate().unwrap();
        assert_eq!(first.to_text(), text);
    }

    #[test]
    fn test_attempt_cap() {
        let config = GeneratorConfig {
            max_attempts: Some(0),
            ..seeded(1)
        };
        let mut generator = MazeGenerator::with_config(6, 6, 20, (0, 0), (5, 5), config).unwrap();
        assert!(matches!(
            generator.generate(),
            Err(MazeError::AttemptsExhausted { attempts: 0 })
        ));
    }

    #[test]
    fn test_reference_gate_yields_unique_route() {
        let mut generator =
            MazeGenerator::with_config(20, 20, 40, (0, 0), (19, 19), seeded(2024)).unwrap();
        let maze = generator.generate().unwrap();
        assert_eq!(solve(&maze).len(), 1);
        assert_eq!(maze.obstacle_count(), 160);
    }

    #[test]
    fn test_generate_par_matches_count() {
        let generator = MazeGenerator::with_config(10, 8, 30, (0, 0), (7, 9), seeded(11)).unwrap();
        let mazes = generator.generate_par(4).unwrap();
        assert_eq!(mazes.len(), 4);
        for maze in &mazes {
            assert_eq!(maze.obstacle_count(), generator.target_obstacles());
            assert!(shortest_length(maze).is_some());
        }
        let again = generator.generate_par(4).unwrap();
        assert_eq!(
            mazes.iter().map(Maze::to_text).collect::<Vec<_>>(),
            again.iter().map(Maze::to_text).collect::<Vec<_>>()
        );
    }
}
