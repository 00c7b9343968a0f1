//! Timing of batch generation and solving, shared by `mazeroute bench` and
//! the `profile` binary.
use std::fmt;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::generators::MazeGenerator;
use crate::solvers::solve;

/// Densities profiled on 20x20 mazes, two runs each.
pub const DENSITIES: [u8; 10] = [30, 30, 35, 35, 40, 40, 45, 45, 50, 50];

/// Side length of the profiled square mazes.
pub const SIDE: usize = 20;

/// Averages over one batch of generated and solved mazes.
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    pub density: u8,
    pub iterations: usize,
    pub generate: Duration,
    pub solve: Duration,
    pub mean_length: f64,
    pub mean_routes: f64,
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "density={}% iters={} generate={:?}/maze solve={:?}/maze length={:.2} routes={:.2}",
            self.density,
            self.iterations,
            self.generate,
            self.solve,
            self.mean_length,
            self.mean_routes
        )
    }
}

/// Generates and solves `iterations` square mazes of side `side`, corner to corner.
pub fn run(side: usize, density: u8, iterations: usize) -> Result<Timing> {
    let corner = side.saturating_sub(1);
    let mut generator = MazeGenerator::new(side, side, density, (0, 0), (corner, corner))?;
    let mut generating = Duration::ZERO;
    let mut solving = Duration::ZERO;
    let mut total_length = 0;
    let mut total_routes = 0;

    for _ in 0..iterations {
        let timer = Instant::now();
        let maze = generator.generate()?;
        generating += timer.elapsed();

        let timer = Instant::now();
        let routes = solve(&maze);
        solving += timer.elapsed();

        total_length += routes.first().map_or(0, |route| route.len());
        total_routes += routes.len();
    }

    let n = iterations.max(1);
    Ok(Timing {
        density,
        iterations,
        generate: generating / n as u32,
        solve: solving / n as u32,
        mean_length: total_length as f64 / n as f64,
        mean_routes: total_routes as f64 / n as f64,
    })
}

/// Runs [`run`] for every density in [`DENSITIES`] on [`SIDE`]x[`SIDE`] mazes.
pub fn profile(iterations: usize) -> Result<Vec<Timing>> {
    DENSITIES
        .iter()
        .map(|&density| {
            let timing = run(SIDE, density, iterations)?;
            tracing::info!("[profile] {}", timing);
            Ok(timing)
        })
        .collect()
}
