//! Grid mazes with an exact obstacle density, and a solver that returns every
//! shortest route between the start and the destination.
pub mod bench;
pub mod error;
pub mod generators;
pub mod io;
pub mod logging;
pub mod maze;
pub mod render;
pub mod solvers;

pub use error::{MazeError, Result};
pub use generators::{GeneratorConfig, MazeGenerator, UniquenessGate};
pub use maze::{Cell, Labels, Maze, Passability, Route};
pub use solvers::{Solver, shortest_length, solve};
