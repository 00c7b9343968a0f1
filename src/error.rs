use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by maze construction, generation and persistence.
///
/// Rejected generation attempts are not errors: the generator restarts them
/// silently. Only an exhausted attempt cap surfaces here.
#[derive(Debug, Error)]
pub enum MazeError {
    #[error("maze dimensions {width}x{height} are out of range, both must be within 1..=50000")]
    InvalidDimension { width: usize, height: usize },
    #[error("coordinate ({row}, {col}) lies outside the {width}x{height} maze")]
    InvalidCoordinate {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
    #[error("cell value {0} is invalid, only 0 (passable) and 1 (obstacle) are allowed")]
    InvalidCellValue(u8),
    #[error("obstacle density {0}% is invalid, must be within 0..=100")]
    InvalidDensity(u8),
    #[error("cell ({row}, {col}) does not belong to this maze")]
    ForeignCell { row: usize, col: usize },
    #[error(
        "obstacle density too high: {passable} passable cells cannot hold a route of {required} cells"
    )]
    InfeasibleDensity { passable: usize, required: usize },
    #[error("malformed maze text at line {line}: {reason}")]
    MalformedGrid { line: usize, reason: String },
    #[error("maze generation gave up after {attempts} attempts")]
    AttemptsExhausted { attempts: usize },
    #[error("refusing to overwrite existing file {}", .0.display())]
    FileExists(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MazeError>;
