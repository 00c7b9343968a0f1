//! Text-file persistence for mazes. Saving never overwrites an existing file.
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::{MazeError, Result};
use crate::maze::Maze;

pub fn load<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Writes `text` to a new file at `path`.
///
/// Fails with [`MazeError::FileExists`] if anything already exists there.
pub fn save<P: AsRef<Path>>(text: &str, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(MazeError::FileExists(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    file.write_all(text.as_bytes())?;
    tracing::debug!("[io] wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

pub fn load_maze<P: AsRef<Path>>(
    path: P,
    start: (usize, usize),
    dest: (usize, usize),
) -> Result<Maze> {
    Maze::parse(&load(path)?, start, dest)
}

pub fn save_maze<P: AsRef<Path>>(maze: &Maze, path: P) -> Result<()> {
    save(&maze.to_text(), path)
}
