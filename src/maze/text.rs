use std::fmt;

use super::Maze;
use crate::error::{MazeError, Result};

impl fmt::Display for Maze {
    /// Writes one line per row, values separated by a single space.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.rows() {
            for (i, value) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Maze {
    /// Serializes the passability layout.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Parses a `0`/`1` grid with exactly one space between values.
    ///
    /// `\r\n` and lone `\r` line breaks are treated as `\n`. Trailing blank
    /// lines and trailing whitespace on a row are ignored. Tabs, leading
    /// spaces and repeated spaces inside a row are [`MazeError::MalformedGrid`].
    pub fn parse(text: &str, start: (usize, usize), dest: (usize, usize)) -> Result<Maze> {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let lines = text.trim_end_matches(['\n', ' ', '\t']).split('\n');

        let mut rows: Vec<Vec<u8>> = Vec::new();
        for (i, line) in lines.enumerate() {
            let line = line.trim_end_matches([' ', '\t']);
            let row = if line.is_empty() {
                Vec::new()
            } else {
                line.split(' ')
                    .map(|token| parse_value(token, i + 1))
                    .collect::<Result<Vec<u8>>>()?
            };
            if let Some(expected) = rows.first().map(Vec::len) {
                if expected != row.len() {
                    return Err(MazeError::MalformedGrid {
                        line: i + 1,
                        reason: format!("expected {} values, found {}", expected, row.len()),
                    });
                }
            }
            rows.push(row);
        }

        if rows.first().is_none_or(Vec::is_empty) {
            return Err(MazeError::MalformedGrid {
                line: 1,
                reason: "no cells".to_string(),
            });
        }
        Maze::from_matrix(&rows, start, dest)
    }
}

fn parse_value(token: &str, line: usize) -> Result<u8> {
    match token {
        "0" => Ok(0),
        "1" => Ok(1),
        "" => Err(MazeError::MalformedGrid {
            line,
            reason: "values must be separated by a single space".to_string(),
        }),
        other => Err(MazeError::MalformedGrid {
            line,
            reason: format!("unexpected token {:?}", other),
        }),
    }
}
