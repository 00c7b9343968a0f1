use std::collections::HashSet;
use std::fmt;
use std::io::Write;

use crossterm::{
    queue,
    style::{Color, PrintStyledContent, Stylize},
};

use crate::error::{MazeError, Result};
use crate::maze::{Cell, Maze, Route};

/// How one cell is drawn when a route is laid over a maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Route,
    Obstacle,
    Open,
}

impl Glyph {
    /// The width of each glyph when rendered, in character widths.
    pub const WIDTH: usize = 1;

    pub fn symbol(self) -> &'static str {
        match self {
            Glyph::Route => "|",
            Glyph::Obstacle => "#",
            Glyph::Open => ".",
        }
    }

    fn color(self) -> Color {
        match self {
            Glyph::Route => Color::Yellow,
            Glyph::Obstacle => Color::DarkGrey,
            Glyph::Open => Color::Reset,
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.symbol();

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                symbol.width(),
                Glyph::WIDTH,
                "Each glyph must occupy exactly one character width."
            );
        }

        write!(f, "{}", symbol)
    }
}

/// The glyph of every cell, row by row.
fn glyph_rows(maze: &Maze, route: &Route) -> Result<Vec<Vec<Glyph>>> {
    if route.maze_id() != maze.id() {
        let (row, col) = route.top().map_or((0, 0), |c| (c.row(), c.col()));
        return Err(MazeError::ForeignCell { row, col });
    }
    let on_route = route.iter().collect::<HashSet<Cell>>();
    let mut rows = vec![Vec::with_capacity(maze.width()); maze.height()];
    for cell in maze.cells() {
        let glyph = if on_route.contains(&cell) {
            Glyph::Route
        } else if maze.is_passable(cell)? {
            Glyph::Open
        } else {
            Glyph::Obstacle
        };
        rows[cell.row()].push(glyph);
    }
    Ok(rows)
}

/// Draws `route` over `maze` as plain text, one line per row, glyphs separated by spaces.
pub fn visualize(maze: &Maze, route: &Route) -> Result<String> {
    let mut out = String::new();
    for row in glyph_rows(maze, route)? {
        let line = row.iter().map(Glyph::to_string).collect::<Vec<_>>().join(" ");
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Writes a colored rendering of `route` over `maze` to a terminal.
pub fn print_route<W: Write>(out: &mut W, maze: &Maze, route: &Route) -> Result<()> {
    for row in glyph_rows(maze, route)? {
        for glyph in row {
            queue!(
                out,
                PrintStyledContent(format!("{} ", glyph).with(glyph.color()))
            )?;
        }
        queue!(out, crossterm::style::Print("\r\n"))?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::solve;

    #[test]
    fn test_visualize() {
        let maze = Maze::from_matrix(
            &[vec![0, 1, 0], vec![0, 1, 0], vec![0, 0, 0]],
            (0, 0),
            (0, 2),
        )
        .unwrap();
        let routes = solve(&maze);
        let text = visualize(&maze, &routes[0]).unwrap();
        assert_eq!(text, "| # |\n| # |\n| | |\n");
    }

    #[test]
    fn test_visualize_marks_open_cells() {
        let maze = Maze::new(2, 2, (0, 0), (0, 1)).unwrap();
        let routes = solve(&maze);
        assert_eq!(visualize(&maze, &routes[0]).unwrap(), "| |\n. .\n");
    }

    #[test]
    fn test_foreign_route_is_rejected() {
        let maze = Maze::new(2, 2, (0, 0), (0, 1)).unwrap();
        let other = maze.copy();
        let route = Route::new(&other);
        assert!(visualize(&maze, &route).is_err());
    }

    #[test]
    fn test_print_route_writes_every_row() {
        let maze = Maze::new(3, 2, (0, 0), (1, 2)).unwrap();
        let routes = solve(&maze);
        let mut buffer = Vec::new();
        print_route(&mut buffer, &maze, &routes[0]).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output.matches("\r\n").count(), 2);
        assert!(output.contains('|'));
    }
}
