//! Text rendering of a maze
//!
//! Each cell becomes one character, and so does every wall slot between two
//! cells or between a cell and the border. A `width` × `height` grid thus
//! renders as `2 * height + 1` rows of `2 * width + 1` characters, north up.

use itertools::Itertools;

use crate::grid::{Direction, Grid, Location};

/// Characters used for rendering
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Symbols {
    pub wall: char,
    pub passage: char,
    pub start: char,
    pub end: char,
    pub path: char,
}

impl Symbols {
    pub const EMOJI: Symbols = Symbols {
        wall: '🟫',
        passage: '🟩',
        start: '🏃',
        end: '❎',
        path: '🟨',
    };

    pub const ASCII: Symbols = Symbols {
        wall: '#',
        passage: ' ',
        start: 'S',
        end: 'E',
        path: '.',
    };
}

impl Default for Symbols {
    fn default() -> Self {
        Self::EMOJI
    }
}

/// Row and column of the character for `location`.
fn position(grid: &Grid, location: Location) -> (usize, usize) {
    (2 * (grid.height() - 1 - location.y) + 1, 2 * location.x + 1)
}

/// Row and column of the wall slot on the `side` of the character at `(row, col)`.
fn slot((row, col): (usize, usize), side: Direction) -> (usize, usize) {
    match side {
        Direction::East => (row, col + 1),
        Direction::North => (row - 1, col),
        Direction::South => (row + 1, col),
        Direction::West => (row, col - 1),
    }
}

/// Character matrix of `grid`
///
/// - `start`, `end`: Cells drawn with their own symbols, if known.
/// - `path`: Cells to highlight, in order; the slots between consecutive
///   cells are highlighted too.
///
/// Cells that are not in the maze yet are drawn as walls.
pub fn render_grid(
    grid: &Grid,
    start: Option<Location>,
    end: Option<Location>,
    path: &[Location],
    symbols: &Symbols,
) -> Vec<Vec<char>> {
    let mut squares: Vec<Vec<char>> = (0..2 * grid.height() + 1)
        .map(|_| (0..2 * grid.width() + 1).map(|_| symbols.wall).collect())
        .collect();

    for (location, cell) in grid.iter() {
        if !cell.in_maze {
            continue;
        }
        let pos = position(grid, location);
        squares[pos.0][pos.1] = symbols.passage;
        for side in Direction::ALL {
            if cell.is_open(side) {
                let (r, c) = slot(pos, side);
                squares[r][c] = symbols.passage;
            }
        }
    }

    for (a, b) in path.iter().tuple_windows() {
        if !grid.contains(*a) || !grid.contains(*b) {
            continue;
        }
        let Some(side) = Direction::ALL.into_iter().find(|&d| a.step(d) == Some(*b)) else {
            continue;
        };
        let (r, c) = slot(position(grid, *a), side);
        squares[r][c] = symbols.path;
    }
    for &location in path.iter().filter(|l| grid.contains(**l)) {
        let (r, c) = position(grid, location);
        squares[r][c] = symbols.path;
    }

    // Start drawn last, so it wins when the exit is the entrance cell.
    for (location, symbol) in [(end, symbols.end), (start, symbols.start)] {
        if let Some(location) = location.filter(|l| grid.contains(*l)) {
            let (r, c) = position(grid, location);
            squares[r][c] = symbol;
        }
    }

    squares
}

/// Render `grid` as a string of newline separated rows.
pub fn to_text(
    grid: &Grid,
    start: Option<Location>,
    end: Option<Location>,
    path: &[Location],
    symbols: &Symbols,
) -> String {
    render_grid(grid, start, end, path, symbols)
        .iter()
        .map(|row| row.iter().join(""))
        .join("\n")
}
