//! Grid of maze cells

use std::ops::Index;

use crate::MazeError;

/// Cardinal direction of a cell side
///
/// The discriminants are the side indices used by [Cell::open_sides].
/// The ordering is significant: the opposite of side `i` is side `3 - i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards increasing x
    East = 0,
    /// Towards increasing y
    North = 1,
    /// Towards decreasing y
    South = 2,
    /// Towards decreasing x
    West = 3,
}

impl Direction {
    /// All directions, in side index order.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::North,
        Direction::South,
        Direction::West,
    ];

    /// Side index of this direction, in `0..4`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Direction with the given side index.
    ///
    /// Returns `None` if `index` is not in `0..4`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Unit step `(dx, dy)` of this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::East => (1, 0),
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    /// The direction facing the other way.
    pub fn opposite(self) -> Self {
        Self::ALL[3 - self.index()]
    }
}

/// Location of a cell in the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub x: usize,
    pub y: usize,
}

impl Location {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Adjacent location one step towards `direction`.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    /// Upper bounds are the grid's business, see [Grid::contains].
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.delta();
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    /// Manhattan distance to `other`.
    pub fn distance(self, other: Self) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Single square of the maze
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Cell has been carved into the maze
    pub in_maze: bool,
    /// Open sides, indexed by [Direction::index]
    ///
    /// `true` means the wall on that side has been removed.
    pub open_sides: [bool; 4],
}

impl Cell {
    /// Is the side towards `direction` an open passage?
    pub fn is_open(&self, direction: Direction) -> bool {
        self.open_sides[direction.index()]
    }
}

/// Rectangular `width` × `height` array of cells
///
/// Cells are stored row-major; `y = 0` is the southern row.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate a grid of closed cells that are not yet in the maze.
    ///
    /// Returns [MazeError::InvalidDimensions] if either side is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Close every side of every cell and take all of them out of the maze.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Is `location` inside the grid?
    pub fn contains(&self, location: Location) -> bool {
        location.x < self.width && location.y < self.height
    }

    fn offset(&self, location: Location) -> usize {
        location.y * self.width + location.x
    }

    /// Cell at `location`, or `None` if out of bounds.
    pub fn cell(&self, location: Location) -> Option<&Cell> {
        if self.contains(location) {
            Some(&self.cells[self.offset(location)])
        } else {
            None
        }
    }

    /// Cell at `(x, y)`, or `None` if out of bounds.
    pub fn cell_at(&self, x: usize, y: usize) -> Option<&Cell> {
        self.cell(Location::new(x, y))
    }

    fn cell_mut(&mut self, location: Location) -> &mut Cell {
        let offset = self.offset(location);
        &mut self.cells[offset]
    }

    /// Iterate over all cells with their locations, row by row from the south.
    pub fn iter(&self) -> impl Iterator<Item = (Location, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (Location::new(i % self.width, i / self.width), cell))
    }

    /// Can the cell at `location` join the maze through its `side`?
    ///
    /// True iff the location is in bounds, the cell is not yet in the maze,
    /// and its `side` is still closed.
    pub fn is_openable(&self, location: Location, side: Direction) -> bool {
        self.cell(location)
            .is_some_and(|cell| !cell.in_maze && !cell.is_open(side))
    }

    /// Carve a passage from `from` into its neighbor `to`, which lies
    /// towards `direction`.
    ///
    /// Opens the facing sides of both cells and adds `to` to the maze.
    /// Only call this after [Self::is_openable] accepted `to` through
    /// `direction.opposite()`; bounds are not checked again.
    pub fn carve_passage(&mut self, from: Location, to: Location, direction: Direction) {
        let target = self.cell_mut(to);
        target.open_sides[direction.opposite().index()] = true;
        target.in_maze = true;
        self.cell_mut(from).open_sides[direction.index()] = true;
    }

    /// Open the `side` of a boundary cell towards the outside of the grid.
    pub fn mark_boundary_exit(&mut self, location: Location, side: Direction) {
        self.cell_mut(location).open_sides[side.index()] = true;
    }

    /// Add the entrance cell to the maze, entered from the south.
    pub fn mark_start(&mut self, location: Location) {
        let cell = self.cell_mut(location);
        cell.in_maze = true;
        cell.open_sides[Direction::South.index()] = true;
    }

    /// Number of cells carved into the maze.
    pub fn maze_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.in_maze).count()
    }

    /// Is there an open passage between `location` and its neighbor
    /// towards `direction`?
    ///
    /// Both facing sides must be open; boundary exits do not count.
    pub fn has_passage(&self, location: Location, direction: Direction) -> bool {
        let Some(cell) = self.cell(location) else {
            return false;
        };
        let Some(neighbor) = location.step(direction).and_then(|n| self.cell(n)) else {
            return false;
        };
        cell.is_open(direction) && neighbor.is_open(direction.opposite())
    }
}

impl Index<Location> for Grid {
    type Output = Cell;

    fn index(&self, location: Location) -> &Cell {
        &self.cells[self.offset(location)]
    }
}
