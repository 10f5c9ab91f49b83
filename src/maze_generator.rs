//! Maze generation by randomized depth-first backtracking

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, trace};

use crate::grid::{Direction, Grid, Location};
use crate::shuffle::shuffled_directions;

/// Progress of one maze generation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationState {
    /// Backtracking stack in visiting order; the last entry is the frontier
    stack: Vec<Location>,
    /// Entrance cell, where generation started
    start: Location,
    /// Exit cell, once one has been found
    end: Option<Location>,
}

/// Whether generation can still advance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationStatus {
    /// Cells remain on the backtracking stack
    Running,
    /// The stack is empty and the maze is finished
    Complete,
}

/// What a single generation step did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A passage was carved from the frontier into a new cell
    Carved {
        from: Location,
        to: Location,
        direction: Direction,
    },
    /// The frontier was a dead end and has been popped
    Backtracked {
        from: Location,
        /// The dead end became the exit cell
        exit: bool,
    },
    /// Nothing left to do
    Finished,
}

impl GenerationState {
    /// Fresh state with only `start` on the stack.
    pub fn new(start: Location) -> Self {
        Self {
            stack: vec![start],
            start,
            end: None,
        }
    }

    pub fn start(&self) -> Location {
        self.start
    }

    pub fn end(&self) -> Option<Location> {
        self.end
    }

    pub fn found_end(&self) -> bool {
        self.end.is_some()
    }

    /// Current backtracking stack, oldest first.
    pub fn stack(&self) -> &[Location] {
        &self.stack
    }

    /// Cell that the next step will extend from.
    pub fn frontier(&self) -> Option<Location> {
        self.stack.last().copied()
    }

    pub fn status(&self) -> GenerationStatus {
        if self.stack.is_empty() {
            GenerationStatus::Complete
        } else {
            GenerationStatus::Running
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status() == GenerationStatus::Complete
    }
}

/// Maze generator
///
/// Owns the random source for a whole session, so that every shuffle and
/// start position is drawn from one generator.
pub struct MazeGenerator {
    random: StdRng,
}

impl MazeGenerator {
    /// New generator, deterministic if `seed` is given.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Pick an entrance column on the southern row of a `width` wide grid.
    pub fn pick_start(&mut self, width: usize) -> Location {
        Location::new(self.random.gen_range(0..width), 0)
    }

    /// Advance generation by one unit of work.
    ///
    /// Shuffles the four directions and carves into the first neighbor that
    /// can join the maze, pushing it onto the stack. If there is none, the
    /// frontier is a dead end: it becomes the exit if no exit exists yet and
    /// it lies on the boundary, and it is popped either way.
    pub fn step(&mut self, grid: &mut Grid, state: &mut GenerationState) -> StepOutcome {
        let Some(curr) = state.frontier() else {
            return StepOutcome::Finished;
        };

        if let Some((next, direction)) = self.make_connection(grid, curr) {
            trace!(?curr, ?next, ?direction, "carved passage");
            state.stack.push(next);
            return StepOutcome::Carved {
                from: curr,
                to: next,
                direction,
            };
        }

        let exit = !state.found_end() && Self::try_mark_exit(grid, state, curr);
        state.stack.pop();
        trace!(?curr, depth = state.stack.len(), "backtracked");
        if state.is_complete() {
            debug!(
                width = grid.width(),
                height = grid.height(),
                start = ?state.start,
                end = ?state.end,
                "maze complete"
            );
        }
        StepOutcome::Backtracked { from: curr, exit }
    }

    /// Step until the stack is empty. Returns the number of steps taken.
    pub fn run(&mut self, grid: &mut Grid, state: &mut GenerationState) -> usize {
        let mut steps = 0;
        while !state.is_complete() {
            self.step(grid, state);
            steps += 1;
        }
        steps
    }

    /// Carve into a random neighbor of `location` that can join the maze.
    ///
    /// Returns the new cell and the direction it was reached in, or `None`
    /// if every neighbor is out of bounds or already taken.
    fn make_connection(
        &mut self,
        grid: &mut Grid,
        location: Location,
    ) -> Option<(Location, Direction)> {
        let (next, direction) = shuffled_directions(&mut self.random)
            .into_iter()
            .filter_map(|d| location.step(d).map(|n| (n, d)))
            .find(|&(n, d)| grid.is_openable(n, d.opposite()))?;
        grid.carve_passage(location, next, direction);
        Some((next, direction))
    }

    /// Make `location` the exit if it lies on the grid boundary.
    ///
    /// Edges are tested west, east, south, north; on a corner only the first
    /// match is opened.
    fn try_mark_exit(grid: &mut Grid, state: &mut GenerationState, location: Location) -> bool {
        let side = if location.x == 0 {
            Direction::West
        } else if location.x == grid.width() - 1 {
            Direction::East
        } else if location.y == 0 {
            Direction::South
        } else if location.y == grid.height() - 1 {
            Direction::North
        } else {
            return false;
        };

        grid.mark_boundary_exit(location, side);
        state.end = Some(location);
        debug!(?location, ?side, "marked exit");
        true
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{quickcheck, TestResult};

    use crate::grid::{Direction, Grid, Location};
    use crate::maze_generator::{GenerationState, GenerationStatus, MazeGenerator, StepOutcome};

    fn generate(width: usize, height: usize, seed: u64) -> (Grid, GenerationState) {
        let mut gen = MazeGenerator::new(Some(seed));
        let mut grid = Grid::new(width, height).unwrap();
        let start = gen.pick_start(width);
        grid.mark_start(start);
        let mut state = GenerationState::new(start);
        gen.run(&mut grid, &mut state);
        (grid, state)
    }

    fn interior_passages(grid: &Grid) -> usize {
        grid.iter()
            .map(|(loc, _)| {
                [Direction::East, Direction::North]
                    .into_iter()
                    .filter(|&d| grid.has_passage(loc, d))
                    .count()
            })
            .sum()
    }

    fn reachable_from(grid: &Grid, start: Location) -> usize {
        let mut seen = vec![start];
        let mut todo = vec![start];
        while let Some(loc) = todo.pop() {
            for d in Direction::ALL {
                if !grid.has_passage(loc, d) {
                    continue;
                }
                let Some(next) = loc.step(d) else { continue };
                if !seen.contains(&next) {
                    seen.push(next);
                    todo.push(next);
                }
            }
        }
        seen.len()
    }

    #[test]
    fn single_cell_maze_exits_west() {
        let mut gen = MazeGenerator::new(Some(1));
        let mut grid = Grid::new(1, 1).unwrap();
        let start = gen.pick_start(1);
        assert_eq!(start, Location::new(0, 0));
        grid.mark_start(start);
        let mut state = GenerationState::new(start);

        let outcome = gen.step(&mut grid, &mut state);

        assert_eq!(
            outcome,
            StepOutcome::Backtracked {
                from: start,
                exit: true
            }
        );
        assert_eq!(state.status(), GenerationStatus::Complete);
        assert_eq!(state.end(), Some(start));
        // South is the entrance, west the exit.
        assert_eq!(grid[start].open_sides, [false, false, true, true]);
        assert_eq!(gen.step(&mut grid, &mut state), StepOutcome::Finished);
    }

    #[test]
    fn every_cell_pushed_and_popped_once() {
        for (w, h) in [(1, 1), (2, 2), (3, 5), (8, 1)] {
            let mut gen = MazeGenerator::new(Some(3));
            let mut grid = Grid::new(w, h).unwrap();
            let start = gen.pick_start(w);
            grid.mark_start(start);
            let mut state = GenerationState::new(start);
            assert_eq!(gen.run(&mut grid, &mut state), 2 * w * h - 1);
        }
    }

    #[test]
    fn step_pushes_carved_cell() {
        let mut gen = MazeGenerator::new(Some(11));
        let mut grid = Grid::new(3, 3).unwrap();
        let start = gen.pick_start(3);
        grid.mark_start(start);
        let mut state = GenerationState::new(start);

        match gen.step(&mut grid, &mut state) {
            StepOutcome::Carved {
                from,
                to,
                direction,
            } => {
                assert_eq!(from, start);
                assert_eq!(from.step(direction), Some(to));
                assert_eq!(state.stack(), &[start, to]);
                assert!(grid[to].in_maze);
                assert!(grid.has_passage(from, direction));
            }
            other => panic!("first step on a 3x3 grid must carve, got {other:?}"),
        }
    }

    #[test]
    fn exit_precedence_on_corners() {
        let mut grid = Grid::new(3, 3).unwrap();

        let mut state = GenerationState::new(Location::new(0, 2));
        assert!(MazeGenerator::try_mark_exit(&mut grid, &mut state, Location::new(0, 2)));
        assert!(grid[Location::new(0, 2)].is_open(Direction::West));
        assert!(!grid[Location::new(0, 2)].is_open(Direction::North));

        let corner = Location::new(2, 0);
        assert!(MazeGenerator::try_mark_exit(&mut grid, &mut state, corner));
        assert_eq!(grid[corner].open_sides, [true, false, false, false]);
        assert_eq!(state.end(), Some(corner));

        let top = Location::new(1, 2);
        assert!(MazeGenerator::try_mark_exit(&mut grid, &mut state, top));
        assert!(grid[top].is_open(Direction::North));

        let centre = Location::new(1, 1);
        assert!(!MazeGenerator::try_mark_exit(&mut grid, &mut state, centre));
        assert_eq!(grid[centre].open_sides, [false; 4]);
        assert_eq!(state.end(), Some(top));
    }

    #[test]
    fn exit_is_on_boundary_with_outward_side_open() {
        for seed in 0..20 {
            let (grid, state) = generate(6, 4, seed);
            let end = state.end().expect("a completed maze has an exit");
            let outward = Direction::ALL
                .into_iter()
                .filter(|&d| end.step(d).map_or(true, |n| !grid.contains(n)))
                .any(|d| grid[end].is_open(d));
            assert!(outward, "seed {seed}: exit {end:?} has no open outer side");
        }
    }

    #[test]
    fn same_seed_same_maze() {
        assert_eq!(generate(3, 3, 99), generate(3, 3, 99));
    }

    #[test]
    fn completed_mazes_are_perfect() {
        fn prop(w: u8, h: u8, seed: u64) -> TestResult {
            let (w, h) = (w as usize % 12 + 2, h as usize % 12 + 2);
            let (grid, state) = generate(w, h, seed);
            let cells = grid.maze_cell_count();
            TestResult::from_bool(
                state.is_complete()
                    && cells == w * h
                    && interior_passages(&grid) == cells - 1
                    && reachable_from(&grid, state.start()) == cells,
            )
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }
}
