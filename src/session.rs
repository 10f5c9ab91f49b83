//! Maze session: current grid plus generation progress

use tracing::debug;

use crate::graph::MazeGraph;
use crate::grid::{Grid, Location};
use crate::maze_generator::{GenerationState, GenerationStatus, MazeGenerator, StepOutcome};
use crate::MazeError;

/// A maze being generated, or already finished
///
/// The session is the single owner of the grid and the generation state.
/// Renderers borrow the grid between calls.
pub struct MazeSession {
    generator: MazeGenerator,
    grid: Grid,
    state: GenerationState,
}

impl MazeSession {
    /// Start a new `width` × `height` maze.
    ///
    /// The entrance is a random cell of the southern row, already in the
    /// maze with its south side open. Nothing is carved yet; call
    /// [Self::run_to_completion] or [Self::step].
    pub fn init(width: usize, height: usize, seed: Option<u64>) -> Result<Self, MazeError> {
        let mut generator = MazeGenerator::new(seed);
        let mut grid = Grid::new(width, height)?;
        let state = Self::seed_start(&mut generator, &mut grid);
        Ok(Self {
            generator,
            grid,
            state,
        })
    }

    fn seed_start(generator: &mut MazeGenerator, grid: &mut Grid) -> GenerationState {
        let start = generator.pick_start(grid.width());
        grid.mark_start(start);
        debug!(
            width = grid.width(),
            height = grid.height(),
            ?start,
            "new maze"
        );
        GenerationState::new(start)
    }

    /// Generate until the maze is complete.
    pub fn run_to_completion(&mut self) {
        self.generator.run(&mut self.grid, &mut self.state);
    }

    /// Advance generation by a single step.
    ///
    /// Once a maze is complete, the next call starts a fresh maze of the
    /// same size and performs its first step.
    pub fn step(&mut self) -> StepOutcome {
        if self.state.is_complete() {
            self.reset();
        }
        self.generator.step(&mut self.grid, &mut self.state)
    }

    /// Throw the current maze away and start again.
    ///
    /// Dimensions that are not given keep their current value. The random
    /// source carries over, so a seeded session stays reproducible.
    pub fn restart(&mut self, width: Option<usize>, height: Option<usize>) -> Result<(), MazeError> {
        let width = width.unwrap_or(self.grid.width());
        let height = height.unwrap_or(self.grid.height());
        if (width, height) == (self.grid.width(), self.grid.height()) {
            self.reset();
        } else {
            let mut grid = Grid::new(width, height)?;
            self.state = Self::seed_start(&mut self.generator, &mut grid);
            self.grid = grid;
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.grid.clear();
        self.state = Self::seed_start(&mut self.generator, &mut self.grid);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn start(&self) -> Location {
        self.state.start()
    }

    /// Exit cell, once generation has reached a boundary dead end.
    pub fn end(&self) -> Option<Location> {
        self.state.end()
    }

    pub fn status(&self) -> GenerationStatus {
        self.state.status()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// Path through the maze from the entrance to the exit.
    ///
    /// `None` until an exit has been found.
    pub fn solution(&self) -> Option<Vec<Location>> {
        let end = self.end()?;
        MazeGraph::from_grid(&self.grid).path(self.start(), end)
    }
}
