//! Carve perfect mazes by randomized depth-first backtracking
//!
//! A [MazeSession] owns a [Grid] of cells. Generation starts from a random
//! cell on the southern row, repeatedly carves into a random unvisited
//! neighbor and backtracks at dead ends, until every cell is part of the
//! maze. The first dead end found on the grid boundary becomes the exit.
//!
//! # Examples
//! ## Generate a whole maze
//! ```
//! use maze_carver::{MazeGraph, MazeSession};
//!
//! let mut session = MazeSession::init(8, 6, Some(42)).unwrap();
//! session.run_to_completion();
//!
//! assert!(session.is_complete());
//! assert!(session.end().is_some());
//! assert!(MazeGraph::from_grid(session.grid()).is_perfect());
//! ```
//!
//! ## Step through generation
//! ```
//! use maze_carver::{MazeSession, StepOutcome};
//!
//! let mut session = MazeSession::init(2, 2, Some(7)).unwrap();
//! let mut carved = 0;
//! while !session.is_complete() {
//!     if let StepOutcome::Carved { .. } = session.step() {
//!         carved += 1;
//!     }
//! }
//! assert_eq!(carved, 3);
//! ```
//!
//! ## Print a maze
//! ```
//! use maze_carver::{render, MazeSession};
//!
//! let mut session = MazeSession::init(4, 3, Some(1)).unwrap();
//! session.run_to_completion();
//! let text = render::to_text(
//!     session.grid(),
//!     Some(session.start()),
//!     session.end(),
//!     &[],
//!     &render::Symbols::ASCII,
//! );
//! println!("{}", text);
//! ```

pub mod graph;
pub mod grid;
pub mod maze_generator;
pub mod render;
pub mod session;
pub mod shuffle;

pub use graph::MazeGraph;
pub use grid::{Cell, Direction, Grid, Location};
pub use maze_generator::{GenerationState, GenerationStatus, MazeGenerator, StepOutcome};
pub use session::MazeSession;

use thiserror::Error;

/// Errors raised when creating a maze
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeError {
    /// Grid would have no cells
    #[error("invalid maze dimensions {width}x{height}: both sides must be at least 1")]
    InvalidDimensions { width: usize, height: usize },
}
