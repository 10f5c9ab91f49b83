//! Random ordering of neighbor directions

use rand::{seq::SliceRandom, Rng};

use crate::grid::Direction;

/// Return `directions` in uniformly random order.
///
/// Fisher-Yates: walking down from the last position, each slot is swapped
/// with a uniformly chosen slot at or before it. The random source belongs
/// to the caller, so a seeded generator gives a reproducible sequence.
pub fn shuffle<R: Rng + ?Sized>(mut directions: [Direction; 4], rng: &mut R) -> [Direction; 4] {
    directions.shuffle(rng);
    directions
}

/// All four directions in random order.
pub fn shuffled_directions<R: Rng + ?Sized>(rng: &mut R) -> [Direction; 4] {
    shuffle(Direction::ALL, rng)
}
