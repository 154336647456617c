//! Spawn policy: the shuffled queue of directions new cars enter from

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use super::types::Direction;

/// Directions still to be spawned, consumed from the back
#[derive(Debug, Clone, Default)]
pub struct SpawnQueue {
    pool: Vec<Direction>,
}

impl SpawnQueue {
    /// Build the queue for `goal` cars
    ///
    /// `distribution` is the share of cars spread evenly over the four
    /// directions (1.0 = fully even). The rest all come from one randomly
    /// chosen direction. The queue is shuffled once.
    pub fn build<R: Rng + ?Sized>(goal: usize, distribution: f64, rng: &mut R) -> Self {
        let even = ((goal as f64 * distribution).round_ties_even() as usize).min(goal);
        let random = goal - even;

        let mut pool: Vec<Direction> = (0..even)
            .map(|i| Direction::ALL[i % Direction::ALL.len()])
            .collect();

        if random > 0 {
            if let Some(&direction) = Direction::ALL.choose(rng) {
                pool.extend(std::iter::repeat(direction).take(random));
            }
        }

        pool.shuffle(rng);
        Self { pool }
    }

    /// Next direction to spawn, without consuming it
    pub fn peek(&self) -> Option<Direction> {
        self.pool.last().copied()
    }

    pub fn pop(&mut self) -> Option<Direction> {
        self.pool.pop()
    }

    /// Reorder the remaining entries so the next peek likely differs
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pool.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Remaining entries for `direction`
    pub fn count(&self, direction: Direction) -> usize {
        self.pool.iter().filter(|&&d| d == direction).count()
    }
}
