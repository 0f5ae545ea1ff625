//! The shared pool of numbered balls.
//!
//! A game deals from a single pool holding every ball not yet assigned to a
//! player. The pool starts as the ordered rack `1..=TOTAL_BALLS`, is
//! shuffled once when a game starts, and is then consumed strictly from the
//! front. Draw order is shuffle order; any ascending display ordering is
//! applied by the caller after removal, never here.

use crate::config::TOTAL_BALLS;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A ball number in `1..=TOTAL_BALLS`
pub type BallNumber = u8;

/// The balls not yet dealt to any player in the current game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallPool {
    /// Remaining balls in draw order (the front is drawn next)
    pub balls: Vec<BallNumber>,
}

impl BallPool {
    /// The full ordered rack `1..=TOTAL_BALLS`
    pub fn full() -> Self {
        Self {
            balls: (1..=TOTAL_BALLS).collect(),
        }
    }

    /// Number of balls left
    pub fn remaining(&self) -> u8 {
        self.balls.len() as u8
    }

    /// Check if every ball has been dealt
    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    /// Shuffle the pool in place.
    ///
    /// `shuffle` on a slice is a uniform Fisher-Yates pass, so every
    /// permutation of the rack is equally likely.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.balls.shuffle(rng);
    }

    /// Draw `count` balls from the front of the pool.
    ///
    /// Returns `None`, leaving the pool untouched, when fewer than `count`
    /// balls remain.
    pub fn draw(&mut self, count: u8) -> Option<Vec<BallNumber>> {
        if self.remaining() < count {
            return None;
        }
        Some(self.balls.drain(..count as usize).collect())
    }
}

impl Default for BallPool {
    fn default() -> Self {
        Self::full()
    }
}
