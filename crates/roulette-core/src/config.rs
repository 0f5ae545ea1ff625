//! Game configuration and its validity bounds.
//!
//! Configuration lives for the lifetime of the engine and is only mutable
//! through the validated setup operations in [`crate::game`]. The bounds
//! here keep a game well-defined for any (players, balls per roll) pair:
//! every player must receive a full roll out of a rack of
//! [`TOTAL_BALLS`] balls.

use serde::{Deserialize, Serialize};

/// Player identifier (1-based; player 1 always rolls first)
pub type PlayerNumber = u8;

/// Number of uniquely numbered balls in the rack
pub const TOTAL_BALLS: u8 = 15;

/// Minimum number of players
pub const MIN_PLAYERS: u8 = 2;

/// Minimum balls dealt per roll
pub const MIN_BALLS_PER_ROLL: u8 = 1;

/// Largest balls-per-roll value that keeps a game with `players` players
/// well-defined.
///
/// Callers uphold `players >= MIN_PLAYERS`.
pub fn max_balls_per_roll(players: u8) -> u8 {
    (TOTAL_BALLS / players).min(TOTAL_BALLS - players + 1)
}

/// Game configuration: how many players, and how many balls each roll deals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players (at least [`MIN_PLAYERS`])
    pub players: u8,
    /// Balls dealt to each player on their turn
    pub balls_per_roll: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: MIN_PLAYERS,
            balls_per_roll: 3,
        }
    }
}

impl GameConfig {
    /// Upper bound for `balls_per_roll` under the current player count
    pub fn max_balls_per_roll(&self) -> u8 {
        max_balls_per_roll(self.players)
    }

    /// Whether `players` players at `balls_per_roll` balls each fit the rack
    pub fn fits(players: u8, balls_per_roll: u8) -> bool {
        players as u16 * balls_per_roll as u16 <= TOTAL_BALLS as u16
    }

    /// Total number of balls dealt over a complete game
    pub fn total_dealt(&self) -> u8 {
        self.players * self.balls_per_roll
    }

    /// Pull `balls_per_roll` back within bounds after a player count change.
    ///
    /// This is an automatic correction, not a rejection: an explicit setter
    /// call that would break a bound fails instead (see
    /// [`crate::game::GameState::apply_action`]). Returns whether a
    /// correction was applied.
    pub fn clamp_balls_per_roll(&mut self) -> bool {
        let max = self.max_balls_per_roll();
        if self.balls_per_roll > max {
            self.balls_per_roll = max;
            true
        } else {
            false
        }
    }
}
