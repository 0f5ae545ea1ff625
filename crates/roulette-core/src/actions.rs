//! Actions a frontend can submit and the events they produce.
//!
//! Every mutation of the game state goes through
//! [`crate::game::GameState::apply_action`] with one of these actions; the
//! engine answers with the events describing what actually happened.

use crate::config::PlayerNumber;
use crate::pool::BallNumber;
use serde::{Deserialize, Serialize};

/// All actions the presentation layer can submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    // ==================== Setup ====================
    /// Change the player count by `delta`
    AdjustPlayers(i8),
    /// Change the balls dealt per roll by `delta`
    AdjustBallsPerRoll(i8),
    /// Shuffle the rack and deal the first turn to player 1
    StartGame,

    // ==================== Play ====================
    /// Deal the next player's balls from the front of the pool
    Roll,
    /// Pass the reveal gate so the next player's balls may be shown
    RevealTurn,

    // ==================== Any time ====================
    /// Restore the full ordered rack and return to setup
    Reset,
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Configuration changed (values are the post-correction state)
    ConfigChanged { players: u8, balls_per_roll: u8 },

    /// Pool, turn records and current player were restored to fresh setup
    GameReset,

    /// A turn was dealt (`balls` are ascending display order)
    TurnDealt {
        player: PlayerNumber,
        balls: Vec<BallNumber>,
    },

    /// The reveal gate was passed; `player`'s balls may now be shown
    TurnRevealed { player: PlayerNumber },

    /// The last player's turn was dealt
    GameFinished { balls_dealt: u8, balls_left: u8 },
}
