//! Core game state machine.
//!
//! This module contains the main `GameState` struct and all game logic:
//! configuration validation, shuffle and draw semantics, turn progression
//! and terminal-state detection.

use crate::actions::{GameAction, GameEvent};
use crate::config::{GameConfig, PlayerNumber, MIN_BALLS_PER_ROLL, MIN_PLAYERS, TOTAL_BALLS};
use crate::pool::{BallNumber, BallPool};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Adjusting player count and balls per roll
    Setup,

    /// The current player's balls are on display
    Playing,

    /// The next turn is already dealt but stays hidden until the next
    /// player takes over the shared device
    BetweenTurns,

    /// Every player has rolled
    GameOver,
}

/// Errors that can occur when applying actions.
///
/// All of these are recoverable return values; the engine itself never
/// logs, retries or panics. Frontends are expected to surface the message
/// verbatim, so the setter errors name every violated bound the way the
/// setup screen words them.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameError {
    #[error(
        "invalid player count {requested}: the number of players must be at least {min} \
         and the total balls (players * balls per roll) must not exceed {total}",
        min = MIN_PLAYERS,
        total = TOTAL_BALLS
    )]
    InvalidPlayerCount { requested: i16 },

    #[error(
        "invalid balls per roll {requested}: must be between {min} and {max}, \
         and the total balls (players * balls per roll) must not exceed {total}",
        min = MIN_BALLS_PER_ROLL,
        total = TOTAL_BALLS
    )]
    InvalidBallsPerRoll { requested: i16, max: u8 },

    #[error("not enough balls left for this roll ({remaining} remaining, {needed} needed)")]
    NotEnoughBalls { remaining: u8, needed: u8 },

    #[error("action not valid in the current phase")]
    InvalidPhase,
}

/// One player's dealt balls.
///
/// `balls` is stored ascending for display; the underlying draw order is
/// whatever the shuffle produced. Records are append-only and never change
/// after the deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who the balls belong to (1-based)
    pub player: PlayerNumber,
    /// The dealt ball numbers, ascending
    pub balls: Vec<BallNumber>,
}

/// The complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current configuration
    pub config: GameConfig,
    /// Balls not yet dealt this game
    pub pool: BallPool,
    /// Completed turn records, one per player in roll order
    pub turns: Vec<Turn>,
    /// Whose turn the display belongs to (1-based)
    pub current_player: PlayerNumber,
    /// Current phase
    pub phase: GamePhase,
}

impl GameState {
    /// Create an engine with the default configuration, in setup
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    /// Create an engine with the given configuration, in setup
    pub fn with_config(config: GameConfig) -> Self {
        assert!(
            config.players >= MIN_PLAYERS && config.players <= TOTAL_BALLS,
            "player count must be within {}..={}",
            MIN_PLAYERS,
            TOTAL_BALLS
        );
        assert!(
            config.balls_per_roll >= MIN_BALLS_PER_ROLL
                && config.balls_per_roll <= config.max_balls_per_roll(),
            "balls per roll must be within 1..={}",
            config.max_balls_per_roll()
        );
        assert!(
            GameConfig::fits(config.players, config.balls_per_roll),
            "players * balls per roll must not exceed {}",
            TOTAL_BALLS
        );

        Self {
            config,
            pool: BallPool::full(),
            turns: Vec::new(),
            current_player: 1,
            phase: GamePhase::Setup,
        }
    }

    /// The most recently dealt turn record
    pub fn latest_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Balls still waiting in the pool
    pub fn balls_remaining(&self) -> u8 {
        self.pool.remaining()
    }

    /// Upper bound for balls per roll under the current player count.
    ///
    /// Frontends use this to bound their +/- controls and word their own
    /// messages.
    pub fn max_balls_per_roll(&self) -> u8 {
        self.config.max_balls_per_roll()
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Get all actions the engine currently accepts
    pub fn valid_actions(&self) -> Vec<GameAction> {
        let mut actions = Vec::new();

        match self.phase {
            GamePhase::Setup => {
                for delta in [-1i8, 1] {
                    if self.player_count_allowed(self.config.players as i16 + delta as i16) {
                        actions.push(GameAction::AdjustPlayers(delta));
                    }
                }
                for delta in [-1i8, 1] {
                    if self.balls_per_roll_allowed(self.config.balls_per_roll as i16 + delta as i16)
                    {
                        actions.push(GameAction::AdjustBallsPerRoll(delta));
                    }
                }
                actions.push(GameAction::StartGame);
            }
            GamePhase::Playing => {
                actions.push(GameAction::Roll);
            }
            GamePhase::BetweenTurns => {
                actions.push(GameAction::RevealTurn);
            }
            GamePhase::GameOver => {}
        }

        actions.push(GameAction::Reset);
        actions
    }

    /// Apply an action to the game state.
    ///
    /// On success the returned events describe everything that changed; on
    /// failure nothing changed at all.
    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        let mut events = Vec::new();

        match action {
            // ==================== Setup ====================
            GameAction::AdjustPlayers(delta) => {
                if self.phase != GamePhase::Setup {
                    return Err(GameError::InvalidPhase);
                }

                let requested = self.config.players as i16 + delta as i16;
                if !self.player_count_allowed(requested) {
                    return Err(GameError::InvalidPlayerCount { requested });
                }

                self.config.players = requested as u8;
                // Automatic correction, not a rejection: a player count
                // change can lower the per-roll ceiling below the current
                // setting.
                self.config.clamp_balls_per_roll();

                events.push(GameEvent::ConfigChanged {
                    players: self.config.players,
                    balls_per_roll: self.config.balls_per_roll,
                });
                events.extend(self.reset());
            }

            GameAction::AdjustBallsPerRoll(delta) => {
                if self.phase != GamePhase::Setup {
                    return Err(GameError::InvalidPhase);
                }

                let requested = self.config.balls_per_roll as i16 + delta as i16;
                if !self.balls_per_roll_allowed(requested) {
                    return Err(GameError::InvalidBallsPerRoll {
                        requested,
                        max: self.config.max_balls_per_roll(),
                    });
                }

                self.config.balls_per_roll = requested as u8;

                events.push(GameEvent::ConfigChanged {
                    players: self.config.players,
                    balls_per_roll: self.config.balls_per_roll,
                });
                events.extend(self.reset());
            }

            GameAction::StartGame => {
                let mut rng = rand::thread_rng();
                events.extend(self.start_game_with_rng(&mut rng)?);
            }

            // ==================== Play ====================
            GameAction::Roll => {
                if self.phase != GamePhase::Playing {
                    return Err(GameError::InvalidPhase);
                }

                // The turn for the next player is computed here, before the
                // reveal gate; only its display waits for RevealTurn.
                let turn = self.deal(self.current_player + 1)?;
                self.current_player += 1;

                events.push(GameEvent::TurnDealt {
                    player: turn.player,
                    balls: turn.balls,
                });

                if self.current_player == self.config.players {
                    self.phase = GamePhase::GameOver;
                    events.push(GameEvent::GameFinished {
                        balls_dealt: self.config.total_dealt(),
                        balls_left: self.pool.remaining(),
                    });
                } else {
                    self.phase = GamePhase::BetweenTurns;
                }
            }

            GameAction::RevealTurn => {
                if self.phase != GamePhase::BetweenTurns {
                    return Err(GameError::InvalidPhase);
                }

                self.phase = GamePhase::Playing;
                events.push(GameEvent::TurnRevealed {
                    player: self.current_player,
                });
            }

            // ==================== Any time ====================
            GameAction::Reset => {
                events.extend(self.reset());
            }
        }

        Ok(events)
    }

    /// Start a game with a caller-provided random source.
    ///
    /// `apply_action(GameAction::StartGame)` routes here with the thread
    /// RNG; tests that need reproducible deals call this directly.
    pub fn start_game_with_rng<R: Rng>(
        &mut self,
        rng: &mut R,
    ) -> Result<Vec<GameEvent>, GameError> {
        if self.phase != GamePhase::Setup {
            return Err(GameError::InvalidPhase);
        }

        self.pool.shuffle(rng);
        let turn = self.deal(1)?;
        self.current_player = 1;
        self.phase = GamePhase::Playing;

        Ok(vec![GameEvent::TurnDealt {
            player: turn.player,
            balls: turn.balls,
        }])
    }

    // ==================== Helper Methods ====================

    fn player_count_allowed(&self, requested: i16) -> bool {
        requested >= MIN_PLAYERS as i16
            && requested * self.config.balls_per_roll as i16 <= TOTAL_BALLS as i16
    }

    fn balls_per_roll_allowed(&self, requested: i16) -> bool {
        requested >= MIN_BALLS_PER_ROLL as i16
            && requested <= self.config.max_balls_per_roll() as i16
            && self.config.players as i16 * requested <= TOTAL_BALLS as i16
    }

    /// Draw the next roll from the front of the pool and record it.
    ///
    /// Sorting is applied to the record only, after removal from the pool;
    /// the pool itself is consumed in shuffle order.
    fn deal(&mut self, player: PlayerNumber) -> Result<Turn, GameError> {
        let needed = self.config.balls_per_roll;
        let mut balls = self.pool.draw(needed).ok_or(GameError::NotEnoughBalls {
            remaining: self.pool.remaining(),
            needed,
        })?;
        balls.sort_unstable();

        let turn = Turn { player, balls };
        self.turns.push(turn.clone());
        Ok(turn)
    }

    /// Restore the full ordered rack and return to setup.
    ///
    /// The rack comes back in order; shuffling happens only at game start.
    fn reset(&mut self) -> Vec<GameEvent> {
        self.pool = BallPool::full();
        self.turns.clear();
        self.current_player = 1;
        self.phase = GamePhase::Setup;
        vec![GameEvent::GameReset]
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
