//! Pool Roulette - a turn-based random ball assignment engine
//!
//! This crate provides the core game logic for Pool Roulette, including:
//! - Validated game configuration (player count, balls per roll)
//! - The shared pool of numbered balls with shuffle and draw semantics
//! - Game state machine with turn progression and terminal-state detection
//!
//! # Architecture
//!
//! The engine is fully synchronous, does no I/O, and never logs. It is
//! driven by a presentation layer (see the `roulette-cli` crate) that
//! submits [`GameAction`]s and renders the returned [`GameEvent`]s; every
//! rejected action is a structured [`GameError`] the frontend can surface
//! verbatim.
//!
//! # Modules
//!
//! - [`config`]: Game configuration and its validity bounds
//! - [`pool`]: The shared pool of numbered balls
//! - [`actions`]: Actions a frontend can submit and the events they produce
//! - [`game`]: Game state machine

pub mod actions;
pub mod config;
pub mod game;
pub mod pool;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent};
pub use config::{GameConfig, PlayerNumber, MIN_BALLS_PER_ROLL, MIN_PLAYERS, TOTAL_BALLS};
pub use game::{GameError, GamePhase, GameState, Turn};
pub use pool::{BallNumber, BallPool};
