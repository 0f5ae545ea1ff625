//! Local terminal frontend for Pool Roulette.
//!
//! Drives the engine over stdin/stdout: one shared terminal, handed from
//! player to player. All rules live in `roulette-core`; this binary only
//! submits actions, renders the current phase and surfaces engine errors
//! verbatim.

use anyhow::Result;
use clap::Parser;
use roulette_core::{
    BallNumber, GameAction, GameConfig, GameEvent, GamePhase, GameState, MIN_BALLS_PER_ROLL,
    MIN_PLAYERS, TOTAL_BALLS,
};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pool Roulette - deal random billiard balls to players, one turn at a time
#[derive(Parser, Debug)]
#[command(name = "roulette")]
#[command(about = "Turn-based random ball assignment for the pool table", long_about = None)]
#[command(version)]
struct Cli {
    /// Initial number of players
    #[arg(long, default_value_t = 2)]
    players: u8,

    /// Initial balls dealt per roll
    #[arg(long, default_value_t = 3)]
    balls_per_roll: u8,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = GameConfig {
        players: cli.players,
        balls_per_roll: cli.balls_per_roll,
    };

    if config.players < MIN_PLAYERS || config.players > TOTAL_BALLS {
        anyhow::bail!(
            "invalid configuration: the number of players must be between {} and {}",
            MIN_PLAYERS,
            TOTAL_BALLS
        );
    }
    let max = config.max_balls_per_roll();
    if config.balls_per_roll < MIN_BALLS_PER_ROLL
        || config.balls_per_roll > max
        || !GameConfig::fits(config.players, config.balls_per_roll)
    {
        anyhow::bail!(
            "invalid configuration: balls per roll must be between {} and {}, \
             and the total balls (players * balls per roll) must not exceed {}",
            MIN_BALLS_PER_ROLL,
            max,
            TOTAL_BALLS
        );
    }

    let mut game = GameState::with_config(config);
    info!(
        players = config.players,
        balls_per_roll = config.balls_per_roll,
        "engine ready"
    );

    println!("Pool Roulette");
    print_help();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        render(&game);
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;

        let action = match line.trim() {
            "" => continue,
            "q" | "quit" => break,
            "h" | "help" => {
                print_help();
                continue;
            }
            "state" => {
                println!("{}", serde_json::to_string_pretty(&game)?);
                continue;
            }
            "+p" => GameAction::AdjustPlayers(1),
            "-p" => GameAction::AdjustPlayers(-1),
            "+b" => GameAction::AdjustBallsPerRoll(1),
            "-b" => GameAction::AdjustBallsPerRoll(-1),
            "start" => GameAction::StartGame,
            "r" | "roll" => GameAction::Roll,
            "n" | "next" => GameAction::RevealTurn,
            "reset" => GameAction::Reset,
            other => {
                println!("unknown command: {} (h for help)", other);
                continue;
            }
        };

        match game.apply_action(action) {
            Ok(events) => {
                for event in &events {
                    print_event(event);
                }
            }
            // The engine's message already names every violated bound
            Err(err) => println!("!! {}", err),
        }
    }

    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  +p / -p   adjust player count (setup)");
    println!("  +b / -b   adjust balls per roll (setup)");
    println!("  start     shuffle the rack and deal player 1");
    println!("  roll      deal the next player's balls");
    println!("  next      reveal the dealt turn after handing over");
    println!("  reset     back to setup with a full rack");
    println!("  state     dump engine state as JSON");
    println!("  quit");
}

/// Show the screen for the current phase.
///
/// In the hand-off phase the freshly dealt balls stay hidden: they are
/// printed only after the next player confirms with `next`.
fn render(game: &GameState) {
    println!();
    match game.phase {
        GamePhase::Setup => {
            println!("-- setup --");
            println!("players: {}  (+p / -p)", game.config.players);
            println!(
                "balls per roll: {}  (+b / -b, max {})",
                game.config.balls_per_roll,
                game.max_balls_per_roll()
            );
            println!("'start' to begin");
        }
        GamePhase::Playing => {
            if let Some(turn) = game.latest_turn() {
                println!(
                    "player {}'s balls: {}",
                    turn.player,
                    format_balls(&turn.balls)
                );
                println!("'roll' to deal the next player");
            }
        }
        GamePhase::BetweenTurns => {
            println!("pass the table to player {}", game.current_player);
            println!("'next' when they're ready");
        }
        GamePhase::GameOver => {
            println!("-- game over --");
            for turn in &game.turns {
                println!("player {}: {}", turn.player, format_balls(&turn.balls));
            }
            println!("{} balls left in the rack", game.balls_remaining());
            println!("'reset' for a new game");
        }
    }
}

fn print_event(event: &GameEvent) {
    match event {
        GameEvent::ConfigChanged {
            players,
            balls_per_roll,
        } => println!("config: {} players, {} balls per roll", players, balls_per_roll),
        GameEvent::GameReset => debug!("rack restored"),
        GameEvent::TurnDealt { player, .. } => debug!(player, "turn dealt"),
        GameEvent::TurnRevealed { player } => debug!(player, "turn revealed"),
        GameEvent::GameFinished {
            balls_dealt,
            balls_left,
        } => println!(
            "game over: {} balls dealt, {} left in the rack",
            balls_dealt, balls_left
        ),
    }
}

fn format_balls(balls: &[BallNumber]) -> String {
    balls
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
