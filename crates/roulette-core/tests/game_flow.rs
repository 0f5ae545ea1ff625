//! Integration tests for the Pool Roulette engine.
//!
//! These tests verify complete game flows from setup through to game over.

use roulette_core::*;
use std::collections::HashSet;

/// Build an engine with the given configuration, still in setup
fn engine(players: u8, balls_per_roll: u8) -> GameState {
    GameState::with_config(GameConfig {
        players,
        balls_per_roll,
    })
}

/// Drive a started game to completion, revealing between every roll.
/// Returns the number of successful rolls after the start deal.
fn play_to_game_over(game: &mut GameState) -> usize {
    let mut rolls = 0;
    let max_iterations = 100;

    for _ in 0..max_iterations {
        match game.phase {
            GamePhase::Playing => {
                game.apply_action(GameAction::Roll).unwrap();
                rolls += 1;
            }
            GamePhase::BetweenTurns => {
                game.apply_action(GameAction::RevealTurn).unwrap();
            }
            GamePhase::GameOver => return rolls,
            GamePhase::Setup => panic!("game was never started"),
        }
    }

    panic!("game did not finish within {} iterations", max_iterations);
}

#[test]
fn test_three_player_game_step_by_step() {
    let mut game = engine(3, 3);

    game.apply_action(GameAction::StartGame).unwrap();
    assert_eq!(game.phase, GamePhase::Playing);
    assert_eq!(game.current_player, 1);
    assert_eq!(game.turns.len(), 1);
    assert_eq!(game.turns[0].player, 1);
    assert_eq!(game.balls_remaining(), 12);

    game.apply_action(GameAction::Roll).unwrap();
    assert_eq!(game.phase, GamePhase::BetweenTurns);
    assert_eq!(game.current_player, 2);
    assert_eq!(game.balls_remaining(), 9);

    game.apply_action(GameAction::RevealTurn).unwrap();
    assert_eq!(game.phase, GamePhase::Playing);

    game.apply_action(GameAction::Roll).unwrap();
    assert_eq!(game.phase, GamePhase::GameOver);
    assert_eq!(game.current_player, 3);
    assert_eq!(game.balls_remaining(), 6);
    assert_eq!(game.turns.len(), 3);
    assert_eq!(
        game.turns.iter().map(|t| t.player).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    // A further roll is rejected; 9 balls were dealt, 6 remain
    assert_eq!(
        game.apply_action(GameAction::Roll),
        Err(GameError::InvalidPhase)
    );
    let dealt: usize = game.turns.iter().map(|t| t.balls.len()).sum();
    assert_eq!(dealt, 9);
}

#[test]
fn test_five_players_exhaust_the_rack_exactly() {
    let mut game = engine(5, 3);

    game.apply_action(GameAction::StartGame).unwrap();
    let rolls = play_to_game_over(&mut game);

    assert_eq!(rolls, 4, "start deal plus four rolls is one per player");
    assert_eq!(game.balls_remaining(), 0);
    assert_eq!(game.phase, GamePhase::GameOver);
    assert_eq!(game.turns.len(), 5);
}

#[test]
fn test_dealt_balls_partition_the_rack() {
    for (players, balls_per_roll) in [(2, 7), (3, 5), (4, 3), (5, 3), (7, 2)] {
        let mut game = engine(players, balls_per_roll);
        game.apply_action(GameAction::StartGame).unwrap();
        play_to_game_over(&mut game);

        let dealt: Vec<BallNumber> = game
            .turns
            .iter()
            .flat_map(|t| t.balls.iter().copied())
            .collect();
        let distinct: HashSet<BallNumber> = dealt.iter().copied().collect();

        assert_eq!(
            dealt.len(),
            (players * balls_per_roll) as usize,
            "{} players x {} balls",
            players,
            balls_per_roll
        );
        assert_eq!(distinct.len(), dealt.len(), "no ball dealt twice");
        assert!(dealt.iter().all(|&b| (1..=TOTAL_BALLS).contains(&b)));

        // Dealt balls and the remaining pool together are the full rack
        let mut all: Vec<BallNumber> = dealt;
        all.extend(game.pool.balls.iter().copied());
        all.sort_unstable();
        assert_eq!(all, (1..=TOTAL_BALLS).collect::<Vec<_>>());
    }
}

#[test]
fn test_current_player_advances_by_exactly_one() {
    let mut game = engine(5, 2);
    game.apply_action(GameAction::StartGame).unwrap();
    assert_eq!(game.current_player, 1);

    let mut previous = game.current_player;
    while !game.is_finished() {
        match game.phase {
            GamePhase::Playing => {
                game.apply_action(GameAction::Roll).unwrap();
                assert_eq!(game.current_player, previous + 1);
                previous = game.current_player;
            }
            GamePhase::BetweenTurns => {
                game.apply_action(GameAction::RevealTurn).unwrap();
                assert_eq!(game.current_player, previous, "reveal moves no data");
            }
            _ => unreachable!(),
        }
    }

    assert_eq!(game.current_player, game.config.players);
}

#[test]
fn test_first_turn_and_pool_cover_the_rack() {
    let mut game = engine(4, 3);
    game.apply_action(GameAction::StartGame).unwrap();

    let first = game.latest_turn().unwrap();
    let mut all: Vec<BallNumber> = first.balls.clone();
    all.extend(game.pool.balls.iter().copied());
    all.sort_unstable();

    assert_eq!(all, (1..=TOTAL_BALLS).collect::<Vec<_>>());
}

#[test]
fn test_reset_from_every_phase() {
    let check_fresh = |game: &GameState| {
        assert_eq!(game.phase, GamePhase::Setup);
        assert_eq!(game.current_player, 1);
        assert!(game.turns.is_empty());
        assert_eq!(game.balls_remaining(), TOTAL_BALLS);
    };

    // From setup
    let mut game = engine(3, 3);
    game.apply_action(GameAction::Reset).unwrap();
    check_fresh(&game);

    // From playing
    game.apply_action(GameAction::StartGame).unwrap();
    game.apply_action(GameAction::Reset).unwrap();
    check_fresh(&game);

    // From between turns
    game.apply_action(GameAction::StartGame).unwrap();
    game.apply_action(GameAction::Roll).unwrap();
    assert_eq!(game.phase, GamePhase::BetweenTurns);
    game.apply_action(GameAction::Reset).unwrap();
    check_fresh(&game);

    // From game over
    game.apply_action(GameAction::StartGame).unwrap();
    play_to_game_over(&mut game);
    game.apply_action(GameAction::Reset).unwrap();
    check_fresh(&game);

    // Configuration survives all of it
    assert_eq!(game.config.players, 3);
    assert_eq!(game.config.balls_per_roll, 3);
}

#[test]
fn test_rejected_configuration_is_fully_retained() {
    let mut game = engine(2, 3);

    let err = game.apply_action(GameAction::AdjustPlayers(6)).unwrap_err();
    assert_eq!(err, GameError::InvalidPlayerCount { requested: 8 });
    assert_eq!(game.config.players, 2);
    assert_eq!(game.config.balls_per_roll, 3);

    // The rejected call also performed no implicit reset side effects
    assert_eq!(game.phase, GamePhase::Setup);
    assert_eq!(game.balls_remaining(), TOTAL_BALLS);

    // A valid change still works afterwards
    game.apply_action(GameAction::AdjustPlayers(3)).unwrap();
    assert_eq!(game.config.players, 5);
}

#[test]
fn test_config_invariant_holds_after_every_successful_change() {
    let mut game = engine(2, 3);

    for action in [
        GameAction::AdjustPlayers(1),
        GameAction::AdjustBallsPerRoll(1),
        GameAction::AdjustPlayers(1),
        GameAction::AdjustPlayers(-2),
        GameAction::AdjustBallsPerRoll(2),
        GameAction::AdjustBallsPerRoll(-4),
    ] {
        if game.apply_action(action).is_ok() {
            let c = game.config;
            assert!(GameConfig::fits(c.players, c.balls_per_roll));
            assert!(c.balls_per_roll >= MIN_BALLS_PER_ROLL);
            assert!(c.balls_per_roll <= c.max_balls_per_roll());
            assert!(c.players >= MIN_PLAYERS);
        }
    }
}

#[test]
fn test_state_survives_a_serde_round_trip() {
    let mut game = engine(4, 3);
    game.apply_action(GameAction::StartGame).unwrap();
    game.apply_action(GameAction::Roll).unwrap();

    let json = serde_json::to_string(&game).unwrap();
    let restored: GameState = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.phase, game.phase);
    assert_eq!(restored.current_player, game.current_player);
    assert_eq!(restored.turns, game.turns);
    assert_eq!(restored.pool, game.pool);
    assert_eq!(restored.config, game.config);
}
