use battleship_rules::{
    Cell, Game, GameConfig, GameError, Outcome, Phase, Placement, PlayerId, TurnRule,
    MAX_BOARD_SIZE,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

const LAYOUT: [(usize, usize); 5] = [(0, 5), (2, 4), (4, 3), (6, 3), (8, 2)];

fn place_standard(game: &mut Game, player: PlayerId) {
    for (row, len) in LAYOUT {
        game.submit_placement(player, &Placement::horizontal(row, 0, len))
            .unwrap();
    }
}

fn ship_cells() -> Vec<(usize, usize)> {
    LAYOUT
        .iter()
        .flat_map(|&(row, len)| (0..len).map(move |c| (row, c)))
        .collect()
}

fn combat_game(config: GameConfig) -> Game {
    let mut game = Game::new(config).unwrap();
    place_standard(&mut game, PlayerId::One);
    place_standard(&mut game, PlayerId::Two);
    game
}

#[test]
fn test_starts_in_placing() {
    let game = Game::default();
    assert_eq!(game.phase(), Phase::Placing);
    assert_eq!(game.turn(), None);
    assert_eq!(game.winner(), None);
    assert_eq!(game.remaining_fleet(PlayerId::One), &[5, 4, 3, 3, 2]);
}

#[test]
fn test_shot_before_combat() {
    let mut game = Game::default();
    assert_eq!(
        game.make_move(PlayerId::One, 0, 0).unwrap_err(),
        GameError::NotInCombatPhase
    );
    place_standard(&mut game, PlayerId::One);
    assert_eq!(game.phase(), Phase::Placing);
    assert!(game.is_ready(PlayerId::One));
    assert!(!game.is_ready(PlayerId::Two));
    assert_eq!(
        game.make_move(PlayerId::One, 0, 0).unwrap_err(),
        GameError::NotInCombatPhase
    );
}

#[test]
fn test_combat_after_both_ready() {
    let game = combat_game(GameConfig::default());
    assert_eq!(game.phase(), Phase::Combat);
    assert_eq!(game.turn(), Some(PlayerId::One));
}

#[test]
fn test_configured_first_player() {
    let game = combat_game(GameConfig {
        first_player: PlayerId::Two,
        ..GameConfig::default()
    });
    assert_eq!(game.turn(), Some(PlayerId::Two));
}

#[test]
fn test_turns_alternate() {
    let mut game = combat_game(GameConfig::default());
    assert_eq!(
        game.make_move(PlayerId::Two, 0, 0).unwrap_err(),
        GameError::NotYourTurn
    );
    let hit = game.make_move(PlayerId::One, 0, 0).unwrap();
    assert_eq!(hit.outcome, Outcome::Hit);
    assert!(hit.switch_turn);
    assert_eq!(game.turn(), Some(PlayerId::Two));
    assert_eq!(
        game.make_move(PlayerId::One, 0, 1).unwrap_err(),
        GameError::NotYourTurn
    );
    let miss = game.make_move(PlayerId::Two, 9, 9).unwrap();
    assert_eq!(miss.outcome, Outcome::Miss);
    assert_eq!(game.turn(), Some(PlayerId::One));
}

#[test]
fn test_keep_turn_on_hit() {
    let mut game = combat_game(GameConfig {
        turn_rule: TurnRule::KeepOnHit,
        ..GameConfig::default()
    });
    let hit = game.make_move(PlayerId::One, 0, 0).unwrap();
    assert!(!hit.switch_turn);
    assert_eq!(game.turn(), Some(PlayerId::One));
    let miss = game.make_move(PlayerId::One, 9, 9).unwrap();
    assert!(miss.switch_turn);
    assert_eq!(game.turn(), Some(PlayerId::Two));
}

#[test]
fn test_rejected_move_keeps_turn() {
    let mut game = combat_game(GameConfig::default());
    game.make_move(PlayerId::One, 0, 0).unwrap();
    game.make_move(PlayerId::Two, 0, 0).unwrap();
    assert_eq!(
        game.make_move(PlayerId::One, 0, 0).unwrap_err(),
        GameError::AlreadyTargeted
    );
    assert_eq!(
        game.make_move(PlayerId::One, 10, 10).unwrap_err(),
        GameError::OutOfBounds { row: 10, col: 10 }
    );
    assert_eq!(game.turn(), Some(PlayerId::One));
    assert_eq!(game.shots_fired(PlayerId::One), &[(0, 0)]);
}

#[test]
fn test_full_game_single_game_over() {
    let mut game = combat_game(GameConfig::default());
    let targets = ship_cells();
    let mut game_overs = 0;
    let mut sunk = Vec::new();
    for (i, &(row, col)) in targets.iter().enumerate() {
        let outcome = game.make_move(PlayerId::One, row, col).unwrap();
        if let Some(len) = outcome.sunk_ship_length {
            sunk.push(len);
        }
        if outcome.game_over {
            game_overs += 1;
            assert_eq!(outcome.winner, Some(PlayerId::One));
            assert!(!outcome.switch_turn);
            assert_eq!(i, targets.len() - 1);
            break;
        }
        // odd rows hold no ships
        let miss = game
            .make_move(PlayerId::Two, 2 * (i / 10) + 1, i % 10)
            .unwrap();
        assert_eq!(miss.outcome, Outcome::Miss);
    }
    assert_eq!(game_overs, 1);
    assert_eq!(sunk, vec![5, 4, 3, 3, 2]);
    assert_eq!(game.phase(), Phase::Finished);
    assert_eq!(game.winner(), Some(PlayerId::One));
    assert_eq!(game.turn(), None);
    assert_eq!(
        game.make_move(PlayerId::Two, 0, 0).unwrap_err(),
        GameError::GameAlreadyFinished
    );
    assert_eq!(
        game.make_move(PlayerId::One, 9, 9).unwrap_err(),
        GameError::GameAlreadyFinished
    );
}

#[test]
fn test_placement_closed_in_combat() {
    let mut game = combat_game(GameConfig::default());
    assert_eq!(
        game.submit_placement(PlayerId::One, &Placement::vertical(0, 9, 2))
            .unwrap_err(),
        GameError::PlacementPhaseClosed
    );
    assert_eq!(
        game.reset_placement(PlayerId::Two).unwrap_err(),
        GameError::PlacementPhaseClosed
    );
}

#[test]
fn test_ready_player_cannot_reset() {
    let mut game = Game::default();
    place_standard(&mut game, PlayerId::One);
    assert_eq!(
        game.reset_placement(PlayerId::One).unwrap_err(),
        GameError::PlacementPhaseClosed
    );
    game.submit_placement(PlayerId::Two, &Placement::horizontal(0, 0, 5))
        .unwrap();
    game.reset_placement(PlayerId::Two).unwrap();
    assert_eq!(game.remaining_fleet(PlayerId::Two), &[5, 4, 3, 3, 2]);
}

#[test]
fn test_view_redacts_opponent() {
    let mut game = combat_game(GameConfig::default());
    game.make_move(PlayerId::One, 0, 0).unwrap();
    game.make_move(PlayerId::Two, 1, 1).unwrap();

    let view = game.view(PlayerId::One);
    assert_eq!(view.player, PlayerId::One);
    assert_eq!(view.phase, Phase::Combat);
    assert!(view.your_turn);
    assert_eq!(view.own_board[0][1], Cell::Ship);
    assert_eq!(view.own_board[1][1], Cell::Miss);
    assert_eq!(view.opponent_board[0][0], Cell::Hit);
    assert_eq!(view.opponent_board[0][1], Cell::Empty);
    assert!(view
        .opponent_board
        .iter()
        .flatten()
        .all(|c| *c != Cell::Ship));
    assert_eq!(view.shots_fired, 1);
    assert_eq!(view.hits, 1);
    assert!(view.remaining_fleet.is_empty());
    assert!(view.opponent_ready);

    let other = game.view(PlayerId::Two);
    assert!(!other.your_turn);
    assert_eq!(other.hits, 0);
    assert_eq!(other.opponent_hits, 1);
}

#[test]
fn test_view_counts_ships_afloat() {
    let mut game = combat_game(GameConfig::default());
    let view = game.view(PlayerId::One);
    assert_eq!(view.own_afloat, vec![5, 4, 3, 3, 2]);
    assert_eq!(view.opponent_afloat, vec![5, 4, 3, 3, 2]);

    // player one sinks the destroyer at (8, 0)..(8, 1)
    game.make_move(PlayerId::One, 8, 0).unwrap();
    game.make_move(PlayerId::Two, 1, 1).unwrap();
    let sink = game.make_move(PlayerId::One, 8, 1).unwrap();
    assert_eq!(sink.sunk_ship_length, Some(2));
    game.make_move(PlayerId::Two, 0, 0).unwrap();

    let one = game.view(PlayerId::One);
    assert_eq!(one.hits, 2);
    assert_eq!(one.opponent_hits, 1);
    assert_eq!(one.own_afloat, vec![5, 4, 3, 3, 2]);
    assert_eq!(one.opponent_afloat, vec![5, 4, 3, 3]);

    let two = game.view(PlayerId::Two);
    assert_eq!(two.hits, 1);
    assert_eq!(two.opponent_hits, 2);
    assert_eq!(two.own_afloat, vec![5, 4, 3, 3]);
    assert_eq!(two.opponent_afloat, vec![5, 4, 3, 3, 2]);
    assert_eq!(game.afloat(PlayerId::Two), two.own_afloat);
}

#[test]
fn test_random_placement_starts_combat() {
    let mut rng = SmallRng::seed_from_u64(99);
    let mut game = Game::default();
    game.place_randomly(PlayerId::One, &mut rng).unwrap();
    game.place_randomly(PlayerId::Two, &mut rng).unwrap();
    assert_eq!(game.phase(), Phase::Combat);
    assert_eq!(
        game.place_randomly(PlayerId::One, &mut rng).unwrap_err(),
        GameError::PlacementPhaseClosed
    );
}

#[test]
fn test_partial_layout_stays_hidden() {
    let mut game = Game::default();
    game.submit_placement(PlayerId::Two, &Placement::horizontal(0, 0, 5))
        .unwrap();
    let view = game.view(PlayerId::One);
    assert_eq!(view.opponent_afloat, vec![5, 4, 3, 3, 2]);
    assert_eq!(game.view(PlayerId::Two).own_afloat, vec![5]);
}

#[test]
fn test_board_size_limits() {
    for board_size in [0, MAX_BOARD_SIZE + 1, usize::MAX / 2, usize::MAX] {
        let config = GameConfig {
            board_size,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(GameError::InvalidConfig));
        assert_eq!(Game::new(config).unwrap_err(), GameError::InvalidConfig);
    }
    let largest = Game::new(GameConfig {
        board_size: MAX_BOARD_SIZE,
        ..GameConfig::default()
    })
    .unwrap();
    assert_eq!(largest.board(PlayerId::One).size(), MAX_BOARD_SIZE);
}

#[test]
fn test_invalid_config() {
    let err = Game::new(GameConfig {
        board_size: 3,
        ..GameConfig::default()
    })
    .unwrap_err();
    assert_eq!(err, GameError::InvalidConfig);
    assert!(Game::new(GameConfig {
        fleet: vec![],
        ..GameConfig::default()
    })
    .is_err());
}
