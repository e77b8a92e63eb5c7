//! End-to-end tests driving the game through its public API

use tetris_classic::board::EMPTY;
use tetris_classic::{
    Action, BOARD_HEIGHT, BOARD_WIDTH, Board, Game, GameState, StepOutcome, TetrominoType,
};

#[test]
fn test_first_piece_falls_to_floor_and_locks() {
    for seed in 0..32 {
        let mut game = Game::with_seed(seed);
        let spawned = *game.active_piece();
        let upcoming = *game.next_piece();
        let height = spawned.shape().len() as i32;

        let mut falls = 0;
        let outcome = loop {
            match game.step() {
                StepOutcome::Fell => falls += 1,
                outcome => break outcome,
            }
        };

        // An I piece lying flat falls 19 rows on a 20-row board
        assert_eq!(falls, BOARD_HEIGHT as i32 - height, "seed {}", seed);
        assert_eq!(
            outcome,
            StepOutcome::Locked {
                lines_cleared: 0,
                level_changed: false,
                game_over: false
            }
        );

        let mut landed = spawned;
        landed.y += falls;
        let value = spawned.piece_type.cell_value();
        assert_eq!(value, spawned.piece_type.index() as u8 + 1);
        for (x, y) in landed.cells() {
            assert_eq!(game.board().get(x, y), value, "seed {} cell ({}, {})", seed, x, y);
        }

        let filled = game.board().rows().flatten().filter(|&&c| c != EMPTY).count();
        assert_eq!(filled, 4);
        assert_eq!(*game.active_piece(), upcoming);
    }
}

#[test]
fn test_spawned_pieces_are_centred() {
    for seed in 0..32 {
        let game = Game::with_seed(seed);
        let piece = game.active_piece();
        let width = piece.shape().iter().map(|row| row.len()).max().unwrap() as i32;
        let free = BOARD_WIDTH as i32 - width;
        // Odd free space puts the extra column on the left
        assert_eq!(piece.x, (free + 1) / 2, "{:?}", piece.piece_type);
        assert_eq!(piece.y, 0);
        let expected = if piece.piece_type == TetrominoType::I { 3 } else { 4 };
        assert_eq!(piece.x, expected, "{:?}", piece.piece_type);
    }
}

#[test]
fn test_moves_stop_at_walls() {
    let mut game = Game::with_seed(4);
    while game.try_move_left() {}
    assert!(game.active_piece().cells().any(|(x, _)| x == 0));

    while game.try_move_right() {}
    assert!(
        game.active_piece()
            .cells()
            .any(|(x, _)| x == BOARD_WIDTH as i32 - 1)
    );

    while game.try_move_down() {}
    let bottom = game.active_piece().cells().map(|(_, y)| y).max().unwrap();
    assert_eq!(bottom, BOARD_HEIGHT as i32 - 1);
    assert_eq!(game.state(), GameState::Playing);
}

#[test]
fn test_blocked_spawn_is_game_over_until_restart() {
    let mut board = Board::default();
    for x in 0..BOARD_WIDTH as i32 {
        if x != 0 {
            board.set(x, 0, 6);
        }
    }
    let mut game = Game::with_board(board, 8);
    assert!(game.is_game_over());
    assert_eq!(game.step(), StepOutcome::Ignored);
    assert!(!game.process_action(Action::Rotate));
    assert!(!game.process_action(Action::SoftDrop));

    assert!(game.process_action(Action::Restart));
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!((game.score(), game.level(), game.lines_cleared()), (0, 1, 0));
    assert!(game.board().is_empty());
    assert!(game.can_place(game.active_piece(), 0, 0));
    assert!(matches!(game.step(), StepOutcome::Fell));
}

#[test]
fn test_stacking_eventually_tops_out() {
    let mut game = Game::with_seed(2024);
    let mut locks = 0;
    while !game.is_game_over() {
        if let StepOutcome::Locked { .. } = game.step() {
            locks += 1;
        }
        assert!(locks < 200, "never topped out");
    }
    // Nothing cleared: pieces only ever pile up in the middle
    assert_eq!(game.lines_cleared(), 0);
    assert_eq!(game.score(), 0);
}
