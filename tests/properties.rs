//! Property tests for line clearing, collision and the game invariants

use proptest::prelude::*;
use tetris_classic::board::EMPTY;
use tetris_classic::{Board, Game, Piece, TetrominoType};

fn row_strategy(width: usize) -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(1u8..=7, width),
        prop::collection::vec(0u8..=7, width),
    ]
}

fn grid_strategy() -> impl Strategy<Value = (usize, Vec<Vec<u8>>)> {
    (1usize..10, 1usize..22)
        .prop_flat_map(|(w, h)| (Just(w), prop::collection::vec(row_strategy(w), h)))
}

fn board_from(width: usize, rows: &[Vec<u8>]) -> Board {
    let mut board = Board::new(width, rows.len());
    for (y, row) in rows.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            board.set(x as i32, y as i32, cell);
        }
    }
    board
}

proptest! {
    #[test]
    fn clear_lines_removes_full_rows_and_keeps_order((width, rows) in grid_strategy()) {
        let mut board = board_from(width, &rows);

        let kept: Vec<Vec<u8>> = rows
            .iter()
            .filter(|row| row.iter().any(|&c| c == EMPTY))
            .cloned()
            .collect();
        let removed = rows.len() - kept.len();
        let mut expected = vec![vec![EMPTY; width]; removed];
        expected.extend(kept);

        prop_assert_eq!(board.clear_lines() as usize, removed);
        let actual: Vec<Vec<u8>> = board.rows().map(|row| row.to_vec()).collect();
        prop_assert_eq!(actual, expected);

        // A second pass finds nothing left to clear
        prop_assert_eq!(board.clear_lines(), 0);
    }

    #[test]
    fn can_place_matches_collision_rule(
        (width, rows) in grid_strategy(),
        kind in 0usize..7,
        rotation in 0usize..4,
        x in -5i32..12,
        y in -6i32..24,
    ) {
        let board = board_from(width, &rows);
        let (w, h) = (board.width() as i32, board.height() as i32);
        let game = Game::with_board(board.clone(), 0);

        let mut piece = Piece::new(TetrominoType::ALL[kind], x, y);
        for _ in 0..rotation {
            piece.rotate();
        }

        let cells: Vec<(i32, i32)> = piece.cells().collect();
        let off_grid = cells.iter().any(|&(cx, cy)| cx < 0 || cx >= w || cy >= h);
        let overlaps = cells
            .iter()
            .any(|&(cx, cy)| cy >= 0 && board.get(cx, cy) != EMPTY);

        prop_assert_eq!(game.can_place(&piece, 0, 0), !off_grid && !overlaps);
    }

    #[test]
    fn random_play_keeps_invariants(
        seed in any::<u64>(),
        moves in prop::collection::vec(0u8..5, 1..400),
    ) {
        let mut game = Game::with_seed(seed);
        let (mut score, mut level, mut lines) = (0, 1, 0);

        for m in moves {
            match m {
                0 => { game.try_move_left(); }
                1 => { game.try_move_right(); }
                2 => { game.try_move_down(); }
                3 => { game.try_rotate(); }
                _ => { game.step(); }
            }

            if !game.is_game_over() {
                prop_assert!(game.can_place(game.active_piece(), 0, 0));
            }
            prop_assert!(game.score() >= score);
            prop_assert!(game.level() >= level);
            prop_assert!(game.lines_cleared() >= lines);
            prop_assert_eq!(game.level(), game.lines_cleared() / 10 + 1);
            prop_assert!(game.board().rows().flatten().all(|&c| c <= 7));
            prop_assert!(game.tick_interval().as_millis() >= 50);

            score = game.score();
            level = game.level();
            lines = game.lines_cleared();
        }
    }
}
