//! Core game state and logic

use crate::board::{Board, EMPTY};
use crate::piece::Piece;
use crate::score::Score;
use crate::tetromino::TetrominoType;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tracing::{debug, info};

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Restart,
}

/// What a gravity step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The game is over; nothing happened
    Ignored,
    /// The active piece moved down one row
    Fell,
    /// The active piece locked and the next one was promoted
    Locked {
        lines_cleared: u32,
        /// The tick interval must be rescheduled
        level_changed: bool,
        /// The promoted piece did not fit
        game_over: bool,
    },
}

impl StepOutcome {
    pub fn level_changed(&self) -> bool {
        matches!(self, StepOutcome::Locked { level_changed: true, .. })
    }
}

/// The main game struct.
///
/// Not synchronised: ticks and input must be applied from one thread.
pub struct Game {
    board: Board,
    active: Piece,
    next: Piece,
    score: Score,
    state: GameState,
    rng: ChaCha8Rng,
}

impl Game {
    /// Create a new game on a standard board
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a new game with a fixed seed (reproducible piece sequence)
    pub fn with_seed(seed: u64) -> Self {
        Self::with_board(Board::default(), seed)
    }

    /// Start a game on an existing board. If the first piece does not fit,
    /// the game is over from the start.
    pub fn with_board(board: Board, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let active = Piece::spawn(random_type(&mut rng), board.width());
        let next = Piece::spawn(random_type(&mut rng), board.width());

        let mut game = Self {
            board,
            active,
            next,
            score: Score::new(),
            state: GameState::Playing,
            rng,
        };
        if !game.can_place(&game.active, 0, 0) {
            game.state = GameState::GameOver;
        }
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_piece(&self) -> &Piece {
        &self.active
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u64 {
        self.score.points
    }

    pub fn level(&self) -> u32 {
        self.score.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.score.lines
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// How long the driving loop should wait between steps at this level
    pub fn tick_interval(&self) -> Duration {
        self.score.tick_interval()
    }

    /// Process an action. Returns true if anything changed.
    pub fn process_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.try_move_left(),
            Action::MoveRight => self.try_move_right(),
            Action::SoftDrop => self.try_move_down(),
            Action::Rotate => self.try_rotate(),
            Action::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Check whether `piece`, moved by (dx, dy), fits on the board.
    ///
    /// Cells off either side or below the floor collide. Cells above the
    /// top row never collide, so pieces may spawn and rotate partly hidden.
    pub fn can_place(&self, piece: &Piece, dx: i32, dy: i32) -> bool {
        let width = self.board.width() as i32;
        let height = self.board.height() as i32;

        piece.cells_offset(dx, dy).all(|(x, y)| {
            if x < 0 || x >= width || y >= height {
                return false;
            }
            y < 0 || self.board.get(x, y) == EMPTY
        })
    }

    /// Move the active piece if the target position is free
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if self.is_game_over() || !self.can_place(&self.active, dx, dy) {
            return false;
        }
        self.active.x += dx;
        self.active.y += dy;
        true
    }

    pub fn try_move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn try_move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    pub fn try_move_down(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Rotate in place. No kicks: if the rotated shape does not fit at the
    /// same origin the piece stays as it was.
    pub fn try_rotate(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        let rotated = self.active.rotated();
        if !self.can_place(&rotated, 0, 0) {
            return false;
        }
        self.active.rotate();
        true
    }

    /// Gravity tick: fall one row, or lock and bring in the next piece
    pub fn step(&mut self) -> StepOutcome {
        if self.is_game_over() {
            return StepOutcome::Ignored;
        }

        if self.can_place(&self.active, 0, 1) {
            self.active.move_down();
            return StepOutcome::Fell;
        }

        self.lock_piece()
    }

    /// Start over from an empty board
    pub fn restart(&mut self) {
        self.board.clear();
        self.score = Score::new();
        self.state = GameState::Playing;
        self.active = self.spawn_piece();
        self.next = self.spawn_piece();
        info!("Game restarted");
    }

    fn spawn_piece(&mut self) -> Piece {
        Piece::spawn(random_type(&mut self.rng), self.board.width())
    }

    /// Lock the active piece, clear lines, and promote the next piece
    fn lock_piece(&mut self) -> StepOutcome {
        let value = self.active.piece_type.cell_value();
        for (x, y) in self.active.cells() {
            if y >= 0 {
                self.board.set(x, y, value);
            }
        }

        let lines_cleared = self.board.clear_lines();
        let level_changed = self.score.add_clear(lines_cleared);
        debug!(
            "Locked {:?} at ({}, {}), cleared {} lines",
            self.active.piece_type, self.active.x, self.active.y, lines_cleared
        );
        if level_changed {
            info!("Level up to {}", self.score.level);
        }

        self.active = self.next;
        self.next = self.spawn_piece();

        let game_over = !self.can_place(&self.active, 0, 0);
        if game_over {
            self.state = GameState::GameOver;
            info!(
                "Game over: score={} level={} lines={}",
                self.score.points, self.score.level, self.score.lines
            );
        }

        StepOutcome::Locked {
            lines_cleared,
            level_changed,
            game_over,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform pick among the 7 kinds
fn random_type(rng: &mut impl Rng) -> TetrominoType {
    TetrominoType::ALL[rng.gen_range(0..TetrominoType::ALL.len())]
}
