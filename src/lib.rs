//! Classic falling-block puzzle.
//!
//! The game core ([`board`], [`tetromino`], [`piece`], [`score`], [`game`])
//! does no I/O and keeps no clock; the terminal shell ([`input`],
//! [`settings`], [`ticker`], [`ui`]) drives it from a single thread.

pub mod board;
pub mod game;
pub mod input;
pub mod piece;
pub mod score;
pub mod settings;
pub mod tetromino;
pub mod ticker;
pub mod ui;

pub use board::{BOARD_HEIGHT, BOARD_WIDTH, Board};
pub use game::{Action, Game, GameState, StepOutcome};
pub use piece::Piece;
pub use tetromino::TetrominoType;
