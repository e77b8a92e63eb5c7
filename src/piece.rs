//! Active falling piece

use crate::tetromino::{Shape, TetrominoType, shape_width};

/// A placed tetromino: kind, origin and rotation.
///
/// Movement here is unchecked; the game validates a move with
/// [`crate::game::Game::can_place`] before applying it. `Copy` gives an
/// independent duplicate for trying a rotation without committing to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub piece_type: TetrominoType,
    /// Column of the shape grid's left edge
    pub x: i32,
    /// Row of the shape grid's top edge; negative while above the board
    pub y: i32,
    /// Index into the kind's rotation states
    pub rotation: usize,
}

impl Piece {
    pub fn new(piece_type: TetrominoType, x: i32, y: i32) -> Self {
        Self {
            piece_type,
            x,
            y,
            rotation: 0,
        }
    }

    /// Spawn position for a board of the given width: grid centred
    /// horizontally, top row on board row 0. When the free space is odd
    /// the extra column goes on the left.
    pub fn spawn(piece_type: TetrominoType, board_width: usize) -> Self {
        let width = shape_width(piece_type.shape(0));
        let x = board_width.saturating_sub(width).div_ceil(2) as i32;
        Self::new(piece_type, x, 0)
    }

    /// Occupancy grid for the current rotation
    pub fn shape(&self) -> Shape {
        self.piece_type.shape(self.rotation)
    }

    /// Board coordinates (x, y) of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells_offset(0, 0)
    }

    /// Board coordinates of every filled cell, as if moved by (dx, dy)
    pub fn cells_offset(&self, dx: i32, dy: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (ox, oy) = (self.x + dx, self.y + dy);
        self.shape().iter().enumerate().flat_map(move |(row, cols)| {
            cols.iter()
                .enumerate()
                .filter(|&(_, &cell)| cell != 0)
                .map(move |(col, _)| (ox + col as i32, oy + row as i32))
        })
    }

    pub fn move_left(&mut self) {
        self.x -= 1;
    }

    pub fn move_right(&mut self) {
        self.x += 1;
    }

    pub fn move_down(&mut self) {
        self.y += 1;
    }

    /// Advance to the next rotation state, wrapping around
    pub fn rotate(&mut self) {
        self.rotation = self.piece_type.next_rotation(self.rotation);
    }

    /// A copy of this piece one rotation further on
    pub fn rotated(&self) -> Piece {
        let mut copy = *self;
        copy.rotate();
        copy
    }
}
