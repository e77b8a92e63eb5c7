//! Tetromino definitions and shapes
//!
//! All 7 tetrominoes with their rotation states. Each state is a small
//! row-major occupancy grid, top row first. There is no kick table: a
//! rotation either fits at the same origin or it is rejected.

/// A rotation state: rows of 0/1 cells, top row first
pub type Shape = &'static [&'static [u8]];

/// The 7 tetromino types, in cell-value order (I = 1 ... Z = 7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // long bar
    O, // square
    T,
    J,
    L,
    S,
    Z,
}

const I_SHAPES: &[Shape] = &[&[&[1, 1, 1, 1]], &[&[1], &[1], &[1], &[1]]];

const O_SHAPES: &[Shape] = &[&[&[1, 1], &[1, 1]]];

const T_SHAPES: &[Shape] = &[
    &[&[0, 1, 0], &[1, 1, 1]],
    &[&[1, 0], &[1, 1], &[1, 0]],
    &[&[1, 1, 1], &[0, 1, 0]],
    &[&[0, 1], &[1, 1], &[0, 1]],
];

const J_SHAPES: &[Shape] = &[
    &[&[1, 0, 0], &[1, 1, 1]],
    &[&[1, 1], &[1, 0], &[1, 0]],
    &[&[1, 1, 1], &[0, 0, 1]],
    &[&[0, 1], &[0, 1], &[1, 1]],
];

const L_SHAPES: &[Shape] = &[
    &[&[0, 0, 1], &[1, 1, 1]],
    &[&[1, 0], &[1, 0], &[1, 1]],
    &[&[1, 1, 1], &[1, 0, 0]],
    &[&[1, 1], &[0, 1], &[0, 1]],
];

const S_SHAPES: &[Shape] = &[&[&[0, 1, 1], &[1, 1, 0]], &[&[1, 0], &[1, 1], &[0, 1]]];

const Z_SHAPES: &[Shape] = &[&[&[1, 1, 0], &[0, 1, 1]], &[&[0, 1], &[1, 1], &[1, 0]]];

impl TetrominoType {
    /// Every kind, in cell-value order
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::O,
        TetrominoType::T,
        TetrominoType::J,
        TetrominoType::L,
        TetrominoType::S,
        TetrominoType::Z,
    ];

    /// Position of this kind in [`TetrominoType::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Value written into the board when a piece of this kind locks
    pub fn cell_value(self) -> u8 {
        self as u8 + 1
    }

    /// Inverse of [`TetrominoType::cell_value`]; `None` for 0 or unknown values
    pub fn from_cell_value(value: u8) -> Option<TetrominoType> {
        match value {
            1..=7 => Some(Self::ALL[value as usize - 1]),
            _ => None,
        }
    }

    /// All rotation states of this kind, in rotation order
    pub fn shapes(self) -> &'static [Shape] {
        match self {
            TetrominoType::I => I_SHAPES,
            TetrominoType::O => O_SHAPES,
            TetrominoType::T => T_SHAPES,
            TetrominoType::J => J_SHAPES,
            TetrominoType::L => L_SHAPES,
            TetrominoType::S => S_SHAPES,
            TetrominoType::Z => Z_SHAPES,
        }
    }

    pub fn rotation_count(self) -> usize {
        self.shapes().len()
    }

    /// Occupancy grid for a rotation index (wraps around)
    pub fn shape(self, rotation: usize) -> Shape {
        let shapes = self.shapes();
        shapes[rotation % shapes.len()]
    }

    /// Rotation index that follows `rotation`
    pub fn next_rotation(self, rotation: usize) -> usize {
        (rotation + 1) % self.rotation_count()
    }
}

/// Width of a shape grid (widest row)
pub fn shape_width(shape: Shape) -> usize {
    shape.iter().map(|row| row.len()).max().unwrap_or(0)
}
