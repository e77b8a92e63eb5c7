//! Game board representation and line clearing

/// Standard board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// Cell value: 0 is empty, 1..=7 is the kind that locked there
pub type Cell = u8;

pub const EMPTY: Cell = 0;

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Row-major, row 0 is the top of the well
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Get the cell at (x, y); 0 when out of bounds
    pub fn get(&self, x: i32, y: i32) -> Cell {
        self.index(x, y).map_or(EMPTY, |i| self.cells[i])
    }

    /// Set the cell at (x, y); ignored when out of bounds
    pub fn set(&mut self, x: i32, y: i32, value: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = value;
        }
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunk size must be nonzero; a zero-width board has no cells anyway
        self.cells.chunks(self.width.max(1))
    }

    fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.width > 0 && y < self.height && self.row(y).iter().all(|&cell| cell != EMPTY)
    }

    /// Check if the board has no filled cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == EMPTY)
    }

    /// Clear completed lines and return the number cleared.
    ///
    /// Scans bottom to top. A full row is removed by shifting everything
    /// above it down one row and blanking the top row; the same row index is
    /// then checked again, since it now holds what used to be above it.
    pub fn clear_lines(&mut self) -> u32 {
        let mut lines_cleared = 0;
        let mut y = self.height;

        while y > 0 {
            if self.is_row_full(y - 1) {
                self.remove_row(y - 1);
                lines_cleared += 1;
            } else {
                y -= 1;
            }
        }

        lines_cleared
    }

    fn remove_row(&mut self, y: usize) {
        let width = self.width;
        // Rows 0..y move down into 1..=y
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(EMPTY);
    }
}
