pub const ROWS: usize = 6;
pub const COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Red,
    Yellow,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Fixed 6x7 grid. Row 0 is the bottom row, so a column's occupied cells
/// always form a contiguous block starting at row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position (row 0 is the bottom)
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Number of pieces stacked in `col`, which is also the row the next
    /// piece dropped there lands on.
    pub fn height(&self, col: usize) -> usize {
        (0..ROWS)
            .take_while(|&row| !self.cells[row][col].is_empty())
            .count()
    }

    /// Write a piece into an empty cell. The caller picks `row` from
    /// [`Board::height`].
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        debug_assert!(
            self.cells[row][col].is_empty(),
            "cell ({row}, {col}) is already occupied"
        );
        debug_assert_eq!(row, self.height(col), "piece would float above column {col}");
        self.cells[row][col] = cell;
    }

    /// Check if a column is full. Columns off the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        !self.cells[ROWS - 1][col].is_empty()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    pub fn reset(&mut self) {
        self.cells = [[Cell::Empty; COLS]; ROWS];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
