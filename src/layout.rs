//! Pixel geometry of the virtual board canvas: `COLS` x `ROWS` square cells,
//! y growing downwards, row 0 drawn at the bottom.

use crate::game::{COLS, ROWS};

pub const DEFAULT_CELL_SIZE: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    cell_size: f32,
}

impl Layout {
    pub fn new(cell_size: f32) -> Self {
        Layout { cell_size }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn width(&self) -> f32 {
        self.cell_size * COLS as f32
    }

    pub fn height(&self) -> f32 {
        self.cell_size * ROWS as f32
    }

    /// Horizontal center of a column.
    pub fn col_to_x(&self, col: usize) -> f32 {
        col as f32 * self.cell_size + self.cell_size / 2.0
    }

    /// Vertical center of a row.
    pub fn row_to_y(&self, row: usize) -> f32 {
        self.height() - (row as f32 * self.cell_size + self.cell_size / 2.0)
    }

    /// Column under a click at `x`, clamped onto the board.
    pub fn x_to_column(&self, x: f32) -> usize {
        let col_width = self.width() / COLS as f32;
        let col = (x / col_width).floor();
        if col.is_nan() || col < 0.0 {
            0
        } else {
            (col as usize).min(COLS - 1)
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::new(DEFAULT_CELL_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_size() {
        let layout = Layout::default();
        assert_eq!(layout.width(), 700.0);
        assert_eq!(layout.height(), 600.0);
    }

    #[test]
    fn test_cell_centers() {
        let layout = Layout::default();
        assert_eq!(layout.col_to_x(0), 50.0);
        assert_eq!(layout.col_to_x(6), 650.0);
        assert_eq!(layout.row_to_y(0), 550.0);
        assert_eq!(layout.row_to_y(5), 50.0);
    }

    #[test]
    fn test_x_to_column() {
        let layout = Layout::default();
        assert_eq!(layout.x_to_column(0.0), 0);
        assert_eq!(layout.x_to_column(99.9), 0);
        assert_eq!(layout.x_to_column(100.0), 1);
        assert_eq!(layout.x_to_column(650.0), 6);
    }

    #[test]
    fn test_x_to_column_clamps_off_canvas() {
        let layout = Layout::default();
        assert_eq!(layout.x_to_column(-25.0), 0);
        assert_eq!(layout.x_to_column(700.0), 6);
        assert_eq!(layout.x_to_column(10_000.0), 6);
        assert_eq!(layout.x_to_column(f32::NAN), 0);
    }

    #[test]
    fn test_column_centers_round_trip() {
        let layout = Layout::new(64.0);
        for col in 0..COLS {
            assert_eq!(layout.x_to_column(layout.col_to_x(col)), col);
        }
    }
}
