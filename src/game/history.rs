use super::board::COLS;
use super::player::Player;

/// Columns played so far, one decimal digit per ply ("3340" means columns
/// 3, 3, 4, 0). This is also the wire format the move oracle expects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    encoded: String,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one ply. `col` must be a board column.
    pub fn push(&mut self, col: usize) {
        debug_assert!(col < COLS);
        if let Some(digit) = char::from_digit(col as u32, 10) {
            self.encoded.push(digit);
        }
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// Number of plies played. Every ply is a single ASCII digit.
    pub fn len(&self) -> usize {
        self.encoded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoded.is_empty()
    }

    /// Parity of the history decides who moves next.
    pub fn next_player(&self) -> Player {
        Player::for_ply(self.len())
    }

    pub fn columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.encoded
            .chars()
            .filter_map(|c| c.to_digit(10).map(|d| d as usize))
    }

    pub fn clear(&mut self) {
        self.encoded.clear();
    }
}
