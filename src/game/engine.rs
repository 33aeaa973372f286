use super::board::{Board, COLS};
use super::history::MoveHistory;
use super::player::Player;
use super::win;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is already over")]
    GameOver,

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("column {0} is off the board")]
    InvalidColumn(usize),

    #[error("move history contains {0:?}, expected a column digit 0-6")]
    BadHistory(char),
}

/// Where a move landed. The session spawns the falling piece from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub player: Player,
}

/// Applies moves to the board, tracks turn order through the move history,
/// and settles the game status once a move wins or fills the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveEngine {
    board: Board,
    history: MoveHistory,
    status: GameStatus,
}

impl MoveEngine {
    pub fn new() -> Self {
        MoveEngine {
            board: Board::new(),
            history: MoveHistory::new(),
            status: GameStatus::InProgress,
        }
    }

    /// Rebuild a game from an encoded history such as `"3344"`.
    pub fn replay(moves: &str) -> Result<Self, MoveError> {
        let mut engine = Self::new();
        for c in moves.trim().chars() {
            let col = c.to_digit(10).ok_or(MoveError::BadHistory(c))? as usize;
            engine.play_move(col)?;
        }
        Ok(engine)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Player whose turn it is, from the parity of the move history.
    pub fn current_player(&self) -> Player {
        self.history.next_player()
    }

    pub fn is_column_playable(&self, col: usize) -> bool {
        !self.is_over() && !self.board.is_column_full(col)
    }

    /// Drop the current player's piece into `col`.
    ///
    /// A rejected move leaves the engine untouched. Once the game is over
    /// every call is rejected with [`MoveError::GameOver`].
    pub fn play_move(&mut self, col: usize) -> Result<Placement, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }

        let row = self.board.height(col);
        if self.board.is_column_full(col) {
            return Err(MoveError::ColumnFull(col));
        }

        let player = self.current_player();
        self.history.push(col);
        self.board.set(row, col, player.to_cell());

        if let Some(winner) = win::detect(&self.board) {
            self.status = GameStatus::Won(winner);
        } else if self.board.is_full() {
            self.status = GameStatus::Draw;
        }

        Ok(Placement { row, col, player })
    }

    pub fn reset(&mut self) {
        self.board.reset();
        self.history.clear();
        self.status = GameStatus::InProgress;
    }
}

impl Default for MoveEngine {
    fn default() -> Self {
        Self::new()
    }
}
