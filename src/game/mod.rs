//! Core Connect Four rules: board, players, move history, win detection, and
//! the move engine that ties them together.

mod board;
mod engine;
mod history;
mod player;
pub mod win;

pub use board::{Board, Cell, COLS, ROWS};
pub use engine::{GameStatus, MoveEngine, MoveError, Placement};
pub use history::MoveHistory;
pub use player::Player;
pub use win::{Coord, Segment};
