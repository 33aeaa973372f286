//! Terminal client: draws the board with its falling pieces and turns key
//! presses and mouse clicks into moves.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;
