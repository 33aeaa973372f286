//! # Connect Four Client
//!
//! A two-player Connect Four game with an optional automated opponent.
//! Features a terminal UI built with Ratatui, gravity-driven piece drops,
//! and a pluggable move oracle queried off the frame loop.
//!
//! ## Modules
//!
//! - [`game`]: Core rules: board, player, move history, win detection
//! - [`layout`]: Canvas geometry and pixel/column mapping
//! - [`animation`]: Falling pieces under constant gravity
//! - [`oracle`]: Move oracle contract, HTTP and process backends
//! - [`arbiter`]: Whose turn it is and when to ask the oracle
//! - [`session`]: One game as the frame loop drives it
//! - [`ui`]: Terminal UI: board widget, input handling
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod animation;
pub mod arbiter;
pub mod config;
pub mod error;
pub mod game;
pub mod layout;
pub mod oracle;
pub mod session;
pub mod ui;
