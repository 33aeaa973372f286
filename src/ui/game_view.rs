use crate::game::{GameStatus, Player};
use crate::session::GameSession;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget;

/// Draw the whole screen. Returns the board cell area for click mapping.
pub fn render(
    frame: &mut Frame,
    session: &GameSession,
    selected_column: usize,
    message: &Option<String>,
) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(4), // Controls
        ])
        .split(frame.area());

    render_header(frame, session, chunks[0]);
    let cells = board_widget::render_board(frame, session, selected_column, chunks[1]);
    render_message(frame, session, message, chunks[2]);
    render_controls(frame, chunks[3]);
    cells
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Yellow => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, session: &GameSession, area: Rect) {
    let automation = session.automation();
    let engine = if automation.enabled {
        format!("Engine: {}", automation.color.name())
    } else {
        "Engine: off".to_string()
    };

    let (status, color) = match session.status() {
        GameStatus::InProgress => {
            let player = session.current_player();
            (
                format!("Current Player: {}  |  {}", player.name(), engine),
                player_color(player),
            )
        }
        GameStatus::Won(player) => (
            format!("{} wins!  |  {}", player.name(), engine),
            player_color(player),
        ),
        GameStatus::Draw => (format!("Draw  |  {}", engine), Color::White),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));

    frame.render_widget(header, area);
}

fn render_message(frame: &mut Frame, session: &GameSession, message: &Option<String>, area: Rect) {
    let text = if session.is_thinking() {
        "Engine is thinking..."
    } else if session.is_stalled() {
        "Engine unavailable. Toggle E off and on to retry, or press R to restart."
    } else {
        message.as_deref().unwrap_or("")
    };
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line1 = Line::from("←/→: Move  |  Enter/Click: Drop  |  R: Restart  |  Q: Quit");
    let line2 = Line::from("E: Toggle engine");

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
