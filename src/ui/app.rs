use crate::game::{GameStatus, COLS};
use crate::session::GameSession;
use crossterm::event::{self, Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::Backend, layout::Rect, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// Frame loop around a [`GameSession`]: simulate, draw, then handle input
/// until the next frame is due.
pub struct App {
    session: GameSession,
    frame_duration: Duration,
    selected_column: usize,
    board_cells: Rect,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(session: GameSession, frame_duration: Duration) -> Self {
        App {
            session,
            frame_duration,
            selected_column: 3, // Start in middle
            board_cells: Rect::default(),
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let mut last_frame = Instant::now();
        loop {
            let now = Instant::now();
            let dt = now.duration_since(last_frame).as_secs_f32();
            last_frame = now;

            self.session.simulate(dt);
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle input until the next frame is due
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(self.frame_duration)? {
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let x = self.session.layout().col_to_x(self.selected_column);
                self.drop_piece(x, 0.0);
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                let enabled = !self.session.automation().enabled;
                self.session.set_automation_enabled(enabled);
                self.message = Some(if enabled {
                    "Engine on".to_string()
                } else {
                    "Engine off".to_string()
                });
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.session.reset();
                self.selected_column = 3;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let cells = self.board_cells;
        // Clicks well away from the board are not meant for it.
        if mouse.row + 2 < cells.y || mouse.row > cells.y + cells.height + 1 {
            return;
        }
        let (x, y) = super::board_widget::terminal_to_canvas(&self.session, cells, mouse.column, mouse.row);
        self.selected_column = self.session.column_at(x);
        self.message = None;
        self.drop_piece(x, y);
    }

    /// Drop a piece where the player clicked. Clicks that are not allowed
    /// are ignored without a message.
    fn drop_piece(&mut self, x: f32, y: f32) {
        if self.session.click_at(x, y).is_none() {
            return;
        }
        match self.session.status() {
            GameStatus::Won(player) => {
                self.message = Some(format!("{} wins! Press 'r' to restart.", player.name()));
            }
            GameStatus::Draw => {
                self.message = Some("It's a draw!".to_string());
            }
            GameStatus::InProgress => {}
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut ratatui::Frame) {
        self.board_cells =
            super::game_view::render(frame, &self.session, self.selected_column, &self.message);
    }
}
