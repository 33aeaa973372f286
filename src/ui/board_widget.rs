use crate::game::{Coord, Player, COLS, ROWS};
use crate::session::GameSession;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Terminal columns per board cell.
pub const CELL_WIDTH: u16 = 3;
/// Full width of the framed board: "  ║" + cells + " ║".
pub const BOARD_WIDTH: u16 = 3 + CELL_WIDTH * COLS as u16 + 2;
/// Column numbers, top border, rows, bottom border, selector.
pub const BOARD_HEIGHT: u16 = ROWS as u16 + 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Disc {
    player: Player,
    highlighted: bool,
}

/// Where each piece currently is, in terminal rows from the top. Pieces still
/// above the board are clipped, the way the canvas clips them.
fn disc_grid(session: &GameSession) -> [[Option<Disc>; COLS]; ROWS] {
    let mut grid = [[None; COLS]; ROWS];
    let cell_size = session.layout().cell_size();

    for piece in session.pieces() {
        if piece.y < 0.0 {
            continue;
        }
        let line = (piece.y / cell_size).floor() as usize;
        if line < ROWS && piece.col < COLS {
            grid[line][piece.col] = Some(Disc {
                player: piece.player,
                highlighted: false,
            });
        }
    }

    for segment in session.highlighted_segments() {
        for Coord { row, col } in segment.cells() {
            if let Some(disc) = grid[ROWS - 1 - row][col].as_mut() {
                disc.highlighted = true;
            }
        }
    }

    grid
}

fn disc_span(disc: Option<Disc>) -> Span<'static> {
    match disc {
        None => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
        Some(disc) => {
            let color = match disc.player {
                Player::Red => Color::Red,
                Player::Yellow => Color::Yellow,
            };
            let mut style = Style::default().fg(color);
            if disc.highlighted {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            Span::styled(" \u{25cf} ", style)
        }
    }
}

/// Render the board with its pieces at their animated positions. Returns the
/// area covered by the cells so clicks can be mapped back onto the board.
pub fn render_board(
    frame: &mut Frame,
    session: &GameSession,
    selected_column: usize,
    area: Rect,
) -> Rect {
    let board_area = Rect {
        x: area.x + area.width.saturating_sub(BOARD_WIDTH) / 2,
        y: area.y + area.height.saturating_sub(BOARD_HEIGHT) / 2,
        width: BOARD_WIDTH.min(area.width),
        height: BOARD_HEIGHT.min(area.height),
    };

    let mut lines = Vec::new();

    // Column numbers; full or forbidden columns are dimmed.
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        let label = format!(" {} ", col + 1);
        let style = if col == selected_column {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else if session.accepts_click(col) {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        col_line.push(Span::styled(label, style));
    }
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔══════════════════════╗"));
    for row in disc_grid(session) {
        let mut spans = vec![Span::raw("  ║")];
        spans.extend(row.into_iter().map(disc_span));
        spans.push(Span::raw(" ║"));
        lines.push(Line::from(spans));
    }
    lines.push(Line::from("  ╚══════════════════════╝"));

    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    lines.push(Line::from(indicator_line));

    frame.render_widget(Paragraph::new(lines), board_area);

    Rect {
        x: board_area.x + 3,
        y: board_area.y + 2,
        width: CELL_WIDTH * COLS as u16,
        height: ROWS as u16,
    }
}

/// Map a terminal cell inside (or near) the board onto canvas pixels.
pub fn terminal_to_canvas(session: &GameSession, cells: Rect, column: u16, row: u16) -> (f32, f32) {
    let layout = session.layout();
    let cell_px = layout.cell_size();
    let dx = column as f32 - cells.x as f32 + 0.5;
    let dy = row as f32 - cells.y as f32 + 0.5;
    (dx * cell_px / CELL_WIDTH as f32, dy * cell_px)
}
