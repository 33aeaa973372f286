//! Four-in-a-row detection over a [`Board`].

use super::board::{Board, COLS, ROWS};
use super::player::Player;

const RUN: usize = 4;

/// Scan directions as (row step, col step): horizontal, vertical, and the two
/// diagonals. The order fixes which line [`detect`] reports first.
const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A board coordinate, row 0 at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

/// A completed line of four, from its first to its last cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub player: Player,
    pub start: Coord,
    pub end: Coord,
}

impl Segment {
    /// Every cell the segment covers, start to end.
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let dr = self.end.row as i32 - self.start.row as i32;
        let dc = self.end.col as i32 - self.start.col as i32;
        let steps = dr.abs().max(dc.abs());
        let (sr, sc) = (dr.signum(), dc.signum());
        let start = self.start;
        (0..=steps).map(move |i| Coord {
            row: (start.row as i32 + sr * i) as usize,
            col: (start.col as i32 + sc * i) as usize,
        })
    }
}

/// Return the winner of the first line of four found, scanning cells in
/// row-major order and directions in [`DIRECTIONS`] order.
pub fn detect(board: &Board) -> Option<Player> {
    runs(board).next().map(|segment| segment.player)
}

/// Every line of four on the board. Overlapping lines (e.g. five in a row)
/// are reported once per starting cell.
pub fn winning_segments(board: &Board) -> Vec<Segment> {
    runs(board).collect()
}

fn runs(board: &Board) -> impl Iterator<Item = Segment> + '_ {
    (0..ROWS)
        .flat_map(|row| (0..COLS).map(move |col| (row, col)))
        .flat_map(|(row, col)| DIRECTIONS.into_iter().map(move |dir| (row, col, dir)))
        .filter_map(|(row, col, dir)| run_from(board, row, col, dir))
}

fn run_from(board: &Board, row: usize, col: usize, (dr, dc): (i32, i32)) -> Option<Segment> {
    let cell = board.get(row, col);
    let player = Player::from_cell(cell)?;

    let mut count = 1;
    let mut end = Coord { row, col };
    for step in 1..RUN as i32 {
        let r = row as i32 + dr * step;
        let c = col as i32 + dc * step;
        if !in_bounds(r, c) || board.get(r as usize, c as usize) != cell {
            break;
        }
        count += 1;
        end = Coord {
            row: r as usize,
            col: c as usize,
        };
    }

    (count == RUN).then_some(Segment {
        player,
        start: Coord { row, col },
        end,
    })
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..ROWS as i32).contains(&row) && (0..COLS as i32).contains(&col)
}
