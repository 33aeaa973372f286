//! Falling-disc physics. Purely visual: the board is already updated when a
//! piece starts falling.

use crate::game::{Placement, Player};
use crate::layout::Layout;

pub const DEFAULT_GRAVITY: f32 = 6000.0;
pub const DEFAULT_SPAWN_Y: f32 = -30.0;

/// Gravity and spawn height shared by every piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    pub gravity: f32,
    pub spawn_y: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Physics {
            gravity: DEFAULT_GRAVITY,
            spawn_y: DEFAULT_SPAWN_Y,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub player: Player,
    pub row: usize,
    pub col: usize,
    pub x: f32,
    pub y: f32,
    pub rest_y: f32,
    velocity: f32,
    acceleration: f32,
}

impl Piece {
    /// Spawn a piece above the board, over the column it was played in.
    pub fn spawn(placement: Placement, layout: &Layout, physics: &Physics) -> Self {
        Piece {
            player: placement.player,
            row: placement.row,
            col: placement.col,
            x: layout.col_to_x(placement.col),
            y: physics.spawn_y,
            rest_y: layout.row_to_y(placement.row),
            velocity: 0.0,
            acceleration: physics.gravity,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.acceleration == 0.0
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Integrate one frame. Once the piece reaches its slot it is clamped
    /// there and never moves again.
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            return;
        }

        self.velocity += self.acceleration * dt;
        self.y += self.velocity * dt;

        if self.y >= self.rest_y {
            self.y = self.rest_y;
            self.velocity = 0.0;
            self.acceleration = 0.0;
        }
    }
}

/// Every piece placed this game, in play order.
#[derive(Debug, Clone, Default)]
pub struct PieceAnimator {
    pieces: Vec<Piece>,
    physics: Physics,
}

impl PieceAnimator {
    pub fn new(physics: Physics) -> Self {
        PieceAnimator {
            pieces: Vec::new(),
            physics,
        }
    }

    pub fn spawn(&mut self, placement: Placement, layout: &Layout) {
        self.pieces.push(Piece::spawn(placement, layout, &self.physics));
    }

    /// Advance every piece by `dt` seconds. A non-finite or negative `dt`
    /// counts as no time at all.
    pub fn step(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        for piece in &mut self.pieces {
            piece.step(dt);
        }
    }

    /// True when no piece is still falling.
    pub fn is_settled(&self) -> bool {
        self.pieces.iter().all(Piece::is_settled)
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }
}
