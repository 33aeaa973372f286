//! One game of Connect Four as the frame loop sees it: the rules engine, the
//! falling pieces, and the arbiter deciding who may move.

use std::sync::Arc;

use log::info;

use crate::animation::{Piece, PieceAnimator, Physics};
use crate::arbiter::{Automation, TurnArbiter};
use crate::config::AppConfig;
use crate::game::{win, Board, GameStatus, MoveEngine, MoveError, Placement, Player, Segment};
use crate::layout::Layout;
use crate::oracle::MoveOracle;

pub struct GameSession {
    engine: MoveEngine,
    animator: PieceAnimator,
    arbiter: TurnArbiter,
    layout: Layout,
}

impl GameSession {
    pub fn new(arbiter: TurnArbiter, layout: Layout, physics: Physics) -> Self {
        GameSession {
            engine: MoveEngine::new(),
            animator: PieceAnimator::new(physics),
            arbiter,
            layout,
        }
    }

    pub fn from_config(config: &AppConfig, oracle: Arc<dyn MoveOracle>) -> Self {
        let automation = Automation {
            enabled: config.players.automated,
            color: config.players.automated_color,
        };
        let arbiter = TurnArbiter::new(oracle, config.oracle.depth, automation)
            .with_retry_after(config.oracle.retry_after_secs);
        Self::new(
            arbiter,
            config.animation.layout(),
            config.animation.physics(),
        )
    }

    /// Start over from an encoded move history. The current game is only
    /// replaced when the whole history is legal.
    pub fn load_history(&mut self, moves: &str) -> Result<(), MoveError> {
        MoveEngine::replay(moves)?;
        self.reset();
        for col in moves.trim().chars().filter_map(|c| c.to_digit(10)) {
            let placement = self.engine.play_move(col as usize)?;
            self.animator.spawn(placement, &self.layout);
        }
        info!("loaded position {:?}", self.engine.history().as_str());
        Ok(())
    }

    /// Column under a click at canvas x-coordinate `x`.
    pub fn column_at(&self, x: f32) -> usize {
        self.layout.x_to_column(x)
    }

    /// Handle a click at canvas coordinates. Only the column matters.
    pub fn click_at(&mut self, x: f32, _y: f32) -> Option<Placement> {
        let col = self.column_at(x);
        let placement = self.arbiter.human_move(&mut self.engine, col)?;
        self.animator.spawn(placement, &self.layout);
        Some(placement)
    }

    /// Advance one frame: take in a resolved oracle answer, move the falling
    /// pieces, then ask the oracle if it is the automated side's turn.
    pub fn simulate(&mut self, dt: f32) {
        if let Some(placement) = self.arbiter.poll(&mut self.engine) {
            self.animator.spawn(placement, &self.layout);
        }
        self.animator.step(dt);
        self.arbiter.request_if_due(&self.engine, dt);
    }

    /// Clear the board, history, status and pieces, and drop any request
    /// still waiting on the oracle. Call between frames.
    pub fn reset(&mut self) {
        self.arbiter.cancel();
        self.engine.reset();
        self.animator.clear();
        info!("new game");
    }

    pub fn set_automation_enabled(&mut self, enabled: bool) {
        self.arbiter.set_automation_enabled(enabled);
    }

    pub fn automation(&self) -> Automation {
        self.arbiter.automation()
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    pub fn history(&self) -> &str {
        self.engine.history().as_str()
    }

    pub fn status(&self) -> GameStatus {
        self.engine.status()
    }

    pub fn current_player(&self) -> Player {
        self.engine.current_player()
    }

    pub fn pieces(&self) -> &[Piece] {
        self.animator.pieces()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// True once every piece has come to rest.
    pub fn is_settled(&self) -> bool {
        self.animator.is_settled()
    }

    pub fn is_thinking(&self) -> bool {
        self.arbiter.is_thinking()
    }

    pub fn is_stalled(&self) -> bool {
        self.arbiter.is_stalled(&self.engine)
    }

    pub fn accepts_click(&self, col: usize) -> bool {
        self.arbiter.human_may_play(&self.engine, col)
    }

    /// Winning lines to draw. Empty until the game is won and every piece
    /// has landed, so the result never shows while discs are still falling.
    pub fn highlighted_segments(&self) -> Vec<Segment> {
        match self.engine.status() {
            GameStatus::Won(_) if self.animator.is_settled() => {
                win::winning_segments(self.engine.board())
            }
            _ => Vec::new(),
        }
    }
}
