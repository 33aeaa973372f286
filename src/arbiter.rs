//! Turn arbitration between the human at the board and the automated player
//! driven by the move oracle.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::error::OracleError;
use crate::game::{MoveEngine, Placement, Player};
use crate::oracle::{parse_column, MoveOracle, PendingSuggestion};

/// Which side, if any, the oracle plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Automation {
    pub enabled: bool,
    pub color: Player,
}

impl Automation {
    pub fn disabled() -> Self {
        Automation {
            enabled: false,
            color: Player::Yellow,
        }
    }

    pub fn human_color(&self) -> Player {
        self.color.other()
    }
}

/// A ply the oracle failed to deliver.
#[derive(Debug, Clone, Copy)]
struct Stall {
    ply: usize,
    waited: f32,
}

pub struct TurnArbiter {
    oracle: Arc<dyn MoveOracle>,
    depth: u32,
    automation: Automation,
    retry_after: Option<f32>,
    pending: Option<PendingSuggestion>,
    stall: Option<Stall>,
}

impl TurnArbiter {
    pub fn new(oracle: Arc<dyn MoveOracle>, depth: u32, automation: Automation) -> Self {
        TurnArbiter {
            oracle,
            depth,
            automation,
            retry_after: None,
            pending: None,
            stall: None,
        }
    }

    /// Retry a failed oracle request after `seconds` of frame time instead of
    /// leaving the turn stalled.
    pub fn with_retry_after(mut self, seconds: Option<f32>) -> Self {
        self.retry_after = seconds;
        self
    }

    pub fn automation(&self) -> Automation {
        self.automation
    }

    /// Turn automated play on or off. Switching it off abandons any
    /// outstanding request; switching it on gives a stalled turn a fresh try.
    pub fn set_automation_enabled(&mut self, enabled: bool) {
        if self.automation.enabled == enabled {
            return;
        }
        self.automation.enabled = enabled;
        self.cancel();
        info!(
            "automated play {} for {}",
            if enabled { "enabled" } else { "disabled" },
            self.automation.color.name()
        );
    }

    /// True while an oracle request is outstanding.
    pub fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }

    /// True when the oracle failed on the current automated turn and no
    /// retry is scheduled yet.
    pub fn is_stalled(&self, engine: &MoveEngine) -> bool {
        self.pending.is_none()
            && self
                .stall
                .is_some_and(|stall| stall.ply == engine.history().len())
    }

    /// Whether a human click on `col` would be accepted right now.
    pub fn human_may_play(&self, engine: &MoveEngine, col: usize) -> bool {
        engine.is_column_playable(col)
            && (!self.automation.enabled
                || engine.current_player() == self.automation.human_color())
    }

    /// Play a human move. Clicks that are not allowed are dropped silently.
    pub fn human_move(&mut self, engine: &mut MoveEngine, col: usize) -> Option<Placement> {
        if !self.human_may_play(engine, col) {
            debug!("ignoring click on column {col}");
            return None;
        }
        match engine.play_move(col) {
            Ok(placement) => {
                info!(
                    "{} played column {} (history {})",
                    placement.player.name(),
                    col,
                    engine.history().as_str()
                );
                Some(placement)
            }
            Err(e) => {
                debug!("ignoring click on column {col}: {e}");
                None
            }
        }
    }

    /// Apply the oracle's answer if it has arrived. The in-flight request is
    /// cleared whether the answer is usable or not.
    pub fn poll(&mut self, engine: &mut MoveEngine) -> Option<Placement> {
        let result = self.pending.as_ref()?.try_take()?;
        let ply = self.pending.take().map(|p| p.ply())?;

        if ply != engine.history().len() || engine.is_over() {
            warn!(
                "discarding stale oracle answer for ply {ply} (now at ply {})",
                engine.history().len()
            );
            return None;
        }

        match result.and_then(|raw| Self::playable_column(engine, &raw)) {
            Ok(col) => match engine.play_move(col) {
                Ok(placement) => {
                    info!(
                        "oracle played column {} for {} (history {})",
                        col,
                        placement.player.name(),
                        engine.history().as_str()
                    );
                    Some(placement)
                }
                Err(e) => {
                    warn!("oracle move on column {col} rejected: {e}");
                    self.stall = Some(Stall { ply, waited: 0.0 });
                    None
                }
            },
            Err(e) => {
                warn!("oracle request for ply {ply} failed: {e}");
                self.stall = Some(Stall { ply, waited: 0.0 });
                None
            }
        }
    }

    /// Issue an oracle request when the automated side is to move and none is
    /// outstanding. `dt` is the frame time, used to pace retries.
    pub fn request_if_due(&mut self, engine: &MoveEngine, dt: f32) {
        if !self.automation.enabled
            || engine.is_over()
            || engine.current_player() != self.automation.color
            || self.pending.is_some()
        {
            return;
        }

        let ply = engine.history().len();
        if let Some(stall) = self.stall.as_mut().filter(|stall| stall.ply == ply) {
            let Some(delay) = self.retry_after else {
                return;
            };
            if dt.is_finite() && dt > 0.0 {
                stall.waited += dt;
            }
            if stall.waited < delay {
                return;
            }
            info!("retrying oracle request for ply {ply}");
        }
        self.stall = None;

        let history = engine.history().as_str().to_owned();
        info!(
            "asking {} oracle for ply {ply} (history {history:?}, depth {})",
            self.oracle.name(),
            self.depth
        );
        self.pending = Some(PendingSuggestion::spawn(
            Arc::clone(&self.oracle),
            history,
            self.depth,
            ply,
        ));
    }

    /// Abandon any outstanding request and forget a stalled turn.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!("cancelling oracle request for ply {}", pending.ply());
        }
        self.stall = None;
    }

    fn playable_column(engine: &MoveEngine, raw: &str) -> Result<usize, OracleError> {
        let col = parse_column(raw)?;
        if engine.board().is_column_full(col) {
            return Err(OracleError::InvalidSuggestion {
                suggestion: raw.trim().to_string(),
            });
        }
        Ok(col)
    }
}
