//! Key events to gameplay intents
//!
//! The router is the only place raw key identifiers are interpreted. Keys
//! mean different things per phase: arrows navigate the stage-select grid
//! there, and drive the paddle during play. One-shot intents accumulate
//! until the state machine drains them at the next tick, so a press is
//! never dropped; repeated presses within one frame collapse to the latest.
//!
//! Destructive resets never fire directly. A reset key raises a
//! confirmation request that the renderer displays; the next y/n decides,
//! replacing the blocking dialogs of a browser host.

use crate::sim::{GamePhase, SelectDir, TickInput};

/// A pending yes/no question for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmRequest {
    /// Wipe all stage-clear progress?
    ResetProgress,
    /// Also zero the score?
    ResetScore,
}

/// Translates raw key-down/key-up events into per-tick intents
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    left_held: bool,
    right_held: bool,
    confirm: bool,
    cancel: bool,
    select: Option<SelectDir>,
    reset_progress: bool,
    reset_score: bool,
    pending: Option<ConfirmRequest>,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The confirmation the renderer should be showing, if any
    pub fn pending_confirmation(&self) -> Option<ConfirmRequest> {
        self.pending
    }

    /// Feed a key-down event, scoped by the current phase
    pub fn key_down(&mut self, key: &str, phase: GamePhase) {
        if self.pending.is_some() {
            self.answer_pending(key, phase);
            return;
        }

        match phase {
            GamePhase::StageSelect => match key {
                "ArrowLeft" | "Left" => self.select = Some(SelectDir::Left),
                "ArrowRight" | "Right" => self.select = Some(SelectDir::Right),
                "ArrowUp" | "Up" => self.select = Some(SelectDir::Up),
                "ArrowDown" | "Down" => self.select = Some(SelectDir::Down),
                " " | "Spacebar" | "Enter" => self.confirm = true,
                "r" | "R" => self.pending = Some(ConfirmRequest::ResetProgress),
                _ => {}
            },
            GamePhase::Playing => match key {
                "ArrowLeft" | "Left" => self.left_held = true,
                "ArrowRight" | "Right" => self.right_held = true,
                " " | "Spacebar" | "Enter" => self.confirm = true,
                "Escape" => self.cancel = true,
                _ => {}
            },
            GamePhase::LifeLost
            | GamePhase::StageClear
            | GamePhase::GameOver
            | GamePhase::GameComplete => match key {
                " " | "Spacebar" | "Enter" => self.confirm = true,
                "Escape" => self.cancel = true,
                "r" | "R" => self.pending = Some(ConfirmRequest::ResetScore),
                _ => {}
            },
        }
    }

    /// Feed a key-up event (only held movement cares)
    pub fn key_up(&mut self, key: &str) {
        match key {
            "ArrowLeft" | "Left" => self.left_held = false,
            "ArrowRight" | "Right" => self.right_held = false,
            _ => {}
        }
    }

    /// Resolve the pending confirmation with a y/n keypress. Every other
    /// key is ignored while the question is up.
    fn answer_pending(&mut self, key: &str, phase: GamePhase) {
        let accepted = matches!(key, "y" | "Y" | "Enter");
        let declined = matches!(key, "n" | "N" | "Escape");
        if !accepted && !declined {
            return;
        }

        match self.pending.take() {
            Some(ConfirmRequest::ResetProgress) => {
                if accepted {
                    self.reset_progress = true;
                    // In stage select the wipe chains into a score offer
                    if phase == GamePhase::StageSelect {
                        self.pending = Some(ConfirmRequest::ResetScore);
                    }
                }
            }
            Some(ConfirmRequest::ResetScore) => {
                if accepted {
                    self.reset_score = true;
                }
            }
            None => {}
        }
    }

    /// Drain the intents gathered since the last tick. Held movement flags
    /// survive; one-shots are cleared.
    pub fn take(&mut self) -> TickInput {
        let input = TickInput {
            move_left: self.left_held,
            move_right: self.right_held,
            confirm: self.confirm,
            cancel: self.cancel,
            select: self.select,
            reset_progress: self.reset_progress,
            reset_score: self.reset_score,
        };
        self.confirm = false;
        self.cancel = false;
        self.select = None;
        self.reset_progress = false;
        self.reset_score = false;
        input
    }
}
