//! Renderer contract
//!
//! The core never draws. Once per frame the host assembles a [`Frame`] -
//! a read-only snapshot borrowing the session - and hands it to whatever
//! [`Renderer`] it installed. Nothing the renderer does can affect the
//! simulation.

use crate::input::ConfirmRequest;
use crate::sim::{Ball, BrickField, GamePhase, GameState, Paddle};
use crate::stages::{self, Stage};

/// Read-only display data for one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Active stage number (1-based)
    pub stage: u32,
    /// Settings of the active stage (colors, dimensions)
    pub stage_config: &'static Stage,
    /// Highlighted tile on the stage-select grid
    pub selected_index: usize,
    /// False while a running stage waits for the start/resume confirm
    pub started: bool,
    pub ball: &'a Ball,
    pub paddle: &'a Paddle,
    pub field: &'a BrickField,
    /// Cleared flag per stage, for the select grid
    pub cleared_stages: &'a [bool],
    /// Confirmation question awaiting a y/n, if any
    pub confirmation: Option<ConfirmRequest>,
}

impl<'a> Frame<'a> {
    /// Snapshot the session for display
    pub fn new(
        state: &'a GameState,
        cleared_stages: &'a [bool],
        confirmation: Option<ConfirmRequest>,
    ) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            lives: state.lives,
            stage: state.stage,
            stage_config: stages::stage(state.stage),
            selected_index: state.selected_index,
            started: state.started,
            ball: &state.ball,
            paddle: &state.paddle,
            field: &state.field,
            cleared_stages,
            confirmation,
        }
    }

    /// Number of stages cleared at least once
    pub fn cleared_count(&self) -> usize {
        self.cleared_stages.iter().filter(|c| **c).count()
    }
}

/// Implemented by the external display layer
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    #[test]
    fn test_frame_snapshots_session() {
        let mut state = GameState::new(5);
        state.start_stage(3);
        state.score = 40;
        let cleared = vec![true, false, false];

        let frame = Frame::new(&state, &cleared, None);
        assert_eq!(frame.phase, GamePhase::Playing);
        assert_eq!(frame.stage, 3);
        assert_eq!(frame.score, 40);
        assert_eq!(frame.stage_config.rows, 3);
        assert_eq!(frame.cleared_count(), 1);
        assert_eq!(
            frame.field.alive_count(),
            (frame.stage_config.rows * frame.stage_config.columns) as usize
        );
    }

    #[test]
    fn test_renderer_reads_without_touching_state() {
        struct Counting(usize);
        impl Renderer for Counting {
            fn render(&mut self, frame: &Frame<'_>) {
                self.0 += frame.field.bricks().count();
            }
        }

        let state = GameState::new(5);
        let cleared = [false; 15];
        let mut renderer = Counting(0);
        renderer.render(&Frame::new(&state, &cleared, None));
        assert!(renderer.0 > 0);
    }
}
