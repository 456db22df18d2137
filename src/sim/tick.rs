//! Per-tick state machine
//!
//! One [`tick`] consumes the intents gathered since the previous frame and
//! advances the session: stage-select navigation, the physics step while a
//! stage is running, and the transitions between the overlay phases.
//! Stage-clear and game-complete transitions write through the progress
//! store before the phase changes hands.

use super::physics::{self, TickResult};
use super::state::{GamePhase, GameState};
use crate::consts::*;
use crate::progress::{KeyValueStore, ProgressStore};
use crate::stages::MAX_STAGE;

/// Direction on the stage-select grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectDir {
    Left,
    Right,
    Up,
    Down,
}

/// Intents for a single tick, produced by the input router
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held paddle movement
    pub move_left: bool,
    pub move_right: bool,
    /// Confirm (start/resume/advance), one-shot
    pub confirm: bool,
    /// Cancel (back to stage select), one-shot
    pub cancel: bool,
    /// Stage-select navigation, one-shot, latest press wins
    pub select: Option<SelectDir>,
    /// Wipe stage progress; only emitted after the user confirmed
    pub reset_progress: bool,
    /// Zero the score; only emitted after the user confirmed
    pub reset_score: bool,
}

/// Move the highlighted tile on the 5-per-row stage-select grid, staying
/// within the row/column bounds.
fn move_selection(index: usize, dir: SelectDir) -> usize {
    let per_row = SELECT_TILES_PER_ROW;
    let max = MAX_STAGE as usize;
    let row = index / per_row;
    let col = index % per_row;
    match dir {
        SelectDir::Right if col < per_row - 1 && index < max - 1 => index + 1,
        SelectDir::Left if col > 0 => index - 1,
        SelectDir::Down if row < max.div_ceil(per_row) - 1 && index + per_row < max => {
            index + per_row
        }
        SelectDir::Up if row > 0 => index - per_row,
        _ => index,
    }
}

/// Advance the session by one tick
pub fn tick<S: KeyValueStore>(
    state: &mut GameState,
    input: &TickInput,
    progress: &mut ProgressStore<S>,
) {
    // Confirmed resets apply regardless of phase; the router only raises
    // them where they are offered.
    if input.reset_progress {
        progress.reset();
        progress.save();
        log::info!("stage progress wiped");
    }
    if input.reset_score {
        state.score = 0;
        log::info!("score reset");
    }

    match state.phase {
        GamePhase::StageSelect => {
            if let Some(dir) = input.select {
                state.selected_index = move_selection(state.selected_index, dir);
            }
            if input.confirm {
                let chosen = state.selected_index as u32 + 1;
                state.start_stage(chosen);
            }
        }

        GamePhase::Playing => {
            state.ensure_field_dimensions();

            if input.confirm {
                state.started = !state.started;
            }
            // Leaving mid-stage is only offered while paused
            if input.cancel && !state.started {
                state.phase = GamePhase::StageSelect;
                return;
            }
            if !state.started {
                return;
            }

            match physics::step(&mut state.ball, &state.paddle, &mut state.field) {
                TickResult::Continue => {}
                TickResult::BrickBroken { points } => state.score += points,
                TickResult::StageCleared => {
                    log::info!("stage {} cleared, score {}", state.stage, state.score);
                    state.phase = GamePhase::StageClear;
                    return;
                }
                TickResult::BallLost => {
                    state.lives = state.lives.saturating_sub(1);
                    if state.lives == 0 {
                        log::info!("game over on stage {}, score {}", state.stage, state.score);
                        state.phase = GamePhase::GameOver;
                    } else {
                        state.phase = GamePhase::LifeLost;
                        state.reset_ball_and_paddle();
                    }
                    return;
                }
            }

            physics::move_paddle(&mut state.paddle, input.move_left, input.move_right);
        }

        GamePhase::LifeLost => {
            if input.confirm {
                state.phase = GamePhase::Playing;
                state.started = true;
            } else if input.cancel {
                state.phase = GamePhase::StageSelect;
            }
        }

        GamePhase::StageClear => {
            if input.confirm {
                progress.mark_cleared(state.stage);
                if state.stage < MAX_STAGE {
                    progress.save();
                    let next = state.stage + 1;
                    state.load_stage(next);
                    state.selected_index = (next - 1) as usize;
                } else {
                    // Beating the final stage completes the game
                    progress.mark_all_cleared();
                    progress.save();
                    state.phase = GamePhase::GameComplete;
                }
            } else if input.cancel {
                state.phase = GamePhase::StageSelect;
            }
        }

        GamePhase::GameOver => {
            if input.confirm {
                state.score = 0;
                state.phase = GamePhase::StageSelect;
            } else if input.cancel {
                // Score survives a cancel
                state.phase = GamePhase::StageSelect;
            }
        }

        GamePhase::GameComplete => {
            if input.confirm {
                progress.mark_all_cleared();
                progress.save();
                state.phase = GamePhase::StageSelect;
            } else if input.cancel {
                state.phase = GamePhase::StageSelect;
            }
        }
    }
}
