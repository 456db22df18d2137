//! Block Breaker - a stage-based arcade block breaking game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state machine)
//! - `stages`: Data-driven per-stage difficulty settings
//! - `input`: Raw key events to gameplay intents
//! - `progress`: Stage-clear persistence over a key-value store
//! - `render`: Read-only frame snapshot consumed by an external renderer

pub mod input;
pub mod progress;
pub mod render;
pub mod sim;
pub mod stages;

pub use input::InputRouter;
pub use progress::{ProgressRecord, ProgressStore};
pub use render::{Frame, Renderer};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (logical pixels)
    pub const CANVAS_WIDTH: f32 = 1000.0;
    pub const CANVAS_HEIGHT: f32 = 620.0;

    /// Paddle geometry - width varies per stage
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Distance from the bottom edge to the paddle's underside
    pub const PADDLE_Y_OFFSET: f32 = 50.0;
    /// Horizontal paddle travel per tick while a move intent is held
    pub const PADDLE_STEP: f32 = 7.0;

    /// Ball defaults - speed comes from the active stage
    pub const BALL_RADIUS: f32 = 10.0;

    /// Brick layout metrics
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 50.0;
    pub const BRICK_OFFSET_LEFT: f32 = 30.0;
    /// Total horizontal margin reserved around the brick area
    pub const BRICK_SIDE_MARGIN: f32 = 60.0;

    /// Points awarded per destroyed brick
    pub const SCORE_PER_BRICK: u64 = 10;
    /// Lives granted when a stage is started from stage select
    pub const INITIAL_LIVES: u8 = 3;

    /// Stage-select grid width (tiles per row)
    pub const SELECT_TILES_PER_ROW: usize = 5;
}
