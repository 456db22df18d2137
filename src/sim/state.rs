//! Game state and core simulation types
//!
//! The whole session lives in one owned [`GameState`] threaded through the
//! tick function; nothing gameplay-related hides in globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::field::BrickField;
use crate::consts::*;
use crate::stages;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Stage-select grid, the initial phase
    StageSelect,
    /// In a stage; paused until `started` is set
    Playing,
    /// Ball dropped with lives remaining, waiting for acknowledgment
    LifeLost,
    /// Every brick destroyed, waiting to advance
    StageClear,
    /// Out of lives
    GameOver,
    /// Final stage cleared
    GameComplete,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Serve position: centered, just above the paddle line
    pub fn serve_position() -> Vec2 {
        Vec2::new(
            CANVAS_WIDTH / 2.0,
            CANVAS_HEIGHT - PADDLE_Y_OFFSET - BALL_RADIUS - 10.0,
        )
    }

    fn at_serve() -> Self {
        Self {
            pos: Self::serve_position(),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    /// Left edge, clamped to [0, canvas width - width]
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Distance from the bottom edge to the paddle's underside
    pub y_offset: f32,
}

impl Paddle {
    /// A paddle of the given width, horizontally centered
    pub fn centered(width: f32) -> Self {
        Self {
            x: (CANVAS_WIDTH - width) / 2.0,
            width,
            height: PADDLE_HEIGHT,
            y_offset: PADDLE_Y_OFFSET,
        }
    }

    /// Whether an x coordinate lies strictly within the paddle's span
    pub fn spans(&self, x: f32) -> bool {
        x > self.x && x < self.x + self.width
    }
}

/// Complete session state owned by the state machine
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the session RNG was created from
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Active stage number (1-based)
    pub stage: u32,
    /// Highlighted tile on the stage-select grid (0-based)
    pub selected_index: usize,
    /// Remaining lives
    pub lives: u8,
    /// Score, carried across stages
    pub score: u64,
    /// False while the stage is paused waiting for a confirm
    pub started: bool,
    pub ball: Ball,
    pub paddle: Paddle,
    pub field: BrickField,
    /// Serve-direction RNG (the only source of nondeterminism per seed)
    pub rng: Pcg32,
}

impl GameState {
    /// Create a fresh session in stage select
    pub fn new(seed: u64) -> Self {
        let defaults = &stages::DEFAULT_STAGE;
        Self {
            seed,
            phase: GamePhase::StageSelect,
            stage: 1,
            selected_index: 0,
            lives: INITIAL_LIVES,
            score: 0,
            started: false,
            ball: Ball::at_serve(),
            paddle: Paddle::centered(defaults.paddle_width),
            field: BrickField::new(defaults.rows, defaults.columns),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Serve velocity for the active stage: horizontal sign randomized,
    /// vertical always upward.
    pub fn serve_velocity(&mut self) -> Vec2 {
        let speed = stages::stage(self.stage).ball_speed;
        let dx = if self.rng.random::<bool>() { speed } else { -speed };
        Vec2::new(dx, -speed)
    }

    /// Put ball and paddle back to their serve placements and roll a new
    /// serve velocity. Used on life loss and stage (re)starts.
    pub fn reset_ball_and_paddle(&mut self) {
        let width = stages::stage(self.stage).paddle_width;
        self.paddle = Paddle::centered(width);
        self.ball = Ball::at_serve();
        self.ball.vel = self.serve_velocity();
    }

    /// Apply a stage's settings as one atomic update: stage number, brick
    /// field, paddle width, ball placement and velocity. Lives and score are
    /// left untouched; the game enters Playing paused.
    pub fn load_stage(&mut self, n: u32) {
        let cfg = stages::stage(n);
        self.stage = n;
        self.field = BrickField::new(cfg.rows, cfg.columns);
        self.reset_ball_and_paddle();
        self.phase = GamePhase::Playing;
        self.started = false;
        log::info!(
            "stage {} loaded: {}x{} bricks, paddle {}px",
            n,
            cfg.rows,
            cfg.columns,
            cfg.paddle_width
        );
    }

    /// Start a stage from stage select: full reset of lives on top of
    /// [`load_stage`](Self::load_stage).
    pub fn start_stage(&mut self, n: u32) {
        self.lives = INITIAL_LIVES;
        self.load_stage(n);
    }

    /// Repair the brick grid if it has fallen out of sync with the active
    /// stage's dimensions. This cannot happen with correct transitions;
    /// debug builds assert, release builds rebuild the field.
    pub fn ensure_field_dimensions(&mut self) {
        let cfg = stages::stage(self.stage);
        if !self.field.matches(cfg.rows, cfg.columns) {
            debug_assert!(
                false,
                "brick field {}x{} out of sync with stage {} ({}x{})",
                self.field.rows(),
                self.field.columns(),
                self.stage,
                cfg.rows,
                cfg.columns
            );
            log::error!(
                "brick field {}x{} out of sync with stage {}, rebuilding",
                self.field.rows(),
                self.field.columns(),
                self.stage
            );
            self.field = BrickField::new(cfg.rows, cfg.columns);
        }
    }
}
