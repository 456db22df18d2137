//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and testable:
//! - Fixed per-tick steps only
//! - Seeded RNG only (serve direction)
//! - No rendering or platform dependencies

pub mod field;
pub mod physics;
pub mod state;
pub mod tick;

pub use field::{BrickField, BrickView};
pub use physics::TickResult;
pub use state::{Ball, GamePhase, GameState, Paddle};
pub use tick::{SelectDir, TickInput, tick};
