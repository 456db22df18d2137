//! Collision detection and response
//!
//! One [`step`] call advances the ball a single tick through a fixed
//! resolution order: brick hit, stage-clear check, wall reflection, then
//! the bottom line where the paddle either saves the ball or loses it.

use glam::Vec2;

use super::field::BrickField;
use super::state::{Ball, Paddle};
use crate::consts::*;

/// Outcome of one physics tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// Nothing notable; ball moved
    Continue,
    /// A brick was destroyed this tick
    BrickBroken { points: u64 },
    /// The last brick was destroyed; movement skipped
    StageCleared,
    /// Ball passed the paddle line; movement skipped
    BallLost,
}

/// Advance the ball by one tick against the field, walls and paddle.
///
/// At most one brick is destroyed per tick: the first alive brick whose
/// rectangle strictly contains the ball center. Bounces invert the matching
/// velocity axis; positions only change in the final movement step, which is
/// skipped when the tick ends the stage or loses the ball.
pub fn step(ball: &mut Ball, paddle: &Paddle, field: &mut BrickField) -> TickResult {
    let mut broke = false;
    if let Some((col, row)) = field.brick_at(ball.pos) {
        ball.vel.y = -ball.vel.y;
        field.mark_destroyed(col, row);
        broke = true;
    }

    if field.all_cleared() {
        return TickResult::StageCleared;
    }

    let projected = ball.pos + ball.vel;

    // Side walls reflect on the projected position
    if projected.x > CANVAS_WIDTH - ball.radius || projected.x < ball.radius {
        ball.vel.x = -ball.vel.x;
    }

    if projected.y < ball.radius {
        // Top wall
        ball.vel.y = -ball.vel.y;
    } else if projected.y > CANVAS_HEIGHT - ball.radius {
        // Crossing the bottom line: the paddle span decides save or loss,
        // judged on the ball's current x
        if paddle.spans(ball.pos.x) {
            ball.vel.y = -ball.vel.y;
        } else {
            return TickResult::BallLost;
        }
    } else if projected.y > CANVAS_HEIGHT - paddle.height - paddle.y_offset - ball.radius
        && projected.y < CANVAS_HEIGHT - paddle.y_offset
        && paddle.spans(ball.pos.x)
    {
        // Top-of-paddle band
        ball.vel.y = -ball.vel.y;
    }

    ball.pos += ball.vel;

    if broke {
        TickResult::BrickBroken {
            points: SCORE_PER_BRICK,
        }
    } else {
        TickResult::Continue
    }
}

/// Shift the paddle by the fixed per-tick step for the held move intents,
/// clamped to the canvas. A simultaneous left+right collapses to right.
pub fn move_paddle(paddle: &mut Paddle, left: bool, right: bool) {
    if right {
        paddle.x = (paddle.x + PADDLE_STEP).min(CANVAS_WIDTH - paddle.width);
    } else if left {
        paddle.x = (paddle.x - PADDLE_STEP).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paddle_at(x: f32, width: f32) -> Paddle {
        Paddle {
            x,
            width,
            height: PADDLE_HEIGHT,
            y_offset: PADDLE_Y_OFFSET,
        }
    }

    fn ball_at(x: f32, y: f32, dx: f32, dy: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(dx, dy),
            radius: BALL_RADIUS,
        }
    }

    /// Field with a single survivor in the top-right corner, far from the
    /// positions the wall/paddle tests use
    fn empty_field() -> BrickField {
        let mut field = BrickField::new(1, 5);
        for col in 0..4 {
            field.mark_destroyed(col, 0);
        }
        field
    }

    #[test]
    fn test_side_wall_reflection() {
        let paddle = paddle_at(450.0, 100.0);
        let mut field = empty_field();

        let mut ball = ball_at(CANVAS_WIDTH - BALL_RADIUS - 1.0, 300.0, 3.0, 1.0);
        assert_eq!(step(&mut ball, &paddle, &mut field), TickResult::Continue);
        assert!(ball.vel.x < 0.0);

        let mut ball = ball_at(BALL_RADIUS + 1.0, 300.0, -3.0, 1.0);
        assert_eq!(step(&mut ball, &paddle, &mut field), TickResult::Continue);
        assert!(ball.vel.x > 0.0);
    }

    #[test]
    fn test_top_wall_reflection() {
        let paddle = paddle_at(450.0, 100.0);
        let mut field = empty_field();
        let mut ball = ball_at(500.0, BALL_RADIUS + 1.0, 0.0, -3.0);
        assert_eq!(step(&mut ball, &paddle, &mut field), TickResult::Continue);
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_bottom_line_paddle_save_vs_loss() {
        // Paddle spanning [400, 500]
        let paddle = paddle_at(400.0, 100.0);
        let mut field = empty_field();
        let y = CANVAS_HEIGHT - BALL_RADIUS - 1.0;

        // Ball over the paddle bounces
        let mut saved = ball_at(450.0, y, 0.0, 3.0);
        assert_eq!(step(&mut saved, &paddle, &mut field), TickResult::Continue);
        assert!(saved.vel.y < 0.0);

        // Ball away from the paddle is lost, and does not move
        let mut lost = ball_at(300.0, y, 0.0, 3.0);
        let before = lost.pos;
        assert_eq!(step(&mut lost, &paddle, &mut field), TickResult::BallLost);
        assert_eq!(lost.pos, before);
    }

    #[test]
    fn test_paddle_band_bounce() {
        let paddle = paddle_at(400.0, 100.0);
        let mut field = empty_field();
        // Just above the paddle's top face, moving down into the band
        let y = CANVAS_HEIGHT - PADDLE_HEIGHT - PADDLE_Y_OFFSET - BALL_RADIUS - 1.0;
        let mut ball = ball_at(450.0, y, 0.0, 3.0);
        assert_eq!(step(&mut ball, &paddle, &mut field), TickResult::Continue);
        assert!(ball.vel.y < 0.0);
    }

    #[test]
    fn test_brick_hit_scores_and_bounces() {
        let paddle = paddle_at(450.0, 100.0);
        let mut field = BrickField::new(1, 5);
        let inside = field.origin(2, 0) + Vec2::new(8.0, 8.0);
        let mut ball = ball_at(inside.x, inside.y, 2.0, -2.0);

        let result = step(&mut ball, &paddle, &mut field);
        assert_eq!(
            result,
            TickResult::BrickBroken {
                points: SCORE_PER_BRICK
            }
        );
        assert!(ball.vel.y > 0.0);
        assert!(!field.is_alive(2, 0));
        assert_eq!(field.alive_count(), 4);
    }

    #[test]
    fn test_destroyed_brick_never_retriggers() {
        let paddle = paddle_at(450.0, 100.0);
        let mut field = BrickField::new(1, 2);
        let inside = field.origin(0, 0) + Vec2::new(8.0, 8.0);

        let mut ball = ball_at(inside.x, inside.y, 0.0, 0.0);
        assert!(matches!(
            step(&mut ball, &paddle, &mut field),
            TickResult::BrickBroken { .. }
        ));
        // Same spot, brick is gone: nothing happens
        let mut ball = ball_at(inside.x, inside.y, 0.0, 0.0);
        assert_eq!(step(&mut ball, &paddle, &mut field), TickResult::Continue);
    }

    #[test]
    fn test_last_brick_emits_stage_cleared_and_freezes_ball() {
        let paddle = paddle_at(450.0, 100.0);
        let mut field = BrickField::new(1, 1);
        let inside = field.origin(0, 0) + Vec2::new(8.0, 8.0);
        let mut ball = ball_at(inside.x, inside.y, 2.0, -2.0);
        let before = ball.pos;

        assert_eq!(
            step(&mut ball, &paddle, &mut field),
            TickResult::StageCleared
        );
        assert!(field.all_cleared());
        assert_eq!(ball.pos, before);
    }

    #[test]
    fn test_single_brick_per_tick() {
        let paddle = paddle_at(450.0, 100.0);
        let mut field = BrickField::new(2, 5);
        let inside = field.origin(1, 0) + Vec2::new(8.0, 8.0);
        let mut ball = ball_at(inside.x, inside.y, 0.0, 2.0);
        step(&mut ball, &paddle, &mut field);
        assert_eq!(field.alive_count(), 9);
    }

    #[test]
    fn test_move_paddle_clamps() {
        let mut paddle = paddle_at(2.0, 100.0);
        move_paddle(&mut paddle, true, false);
        assert_eq!(paddle.x, 0.0);

        let mut paddle = paddle_at(CANVAS_WIDTH - 100.0 - 2.0, 100.0);
        move_paddle(&mut paddle, false, true);
        assert_eq!(paddle.x, CANVAS_WIDTH - 100.0);

        // No intent, no movement
        let mut paddle = paddle_at(300.0, 100.0);
        move_paddle(&mut paddle, false, false);
        assert_eq!(paddle.x, 300.0);
    }
}
