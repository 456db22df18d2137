//! The brick grid
//!
//! Brick pixel positions are never stored; they are derived on demand from
//! grid coordinates so the layout stays consistent with the active stage's
//! column count.

use glam::Vec2;

use crate::consts::*;

/// Read-only view of a single brick, for collision checks and rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickView {
    pub col: u32,
    pub row: u32,
    /// Top-left corner in playfield coordinates
    pub origin: Vec2,
    pub alive: bool,
}

/// A rows x columns grid of destructible bricks
#[derive(Debug, Clone, PartialEq)]
pub struct BrickField {
    rows: u32,
    columns: u32,
    brick_width: f32,
    /// Aliveness flags, row-major
    alive: Vec<bool>,
}

/// Brick width that fits `columns` bricks plus padding inside the playfield
pub fn brick_width_for(columns: u32) -> f32 {
    let available = CANVAS_WIDTH - BRICK_SIDE_MARGIN;
    let total_padding = BRICK_PADDING * (columns - 1) as f32;
    ((available - total_padding) / columns as f32).floor()
}

impl BrickField {
    /// Allocate an all-alive grid sized for the given stage dimensions
    pub fn new(rows: u32, columns: u32) -> Self {
        Self {
            rows,
            columns,
            brick_width: brick_width_for(columns),
            alive: vec![true; (rows * columns) as usize],
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn brick_width(&self) -> f32 {
        self.brick_width
    }

    /// Whether this grid matches the given stage dimensions
    pub fn matches(&self, rows: u32, columns: u32) -> bool {
        self.rows == rows && self.columns == columns
    }

    fn index(&self, col: u32, row: u32) -> usize {
        (row * self.columns + col) as usize
    }

    pub fn is_alive(&self, col: u32, row: u32) -> bool {
        col < self.columns && row < self.rows && self.alive[self.index(col, row)]
    }

    /// Knock out a brick. Destroying an already-dead brick is a no-op.
    pub fn mark_destroyed(&mut self, col: u32, row: u32) {
        if col < self.columns && row < self.rows {
            let idx = self.index(col, row);
            self.alive[idx] = false;
        }
    }

    /// True iff no brick is left alive
    pub fn all_cleared(&self) -> bool {
        self.alive.iter().all(|a| !a)
    }

    pub fn alive_count(&self) -> usize {
        self.alive.iter().filter(|a| **a).count()
    }

    /// Top-left corner of a brick slot in playfield coordinates
    pub fn origin(&self, col: u32, row: u32) -> Vec2 {
        Vec2::new(
            col as f32 * (self.brick_width + BRICK_PADDING) + BRICK_OFFSET_LEFT,
            row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_TOP,
        )
    }

    /// First alive brick whose rectangle strictly contains `point`.
    ///
    /// Scans columns outer, rows inner, so at most one brick is reported per
    /// call even where rectangles could theoretically overlap.
    pub fn brick_at(&self, point: Vec2) -> Option<(u32, u32)> {
        for col in 0..self.columns {
            for row in 0..self.rows {
                if !self.alive[self.index(col, row)] {
                    continue;
                }
                let origin = self.origin(col, row);
                if point.x > origin.x
                    && point.x < origin.x + self.brick_width
                    && point.y > origin.y
                    && point.y < origin.y + BRICK_HEIGHT
                {
                    return Some((col, row));
                }
            }
        }
        None
    }

    /// Iterate all brick slots for rendering
    pub fn bricks(&self) -> impl Iterator<Item = BrickView> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |col| BrickView {
                col,
                row,
                origin: self.origin(col, row),
                alive: self.alive[self.index(col, row)],
            })
        })
    }
}
