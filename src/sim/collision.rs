//! Axis-aligned collision geometry
//!
//! Everything that collides in Blox is an axis-aligned rectangle: balls,
//! bricks, power-ups and the bat. Brick hits are found by watching the
//! *leading* edge of a moving box cross a tile line, which keeps the test
//! O(1) per ball per axis and never fires on trailing edges.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::Level;

/// Axis of motion (and of the velocity component a bounce reverses)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Left/right; bouncing negates the x velocity
    Horizontal,
    /// Up/down; bouncing negates the y velocity
    Vertical,
}

/// Screen-space rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given half extents around `center`
    pub fn from_center(center: Vec2, half_w: f32, half_h: f32) -> Self {
        Self::new(center.x - half_w, center.y - half_h, half_w * 2.0, half_h * 2.0)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn tl(&self) -> Vec2 {
        Vec2::new(self.left(), self.top())
    }

    pub fn tr(&self) -> Vec2 {
        Vec2::new(self.right(), self.top())
    }

    pub fn bl(&self) -> Vec2 {
        Vec2::new(self.left(), self.bottom())
    }

    pub fn br(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap test (touching edges do not intersect)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// A tile grid coordinate; may lie outside the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// Cells under the leading edge of a box that just crossed a tile line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadingEdge {
    pub first: Cell,
    /// Second corner, only when it sits in a different cell
    pub second: Option<Cell>,
}

impl LeadingEdge {
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        std::iter::once(self.first).chain(self.second)
    }
}

/// Test whether the leading edge of a box moving with `vel` entered a new
/// tile row (for [`Axis::Vertical`]) or column (for [`Axis::Horizontal`])
/// between `old` and `new`.
///
/// Zero velocity on the axis counts as moving down / right.
pub fn leading_edge(level: &Level, old: &Rect, new: &Rect, vel: Vec2, axis: Axis) -> Option<LeadingEdge> {
    let (old_corner, corner_a, corner_b) = match axis {
        Axis::Vertical if vel.y < 0.0 => (old.tl(), new.tl(), new.tr()),
        Axis::Vertical => (old.bl(), new.bl(), new.br()),
        Axis::Horizontal if vel.x < 0.0 => (old.tl(), new.tl(), new.bl()),
        Axis::Horizontal => (old.tr(), new.tr(), new.br()),
    };

    let old_cell = level.screen_to_cell(old_corner);
    let first = level.screen_to_cell(corner_a);
    let crossed = match axis {
        Axis::Vertical => old_cell.row != first.row,
        Axis::Horizontal => old_cell.col != first.col,
    };
    if !crossed {
        return None;
    }

    let other = level.screen_to_cell(corner_b);
    Some(LeadingEdge {
        first,
        second: (other != first).then_some(other),
    })
}
