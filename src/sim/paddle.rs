//! The player's bat

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Bat behaviour; each mode has its own width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BatMode {
    #[default]
    Normal,
    Narrow,
    Wide,
    /// Catches balls instead of bouncing them
    Sticky,
}

impl BatMode {
    pub fn width(self) -> f32 {
        match self {
            BatMode::Normal => BAT_WIDTH_NORMAL,
            BatMode::Narrow => BAT_WIDTH_NARROW,
            BatMode::Wide => BAT_WIDTH_WIDE,
            BatMode::Sticky => BAT_WIDTH_STICKY,
        }
    }
}

/// The player's bat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Horizontal centre (pixels)
    pub x: f32,
    pub mode: BatMode,
    /// Full-deflection movement per tick (pixels)
    pub speed: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: SCREEN_WIDTH / 2.0,
            mode: BatMode::Normal,
            speed: BAT_BASE_SPEED,
        }
    }
}

impl Paddle {
    pub fn width(&self) -> f32 {
        self.mode.width()
    }

    pub fn is_sticky(&self) -> bool {
        self.mode == BatMode::Sticky
    }

    /// Bounding box of the bat
    pub fn rect(&self) -> Rect {
        let width = self.width();
        Rect::new(self.x - width / 2.0, BAT_TOP, width, BAT_THICKNESS)
    }

    /// Move by `movement` pixels, keeping the whole bat on screen.
    ///
    /// Returns the distance actually moved.
    pub fn move_by(&mut self, movement: f32) -> f32 {
        let last = self.x;
        let half = self.width() / 2.0;
        self.x = (self.x + movement).clamp(half, SCREEN_WIDTH - half);
        self.x - last
    }

    /// Movement wanted this tick from the analog stick and d-pad.
    ///
    /// The stick is graduated below [`STICK_FULL_SPEED`] deflection; the
    /// d-pad always moves at full speed and wins over the stick.
    pub fn movement_for(&self, stick_x: f32, left: bool, right: bool) -> f32 {
        let mut movement = if stick_x < -STICK_FULL_SPEED {
            -self.speed
        } else if stick_x > STICK_FULL_SPEED {
            self.speed
        } else {
            self.speed * STICK_GAIN * stick_x
        };
        if left {
            movement = -self.speed;
        }
        if right {
            movement = self.speed;
        }
        movement
    }

    pub fn speed_up(&mut self) {
        self.speed += BAT_SPEED_UP;
    }

    pub fn slow_down(&mut self) {
        self.speed = (self.speed - BAT_SLOW_DOWN).max(BAT_MIN_SPEED);
    }

    /// Widen the bat; a narrow bat only returns to normal
    pub fn grow(&mut self) {
        self.mode = match self.mode {
            BatMode::Narrow => BatMode::Normal,
            _ => BatMode::Wide,
        };
    }

    /// Narrow the bat; a wide bat only returns to normal
    pub fn shrink(&mut self) {
        self.mode = match self.mode {
            BatMode::Wide => BatMode::Normal,
            _ => BatMode::Narrow,
        };
    }

    pub fn make_sticky(&mut self) {
        self.mode = BatMode::Sticky;
    }

    /// Back to default speed and mode (position is kept)
    pub fn reset(&mut self) {
        self.mode = BatMode::Normal;
        self.speed = BAT_BASE_SPEED;
    }
}
