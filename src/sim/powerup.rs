//! Falling power-up pills

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    SpeedUp,
    SlowDown,
    Sticky,
    Shrink,
    Grow,
    MultiBall,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::SpeedUp,
        PowerUpKind::SlowDown,
        PowerUpKind::Sticky,
        PowerUpKind::Shrink,
        PowerUpKind::Grow,
        PowerUpKind::MultiBall,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A falling pickup; moves at a constant speed and never collides by itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    /// Centre (pixels)
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, POWERUP_FALL_SPEED),
            kind,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, POWERUP_WIDTH / 2.0, POWERUP_HEIGHT / 2.0)
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    /// Drop below the screen so the off-screen sweep collects it
    pub fn remove(&mut self) {
        self.pos.y = SCREEN_HEIGHT + POWERUP_HEIGHT * 2.0;
    }

    pub fn is_off_screen(&self) -> bool {
        self.bounds().top() > SCREEN_HEIGHT
    }
}
