//! Blox - a handheld brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic gameplay (level grid, balls, power-ups, bat, tick)
//! - `app`: Screen state machine (splash, game, death, hiscore, menu overlay)
//! - `ui`: Non-gameplay screens
//! - `renderer`: Draw-call contract and scene drawing
//! - `platform`: Input model
//! - `persistence`: Save slot storage
//! - `audio`: Sound and haptic output gated by user settings

pub mod app;
pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use app::App;
pub use highscores::HighScores;
pub use settings::OutputSettings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal update interval (ms)
    pub const TICK_MS: u32 = 10;
    /// Transitions resolved within one update before giving up
    pub const MAX_TRANSITIONS_PER_TICK: usize = 4;

    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 320.0;
    pub const SCREEN_HEIGHT: f32 = 240.0;

    /// Board geometry
    pub const BOARD_WIDTH: usize = 10;
    pub const BOARD_HEIGHT: usize = 15;
    pub const TILE_WIDTH: f32 = 32.0;
    pub const TILE_HEIGHT: f32 = 16.0;
    /// Gap between the top of the screen and the first tile row
    pub const BOARD_MARGIN: f32 = 10.0;
    /// Number of authored stages; level numbers wrap over these
    pub const LEVEL_COUNT: u32 = 5;

    /// Tile values
    pub const TILE_EMPTY: u8 = 0;
    pub const TILE_INDESTRUCTIBLE: u8 = 8;

    /// Scoring
    pub const BRICK_POINTS: u32 = 10;
    pub const WALL_POINTS: u32 = 1;
    pub const POWERUP_POINTS: u32 = 15;
    pub const STARTING_LIVES: u8 = 3;

    /// Bat geometry - top edge sits 10px above the bottom of the screen
    pub const BAT_TOP: f32 = SCREEN_HEIGHT - 10.0;
    pub const BAT_THICKNESS: f32 = 8.0;
    pub const BAT_WIDTH_NORMAL: f32 = 24.0;
    pub const BAT_WIDTH_NARROW: f32 = 16.0;
    pub const BAT_WIDTH_WIDE: f32 = 32.0;
    pub const BAT_WIDTH_STICKY: f32 = 24.0;

    /// Bat speed (pixels per tick) and power-up modifiers
    pub const BAT_BASE_SPEED: f32 = 1.0;
    pub const BAT_SPEED_UP: f32 = 0.8;
    pub const BAT_SLOW_DOWN: f32 = 0.6;
    pub const BAT_MIN_SPEED: f32 = 0.5;

    /// Analog stick: beyond this deflection the bat moves at full speed
    pub const STICK_FULL_SPEED: f32 = 0.66;
    /// Analog stick gain inside the graduated zone
    pub const STICK_GAIN: f32 = 1.5;

    /// Ball sizes (pixels)
    pub const BALL_SIZE_NORMAL: f32 = 8.0;
    pub const BALL_SIZE_SMALL: f32 = 6.0;
    pub const BALL_SIZE_LARGE: f32 = 12.0;
    /// Launch speed on the first level cycle (pixels per tick)
    pub const BALL_BASE_SPEED: f32 = 1.5;
    /// Launch speed gained every time the level set wraps around
    pub const BALL_SPEED_STEP: f32 = 0.25;
    /// Bat bounces never leave more than this far from vertical (radians)
    pub const BALL_MAX_BAT_ANGLE: f32 = 1.3;
    /// Trajectories flatter than this (radians from horizontal) get corrected
    pub const FLAT_ANGLE_LIMIT: f32 = 0.5;
    /// Rotation applied toward vertical when a trajectory is too flat
    pub const FLAT_ANGLE_CORRECTION: f32 = 0.25;
    /// Multi-ball clones leave within this angle of vertical (radians)
    pub const MULTIBALL_SPREAD: f32 = 1.0;

    /// Power-up geometry and fall speed (pixels per tick)
    pub const POWERUP_WIDTH: f32 = 16.0;
    pub const POWERUP_HEIGHT: f32 = 8.0;
    pub const POWERUP_FALL_SPEED: f32 = 0.75;
    /// Spawn when `random(0..POWERUP_SPAWN_ROLL) <= level / POWERUP_SPAWN_DIVISOR`
    pub const POWERUP_SPAWN_ROLL: u32 = 10;
    pub const POWERUP_SPAWN_DIVISOR: u32 = 3;

    /// Transient message fade (ms)
    pub const SPLASH_FADE_MS: u32 = 1750;
    /// Prompt pen pulse period (ms)
    pub const PEN_PULSE_MS: u32 = 500;

    /// Bounce tones (Hz)
    pub const FREQ_BOUNDS: u16 = 440;
    pub const FREQ_BRICK: u16 = 880;
    /// Haptic pulse for every bounce
    pub const HAPTIC_BOUNCE_STRENGTH: f32 = 0.25;
    pub const HAPTIC_BOUNCE_MS: u32 = 50;
    /// Haptic tick for menu navigation
    pub const HAPTIC_MENU_STRENGTH: f32 = 0.2;
    pub const HAPTIC_MENU_MS: u32 = 80;

    /// High score initials length
    pub const INITIALS_LEN: usize = 3;
}

/// Velocity of magnitude `speed`, leaning `angle` radians from straight up.
///
/// Screen space has y pointing down; a positive angle leans right.
#[inline]
pub fn velocity_from_vertical(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(speed * angle.sin(), -speed * angle.cos())
}

/// Angle of a velocity measured from straight up (positive leans right)
#[inline]
pub fn angle_from_vertical(vel: Vec2) -> f32 {
    vel.x.atan2(-vel.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_vertical_angle_round_trip() {
        let vel = velocity_from_vertical(FRAC_PI_4, 2.0);
        assert!(vel.x > 0.0 && vel.y < 0.0);
        assert!((vel.length() - 2.0).abs() < 1e-5);
        assert!((angle_from_vertical(vel) - FRAC_PI_4).abs() < 1e-5);
    }

    #[test]
    fn test_straight_up_is_zero() {
        assert!(angle_from_vertical(Vec2::new(0.0, -1.0)).abs() < 1e-6);
    }
}
