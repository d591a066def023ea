//! A single ball
//!
//! Balls are either stuck to the bat (following it, not moving on their own)
//! or free. The ball owns its local bounce and launch rules; the tick decides
//! *when* they apply.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Axis, Rect};
use crate::consts::*;
use crate::{angle_from_vertical, velocity_from_vertical};

/// Ball size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallSize {
    #[default]
    Normal,
    Small,
    Large,
}

impl BallSize {
    pub fn pixels(self) -> f32 {
        match self {
            BallSize::Normal => BALL_SIZE_NORMAL,
            BallSize::Small => BALL_SIZE_SMALL,
            BallSize::Large => BALL_SIZE_LARGE,
        }
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Centre (pixels)
    pub pos: Vec2,
    /// Velocity (pixels per tick)
    pub vel: Vec2,
    /// Launch speed; also the speed of multi-ball clones
    pub speed: f32,
    pub size: BallSize,
    /// Glued to the bat; never integrates velocity
    pub stuck: bool,
    /// Centre before the latest `update`
    last_pos: Vec2,
    /// Bat rectangle seen on the latest `move_bat`
    bat: Rect,
}

impl Ball {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            speed,
            size: BallSize::Normal,
            stuck: false,
            last_pos: pos,
            bat: Rect::default(),
        }
    }

    /// A ball resting on top of the bat, `offset` pixels from its centre
    pub fn stuck_to(bat: Rect, offset: f32, speed: f32, size: BallSize) -> Self {
        let mut ball = Self::new(Vec2::ZERO, speed).with_size(size);
        ball.pos = Vec2::new(bat.center().x + offset, bat.top() - ball.half_extent());
        ball.last_pos = ball.pos;
        ball.stuck = true;
        ball.bat = bat;
        ball
    }

    pub fn with_size(mut self, size: BallSize) -> Self {
        self.size = size;
        self
    }

    /// Distance from the centre to each side of the bounding box
    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.size.pixels() / 2.0 - 1.0
    }

    pub fn bounds(&self) -> Rect {
        let half = self.half_extent();
        Rect::from_center(self.pos, half, half)
    }

    #[inline]
    pub fn moving_up(&self) -> bool {
        self.vel.y < 0.0
    }

    #[inline]
    pub fn moving_left(&self) -> bool {
        self.vel.x < 0.0
    }

    /// Advance one tick along the current velocity
    pub fn update(&mut self) {
        self.last_pos = self.pos;
        if !self.stuck {
            self.pos += self.vel;
        }
    }

    /// Offset from the bat centre as a fraction of the bat half-width
    fn bat_offset_ratio(&self) -> f32 {
        if self.bat.w <= 0.0 {
            return 0.0;
        }
        (self.pos.x - self.bat.center().x) / (self.bat.w / 2.0)
    }

    /// Release a stuck ball upward, leaning by its offset from the bat centre.
    ///
    /// The offset ratio is used directly as the lean in radians. Returns
    /// false if the ball was not stuck.
    pub fn launch(&mut self) -> bool {
        if !self.stuck {
            return false;
        }
        let angle = self.bat_offset_ratio().clamp(-BALL_MAX_BAT_ANGLE, BALL_MAX_BAT_ANGLE);
        self.vel = velocity_from_vertical(angle, self.speed);
        self.stuck = false;
        true
    }

    /// Send a free ball off in a random upward direction at launch speed
    pub fn randomise<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let angle = rng.random_range(-MULTIBALL_SPREAD..=MULTIBALL_SPREAD);
        self.vel = velocity_from_vertical(angle, self.speed);
        self.stuck = false;
    }

    /// Reverse the velocity along `axis`.
    ///
    /// A horizontal bounce that leaves the ball within [`FLAT_ANGLE_LIMIT`]
    /// of horizontal is steered back toward vertical so it cannot rattle
    /// between the side walls forever.
    pub fn bounce(&mut self, axis: Axis) {
        match axis {
            Axis::Vertical => self.vel.y = -self.vel.y,
            Axis::Horizontal => {
                self.vel.x = -self.vel.x;
                self.correct_flat_angle();
            }
        }
    }

    fn correct_flat_angle(&mut self) {
        let speed = self.vel.length();
        if speed <= 0.0 {
            return;
        }
        let flat = self.vel.y.abs().atan2(self.vel.x.abs());
        if flat >= FLAT_ANGLE_LIMIT {
            return;
        }
        let corrected = flat + FLAT_ANGLE_CORRECTION;
        let vertical_sign = if self.vel.y > 0.0 { 1.0 } else { -1.0 };
        self.vel = Vec2::new(
            self.vel.x.signum() * speed * corrected.cos(),
            vertical_sign * speed * corrected.sin(),
        );
    }

    /// React to reaching the bat's top edge at `bat_top`.
    ///
    /// Fires only on the tick the bottom edge crosses the bat line, so a ball
    /// sinking through the bat is not bounced again. A sticky bat catches the
    /// ball; otherwise it bounces up, leaning by its offset from the bat
    /// centre. Returns true if anything happened.
    pub fn bat_bounce(&mut self, bat_top: f32, sticky: bool) -> bool {
        let half = self.half_extent();
        let was_above = self.last_pos.y + half < bat_top;
        let now_at_or_below = self.pos.y + half >= bat_top;
        if self.stuck || !was_above || !now_at_or_below {
            return false;
        }

        if sticky {
            self.catch(bat_top);
            return true;
        }

        self.bounce(Axis::Vertical);
        let angle = (angle_from_vertical(self.vel) + self.bat_offset_ratio())
            .clamp(-BALL_MAX_BAT_ANGLE, BALL_MAX_BAT_ANGLE);
        self.vel = velocity_from_vertical(angle, self.vel.length());
        true
    }

    fn catch(&mut self, bat_top: f32) {
        self.stuck = true;
        self.vel = Vec2::ZERO;
        self.pos.y = bat_top - self.half_extent();
        self.last_pos = self.pos;
    }

    /// Follow the bat.
    ///
    /// Called every tick with the bat's current rectangle and how far it just
    /// moved. Stuck balls move with it (staying on screen); a free ball
    /// touching the top of a sticky bat is caught.
    pub fn move_bat(&mut self, bat: Rect, delta_x: f32, sticky: bool) {
        self.bat = bat;
        if self.stuck {
            let half = self.half_extent();
            self.pos.x = (self.pos.x + delta_x).clamp(half, SCREEN_WIDTH - half);
            return;
        }

        if sticky && self.vel.y >= 0.0 {
            let bounds = self.bounds();
            let over_bat = bounds.left() < bat.right() && bounds.right() > bat.left();
            let on_surface = bounds.bottom() >= bat.top() && bounds.bottom() < bat.bottom();
            if over_bat && on_surface {
                self.catch(bat.top());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn bat_at(x: f32) -> Rect {
        Rect::new(x - 12.0, BAT_TOP, 24.0, BAT_THICKNESS)
    }

    fn free_ball(pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(pos, vel.length());
        ball.vel = vel;
        ball
    }

    #[test]
    fn test_stuck_ball_sits_on_bat() {
        let ball = Ball::stuck_to(bat_at(160.0), 2.0, 1.5, BallSize::Normal);
        assert!(ball.stuck);
        assert_eq!(ball.vel, Vec2::ZERO);
        assert_eq!(ball.bounds().bottom(), BAT_TOP);
        assert_eq!(ball.pos.x, 162.0);
    }

    #[test]
    fn test_large_ball_rests_on_bat() {
        let ball = Ball::stuck_to(bat_at(160.0), 0.0, 1.5, BallSize::Large);
        assert_eq!(ball.half_extent(), BALL_SIZE_LARGE / 2.0 - 1.0);
        assert_eq!(ball.bounds().bottom(), BAT_TOP);
    }

    #[test]
    fn test_stuck_ball_ignores_update() {
        let mut ball = Ball::stuck_to(bat_at(160.0), 0.0, 1.5, BallSize::Normal);
        let before = ball.pos;
        ball.update();
        assert_eq!(ball.pos, before);
    }

    #[test]
    fn test_launch_from_centre_goes_straight_up() {
        let mut ball = Ball::stuck_to(bat_at(160.0), 0.0, 2.0, BallSize::Normal);
        assert!(ball.launch());
        assert!(!ball.stuck);
        assert!(ball.vel.x.abs() < 1e-6);
        assert!((ball.vel.y + 2.0).abs() < 1e-6);
        // A second launch does nothing
        assert!(!ball.launch());
    }

    #[test]
    fn test_launch_leans_by_offset_ratio() {
        // 4px right of a 24px bat's centre: ratio 1/3 radians
        let mut ball = Ball::stuck_to(bat_at(160.0), 4.0, 2.0, BallSize::Normal);
        ball.launch();
        assert!(ball.vel.x > 0.0);
        assert!((angle_from_vertical(ball.vel) - 4.0 / 12.0).abs() < 1e-5);
        assert!((ball.vel.length() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_flat_bounce_is_steered_toward_vertical() {
        let mut ball = free_ball(Vec2::new(100.0, 100.0), Vec2::new(2.0, 0.1));
        ball.bounce(Axis::Horizontal);
        assert!(ball.vel.x < 0.0);
        let flat = ball.vel.y.abs().atan2(ball.vel.x.abs());
        assert!(flat > 0.1_f32.atan2(2.0) + 0.2);
        assert!((ball.vel.length() - Vec2::new(2.0, 0.1).length()).abs() < 1e-5);
    }

    #[test]
    fn test_steep_bounce_is_exact() {
        let mut ball = free_ball(Vec2::new(100.0, 100.0), Vec2::new(1.0, -2.0));
        ball.bounce(Axis::Horizontal);
        assert_eq!(ball.vel, Vec2::new(-1.0, -2.0));
        ball.bounce(Axis::Vertical);
        assert_eq!(ball.vel, Vec2::new(-1.0, 2.0));
    }

    #[test]
    fn test_bat_bounce_fires_once_on_crossing() {
        let half = BALL_SIZE_NORMAL / 2.0 - 1.0;
        let mut ball = free_ball(Vec2::new(160.0, BAT_TOP - half - 1.0), Vec2::new(0.0, 2.0));
        ball.move_bat(bat_at(160.0), 0.0, false);
        ball.update();
        assert!(ball.bat_bounce(BAT_TOP, false));
        assert!(ball.moving_up());

        // Pretend the ball kept sinking; no second bounce while already past the line
        ball.vel = Vec2::new(0.0, 2.0);
        ball.update();
        assert!(!ball.bat_bounce(BAT_TOP, false));
    }

    #[test]
    fn test_bat_bounce_sticky_catches() {
        let half = BALL_SIZE_NORMAL / 2.0 - 1.0;
        let mut ball = free_ball(Vec2::new(160.0, BAT_TOP - half - 1.0), Vec2::new(1.0, 2.0));
        ball.move_bat(bat_at(160.0), 0.0, true);
        ball.update();
        assert!(ball.bat_bounce(BAT_TOP, true));
        assert!(ball.stuck);
        assert_eq!(ball.vel, Vec2::ZERO);
        assert_eq!(ball.bounds().bottom(), BAT_TOP);
    }

    #[test]
    fn test_move_bat_catches_on_sticky_surface() {
        let half = BALL_SIZE_NORMAL / 2.0 - 1.0;
        let mut ball = free_ball(Vec2::new(160.0, BAT_TOP - half + 1.0), Vec2::new(0.0, 1.0));
        ball.move_bat(bat_at(160.0), 0.0, false);
        assert!(!ball.stuck);
        ball.move_bat(bat_at(160.0), 0.0, true);
        assert!(ball.stuck);
    }

    #[test]
    fn test_randomise_keeps_launch_speed_and_goes_up() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let mut ball = Ball::new(Vec2::new(100.0, 100.0), 1.5);
            ball.randomise(&mut rng);
            assert!((ball.vel.length() - 1.5).abs() < 1e-5);
            assert!(ball.moving_up());
        }
    }

    proptest! {
        #[test]
        fn prop_bounce_twice_restores_sign(
            vx in -3.0f32..3.0,
            vy in -3.0f32..3.0,
            horizontal in any::<bool>(),
        ) {
            prop_assume!(vx.abs() > 1e-3 && vy.abs() > 1e-3);
            let axis = if horizontal { Axis::Horizontal } else { Axis::Vertical };
            let mut ball = free_ball(Vec2::new(100.0, 100.0), Vec2::new(vx, vy));
            ball.bounce(axis);
            ball.bounce(axis);
            prop_assert_eq!(ball.vel.x.signum(), vx.signum());
            prop_assert_eq!(ball.vel.y.signum(), vy.signum());
        }

        #[test]
        fn prop_stuck_ball_tracks_bat(
            offset in -4.0f32..4.0,
            start in 12.0f32..308.0,
            delta in -20.0f32..20.0,
        ) {
            let mut ball = Ball::stuck_to(bat_at(start), offset, 1.5, BallSize::Normal);
            let before = ball.bounds();
            ball.update();
            ball.move_bat(bat_at(start), 0.0, false);
            prop_assert_eq!(ball.bounds(), before);

            ball.move_bat(bat_at(start + delta), delta, false);
            let after = ball.bounds();
            let half = ball.half_extent();
            let expected = (before.center().x + delta).clamp(half, SCREEN_WIDTH - half);
            prop_assert!((after.center().x - expected).abs() < 1e-4);
            prop_assert_eq!(after.y, before.y);
            prop_assert!(after.left() >= 0.0 && after.right() <= SCREEN_WIDTH);
        }
    }
}
