//! Game session state
//!
//! Everything a running game needs between ticks lives here, including the
//! seeded RNG, so a session replays identically from the same seed and input.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::collision::Cell;
use super::level::Level;
use super::paddle::Paddle;
use super::powerup::{PowerUp, PowerUpKind};
use super::tween::Tween;
use crate::consts::*;

/// Horizontal offsets (pixels from the bat centre) a fresh ball may rest at
const STUCK_OFFSETS: [f32; 4] = [-4.0, -2.0, 2.0, 4.0];

/// Transient message shown over the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    Level(u32),
    PowerUp(PowerUpKind),
    BallLost,
    GameOver,
}

impl Message {
    pub fn text(&self) -> String {
        match self {
            Message::Level(number) => format!("LEVEL {:02}", number),
            Message::PowerUp(kind) => match kind {
                PowerUpKind::SpeedUp => "SPEED UP",
                PowerUpKind::SlowDown => "SLOW DOWN",
                PowerUpKind::Sticky => "STICKY BAT",
                PowerUpKind::Shrink => "SHRINK BAT",
                PowerUpKind::Grow => "GROW BAT",
                PowerUpKind::MultiBall => "MULTI BALL",
            }
            .to_string(),
            Message::BallLost => "BALL LOST".to_string(),
            Message::GameOver => "GAME OVER".to_string(),
        }
    }
}

/// Things that happened during the latest tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BallLaunched,
    WallBounce,
    BatBounce,
    BallCaught,
    /// A brick took damage (`remaining` hits left)
    TileHit { cell: Cell, remaining: u8 },
    BrickDestroyed { cell: Cell },
    PowerUpSpawned { kind: PowerUpKind, pos: Vec2 },
    PowerUpCollected { kind: PowerUpKind },
    BallLost,
    LifeLost { lives: u8 },
    LevelCleared { number: u32 },
}

/// Complete state of one game (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub level: Level,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub powerups: Vec<PowerUp>,
    pub lives: u8,
    pub score: u32,
    /// Best table score when the game started
    pub hiscore: u32,
    pub message: Message,
    /// Fade of the transient message; also gates game over
    pub splash: Tween,
    /// Events raised by the latest tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New game on level 1
    pub fn new(seed: u64, hiscore: u32, now_ms: u32) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: Level::load(1),
            paddle: Paddle::default(),
            balls: Vec::new(),
            powerups: Vec::new(),
            lives: STARTING_LIVES,
            score: 0,
            hiscore,
            message: Message::Level(1),
            splash: Tween::one_shot(255.0, 0.0, SPLASH_FADE_MS),
            events: Vec::new(),
        };
        state.load_level(1, now_ms);
        state
    }

    /// Switch to level `number`, putting a fresh ball on a centred default bat
    pub fn load_level(&mut self, number: u32, now_ms: u32) {
        self.level = Level::load(number);
        self.paddle = Paddle::default();
        self.balls.clear();
        self.powerups.clear();
        self.spawn_ball_on_bat();
        self.show_message(Message::Level(number), now_ms);
        log::info!(
            "Loaded level {} ({} bricks, ball speed {:.2})",
            number,
            self.level.remaining_breakable_count(),
            self.level.ball_speed()
        );
    }

    pub fn show_message(&mut self, message: Message, now_ms: u32) {
        self.message = message;
        self.splash.start(now_ms);
    }

    /// Message opacity (0-255); 0 once the fade is over
    pub fn message_alpha(&self, now_ms: u32) -> f32 {
        if self.splash.is_running(now_ms) {
            self.splash.value(now_ms)
        } else {
            0.0
        }
    }

    /// Rest a new ball on the bat at a random small offset
    pub fn spawn_ball_on_bat(&mut self) {
        let offset = STUCK_OFFSETS[self.rng.random_range(0..STUCK_OFFSETS.len())];
        let ball = Ball::stuck_to(self.paddle.rect(), offset, self.level.ball_speed(), self.level.ball_size());
        self.balls.push(ball);
    }

    /// Add `count` free balls leaving from an existing ball in random upward
    /// directions. Prefers a ball in flight; with no balls at all nothing
    /// happens. Returns the number added.
    pub fn spawn_multiball(&mut self, count: usize) -> usize {
        let source = self
            .balls
            .iter()
            .find(|b| !b.stuck)
            .or_else(|| self.balls.first())
            .map(|b| b.pos);
        let Some(pos) = source else {
            return 0;
        };
        let speed = self.level.ball_speed();
        let size = self.level.ball_size();
        for _ in 0..count {
            let mut ball = Ball::new(pos, speed).with_size(size);
            ball.randomise(&mut self.rng);
            self.balls.push(ball);
        }
        count
    }

    pub fn has_stuck_ball(&self) -> bool {
        self.balls.iter().any(|b| b.stuck)
    }

    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }

    /// Best score to show on the HUD
    pub fn best_score(&self) -> u32 {
        self.hiscore.max(self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BallSize;

    #[test]
    fn test_new_game() {
        let state = GameState::new(1, 250, 0);
        assert_eq!(state.level.number(), 1);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.balls.len(), 1);
        assert!(state.balls[0].stuck);
        assert_eq!(state.message, Message::Level(1));
        assert_eq!(state.message.text(), "LEVEL 01");
        assert!(state.message_alpha(0) > 254.0);
        assert_eq!(state.message_alpha(SPLASH_FADE_MS), 0.0);
        assert_eq!(state.best_score(), 250);
    }

    #[test]
    fn test_spawn_offset_is_one_of_the_choices() {
        let mut state = GameState::new(9, 0, 0);
        for _ in 0..20 {
            state.spawn_ball_on_bat();
        }
        let centre = state.paddle.x;
        for ball in &state.balls {
            let offset = ball.pos.x - centre;
            assert!(STUCK_OFFSETS.iter().any(|&o| (o - offset).abs() < 1e-4));
        }
    }

    #[test]
    fn test_multiball_from_free_ball() {
        let mut state = GameState::new(3, 0, 0);
        let mut flying = Ball::new(Vec2::new(100.0, 120.0), 1.5);
        flying.vel = Vec2::new(1.0, -1.0);
        state.balls.push(flying);
        assert_eq!(state.spawn_multiball(2), 2);
        assert_eq!(state.balls.len(), 4);
        for ball in &state.balls[2..] {
            assert_eq!(ball.pos, Vec2::new(100.0, 120.0));
            assert!(!ball.stuck);
            assert!((ball.vel.length() - state.level.ball_speed()).abs() < 1e-5);
        }
    }

    #[test]
    fn test_later_cycles_spawn_sized_balls() {
        let mut state = GameState::new(3, 0, 0);
        state.load_level(LEVEL_COUNT + 1, 0);
        assert_eq!(state.balls[0].size, BallSize::Small);
        assert_eq!(state.balls[0].bounds().bottom(), BAT_TOP);
        state.load_level(2 * LEVEL_COUNT + 1, 0);
        state.spawn_multiball(2);
        assert!(state.balls.iter().all(|b| b.size == BallSize::Large));
    }

    #[test]
    fn test_multiball_without_balls_is_noop() {
        let mut state = GameState::new(3, 0, 0);
        state.balls.clear();
        assert_eq!(state.spawn_multiball(2), 0);
        assert!(state.balls.is_empty());
    }

    #[test]
    fn test_same_seed_same_session() {
        let a = GameState::new(77, 0, 0);
        let b = GameState::new(77, 0, 0);
        assert_eq!(a.balls[0].pos, b.balls[0].pos);
    }
}
