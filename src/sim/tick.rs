//! Fixed timestep game tick
//!
//! One call advances a game by a single ~10ms step: bat, launch, ball
//! movement and collisions, power-ups, life loss, game over and level clear,
//! in that order.

use rand::Rng;

use super::ball::Ball;
use super::collision::{Axis, Cell, Rect, leading_edge};
use super::level::Level;
use super::powerup::{PowerUp, PowerUpKind};
use super::state::{GameEvent, GameState, Message};
use crate::audio::{Output, SoundEffect};
use crate::consts::*;
use crate::platform::{Buttons, Input};

/// Balls added by a multi-ball pickup
const MULTIBALL_COUNT: usize = 2;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Analog stick x deflection in [-1, 1]
    pub stick_x: f32,
    /// D-pad left held
    pub left: bool,
    /// D-pad right held
    pub right: bool,
    /// Launch button pressed this frame
    pub launch: bool,
}

impl TickInput {
    pub fn from_input(input: &Input) -> Self {
        Self {
            stick_x: input.stick.x,
            left: input.is_held(Buttons::DPAD_LEFT),
            right: input.is_held(Buttons::DPAD_RIGHT),
            launch: input.was_pressed(Buttons::B),
        }
    }
}

/// Outcome of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    Continue,
    /// Out of lives and the game over message has faded
    GameOver { score: u32 },
}

/// Advance the game by one tick
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u32, output: &mut Output) -> TickResult {
    state.events.clear();

    move_bat(state, input);

    if input.launch && state.lives > 0 {
        // Only the first stuck ball goes, even if several are waiting
        if let Some(ball) = state.balls.iter_mut().find(|b| b.stuck) {
            ball.launch();
            state.events.push(GameEvent::BallLaunched);
        }
    }

    update_balls(state, output);

    let before = state.balls.len();
    state.balls.retain(|b| b.bounds().top() <= SCREEN_HEIGHT);
    for _ in state.balls.len()..before {
        state.events.push(GameEvent::BallLost);
    }

    update_powerups(state, now_ms, output);
    state.powerups.retain(|p| !p.is_off_screen());

    if state.balls.is_empty() {
        lose_life(state, now_ms);
    }

    if state.is_game_over() && state.splash.is_finished(now_ms) {
        log::info!("Game over: score {} on level {}", state.score, state.level.number());
        return TickResult::GameOver { score: state.score };
    }

    if state.level.remaining_breakable_count() == 0 {
        let cleared = state.level.number();
        log::info!("Level {} cleared, score {}", cleared, state.score);
        output.play(SoundEffect::LevelComplete);
        state.load_level(cleared + 1, now_ms);
        state.events.push(GameEvent::LevelCleared { number: cleared });
    }

    TickResult::Continue
}

/// Move the bat from input and drag every ball along with it
fn move_bat(state: &mut GameState, input: &TickInput) {
    let movement = state.paddle.movement_for(input.stick_x, input.left, input.right);
    let delta = state.paddle.move_by(movement);
    follow_bat(state, delta);
}

fn follow_bat(state: &mut GameState, delta: f32) {
    let bat = state.paddle.rect();
    let sticky = state.paddle.is_sticky();
    for ball in &mut state.balls {
        ball.move_bat(bat, delta, sticky);
    }
}

/// Collisions found for one ball this tick, applied once per axis
#[derive(Debug, Default)]
struct Hits {
    vertical: bool,
    horizontal: bool,
    wall: bool,
    brick: bool,
    /// Last brick destroyed; one power-up roll per ball per tick
    destroyed: Option<Cell>,
}

fn update_balls(state: &mut GameState, output: &mut Output) {
    let bat = state.paddle.rect();
    let sticky = state.paddle.is_sticky();

    for ball in &mut state.balls {
        let old = ball.bounds();
        ball.update();
        if ball.stuck {
            continue;
        }
        let new = ball.bounds();
        let mut hits = Hits::default();

        // Screen edges
        if ball.moving_up() && new.top() < 0.0 {
            hits.vertical = true;
            hits.wall = true;
        }
        let past_side = if ball.moving_left() {
            new.left() < 0.0
        } else {
            ball.vel.x > 0.0 && new.right() > SCREEN_WIDTH
        };
        if past_side {
            hits.horizontal = true;
            hits.wall = true;
            state.score += WALL_POINTS;
        }

        // Bricks, vertical travel first
        for axis in [Axis::Vertical, Axis::Horizontal] {
            let Some(edge) = leading_edge(&state.level, &old, &new, ball.vel, axis) else {
                continue;
            };
            for cell in edge.cells() {
                if state.level.tile_at(cell) == TILE_EMPTY {
                    continue;
                }
                match axis {
                    Axis::Vertical => hits.vertical = true,
                    Axis::Horizontal => hits.horizontal = true,
                }
                hits.brick = true;
                let points = state.level.hit_cell(cell);
                if points == 0 {
                    continue;
                }
                state.score += points;
                let remaining = state.level.tile_at(cell);
                state.events.push(GameEvent::TileHit { cell, remaining });
                if remaining == TILE_EMPTY {
                    log::debug!("Brick destroyed at row {} col {}", cell.row, cell.col);
                    state.events.push(GameEvent::BrickDestroyed { cell });
                    hits.destroyed = Some(cell);
                }
            }
        }

        if hits.vertical {
            ball.bounce(Axis::Vertical);
        }
        if hits.horizontal {
            ball.bounce(Axis::Horizontal);
        }
        if let Some(cell) = hits.destroyed {
            let pos = state.level.cell_rect(cell).center();
            if let Some(powerup) = roll_powerup(&mut state.rng, &state.level, pos) {
                state.events.push(GameEvent::PowerUpSpawned { kind: powerup.kind, pos });
                state.powerups.push(powerup);
            }
        }
        if hits.brick {
            output.bounce_feedback(FREQ_BRICK);
        } else if hits.wall {
            output.bounce_feedback(FREQ_BOUNDS);
            state.events.push(GameEvent::WallBounce);
        }

        if over_bat(ball, &bat) && ball.bat_bounce(bat.top(), sticky) {
            output.bounce_feedback(FREQ_BOUNDS);
            state.events.push(if ball.stuck {
                GameEvent::BallCaught
            } else {
                GameEvent::BatBounce
            });
        }
    }
}

/// Horizontal overlap between a ball and the bat
fn over_bat(ball: &Ball, bat: &Rect) -> bool {
    let bounds = ball.bounds();
    bounds.right() > bat.left() && bounds.left() < bat.right()
}

/// Maybe drop a power-up from a destroyed brick; more likely on later levels
fn roll_powerup<R: Rng + ?Sized>(rng: &mut R, level: &Level, pos: glam::Vec2) -> Option<PowerUp> {
    let roll = rng.random_range(0..POWERUP_SPAWN_ROLL);
    if roll > level.number() / POWERUP_SPAWN_DIVISOR {
        return None;
    }
    Some(PowerUp::new(pos, PowerUpKind::random(rng)))
}

fn update_powerups(state: &mut GameState, now_ms: u32, output: &mut Output) {
    let bat = state.paddle.rect();
    let mut collected = Vec::new();

    for powerup in &mut state.powerups {
        powerup.update();
        output.play(SoundEffect::Falling {
            height: powerup.pos.y.max(0.0) as u16,
        });
        if powerup.bounds().intersects(&bat) {
            collected.push(powerup.kind);
            powerup.remove();
        }
    }

    for kind in collected {
        apply_powerup(state, kind, now_ms);
        output.play(SoundEffect::Falling { height: 0 });
        output.play(SoundEffect::Pickup);
    }
}

fn apply_powerup(state: &mut GameState, kind: PowerUpKind, now_ms: u32) {
    log::debug!("Collected {:?}", kind);
    match kind {
        PowerUpKind::SpeedUp => state.paddle.speed_up(),
        PowerUpKind::SlowDown => state.paddle.slow_down(),
        PowerUpKind::Sticky => state.paddle.make_sticky(),
        PowerUpKind::Shrink => state.paddle.shrink(),
        PowerUpKind::Grow => state.paddle.grow(),
        PowerUpKind::MultiBall => {
            state.spawn_multiball(MULTIBALL_COUNT);
        }
    }
    if matches!(kind, PowerUpKind::Shrink | PowerUpKind::Grow | PowerUpKind::Sticky) {
        // A wider bat may now overhang the screen edge
        let delta = state.paddle.move_by(0.0);
        follow_bat(state, delta);
    }
    state.score += POWERUP_POINTS;
    state.show_message(Message::PowerUp(kind), now_ms);
    state.events.push(GameEvent::PowerUpCollected { kind });
}

fn lose_life(state: &mut GameState, now_ms: u32) {
    state.lives = state.lives.saturating_sub(1);
    state.paddle.reset();
    // Back to normal width, which may overhang the edge a narrow bat sat on
    let delta = state.paddle.move_by(0.0);
    follow_bat(state, delta);
    state.spawn_ball_on_bat();
    let message = if state.lives == 0 {
        Message::GameOver
    } else {
        Message::BallLost
    };
    state.show_message(message, now_ms);
    state.events.push(GameEvent::LifeLost { lives: state.lives });
    log::info!("Life lost, {} remaining", state.lives);
}
