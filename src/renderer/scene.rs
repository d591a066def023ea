//! Game board drawing
//!
//! Sprite sheet layout (8px cells):
//! - rows 0-1: bricks, 4x2 cells each, one per tile value
//! - row 2: bat pieces (left cap, middle, right cap, then the sticky bat)
//! - row 3: balls (normal, small, large)
//! - row 4: power-ups, 2x1 cells each

use glam::IVec2;

use super::{Font, Pen, Renderer, SpriteRect, TextAlign};
use crate::consts::*;
use crate::sim::{Ball, BallSize, BatMode, GameState, Paddle, PowerUp, PowerUpKind};

pub const SPRITE_ROW_BRICK: i32 = 0;
pub const SPRITE_ROW_BAT: i32 = 2;
pub const SPRITE_ROW_BALL: i32 = 3;
pub const SPRITE_ROW_POWERUP: i32 = 4;

const SCREEN_W: i32 = SCREEN_WIDTH as i32;
const SCREEN_H: i32 = SCREEN_HEIGHT as i32;

/// Full-screen vertical gradient, one span per line
pub fn backdrop(r: &mut dyn Renderer, pen_for_line: impl Fn(i32) -> Pen) {
    for y in 0..SCREEN_H {
        r.set_pen(pen_for_line(y));
        r.h_span(IVec2::new(0, y), SCREEN_W);
    }
}

/// Dark blue fade used behind the board
fn board_pen(y: i32) -> Pen {
    Pen::rgb(10, 10, ((SCREEN_H - y) / 2) as u8)
}

fn brick_sprite(value: u8) -> SpriteRect {
    SpriteRect::new((i32::from(value) - 1) * 4, SPRITE_ROW_BRICK, 4, 2)
}

fn ball_sprite(size: BallSize) -> SpriteRect {
    let col = match size {
        BallSize::Normal => 0,
        BallSize::Small => 1,
        BallSize::Large => 2,
    };
    // The large ball spills into a second cell
    let cells = if size == BallSize::Large { 2 } else { 1 };
    SpriteRect::new(col, SPRITE_ROW_BALL, cells, cells)
}

fn powerup_sprite(kind: PowerUpKind) -> SpriteRect {
    let index = PowerUpKind::ALL.iter().position(|&k| k == kind).unwrap_or(0) as i32;
    SpriteRect::new(index * 2, SPRITE_ROW_POWERUP, 2, 1)
}

fn draw_bat(r: &mut dyn Renderer, paddle: &Paddle) {
    let left = (paddle.x - paddle.width() / 2.0) as i32;
    let top = BAT_TOP as i32;
    match paddle.mode {
        BatMode::Normal => r.sprite(SpriteRect::new(0, SPRITE_ROW_BAT, 3, 1), IVec2::new(left, top)),
        BatMode::Narrow => {
            r.sprite(SpriteRect::new(0, SPRITE_ROW_BAT, 1, 1), IVec2::new(left, top));
            r.sprite(SpriteRect::new(2, SPRITE_ROW_BAT, 1, 1), IVec2::new(left + 8, top));
        }
        BatMode::Wide => {
            r.sprite(SpriteRect::new(0, SPRITE_ROW_BAT, 2, 1), IVec2::new(left, top));
            r.sprite(SpriteRect::new(1, SPRITE_ROW_BAT, 2, 1), IVec2::new(left + 16, top));
        }
        BatMode::Sticky => r.sprite(SpriteRect::new(3, SPRITE_ROW_BAT, 3, 1), IVec2::new(left, top)),
    }
}

fn draw_ball(r: &mut dyn Renderer, ball: &Ball) {
    let sprite = ball_sprite(ball.size);
    let size = sprite.pixel_size();
    let at = IVec2::new(ball.pos.x as i32, ball.pos.y as i32) - size / 2;
    r.sprite(sprite, at);
}

fn draw_powerup(r: &mut dyn Renderer, powerup: &PowerUp) {
    let corner = powerup.bounds().tl();
    r.sprite(powerup_sprite(powerup.kind), IVec2::new(corner.x as i32, corner.y as i32));
}

/// Draw the running game: HUD, bricks, bat, power-ups, balls and messages.
///
/// `prompt` is the pulsing pen for the launch hint and transient message.
pub fn draw_game(r: &mut dyn Renderer, state: &GameState, now_ms: u32, prompt: Pen) {
    r.clear();
    backdrop(r, board_pen);

    // HUD
    r.set_pen(Pen::WHITE);
    r.text(
        &format!("SCORE: {:05}", state.score),
        Font::Number,
        IVec2::new(1, 1),
        TextAlign::TopLeft,
    );
    r.text(
        &format!("HISCORE: {:05}", state.best_score()),
        Font::Number,
        IVec2::new(SCREEN_W - 1, 1),
        TextAlign::TopRight,
    );
    r.sprite(SpriteRect::new(0, SPRITE_ROW_BAT, 1, 1), IVec2::new(SCREEN_W / 2 - 24, 1));
    r.sprite(SpriteRect::new(2, SPRITE_ROW_BAT, 1, 1), IVec2::new(SCREEN_W / 2 - 16, 1));
    r.text(
        &format!("x{}", state.lives),
        Font::Number,
        IVec2::new(SCREEN_W / 2 - 4, 1),
        TextAlign::TopLeft,
    );

    for (row, col, value) in state.level.tiles() {
        let rect = state.level.tile_rect(row, col);
        r.sprite(brick_sprite(value), IVec2::new(rect.x as i32, rect.y as i32));
    }

    draw_bat(r, &state.paddle);

    // Power-ups go behind the balls
    for powerup in &state.powerups {
        draw_powerup(r, powerup);
    }
    for ball in &state.balls {
        draw_ball(r, ball);
    }

    if state.has_stuck_ball() && state.lives > 0 {
        r.set_pen(prompt);
        r.text(
            "PRESS 'B' TO LAUNCH",
            Font::Message,
            IVec2::new(SCREEN_W / 2, SCREEN_H - 45),
            TextAlign::CenterCenter,
        );
    }

    let alpha = state.message_alpha(now_ms);
    if alpha > 0.0 {
        r.set_pen(prompt.with_alpha(alpha as u8));
        r.text(
            &state.message.text(),
            Font::Splash,
            IVec2::new(SCREEN_W / 2, SCREEN_H / 2),
            TextAlign::CenterCenter,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;

    #[test]
    fn test_game_frame_contents() {
        let state = GameState::new(4, 1200, 0);
        let mut frame = DrawList::new();
        draw_game(&mut frame, &state, 100, Pen::YELLOW);
        assert!(frame.contains_text("SCORE: 00000"));
        assert!(frame.contains_text("HISCORE: 01200"));
        assert!(frame.contains_text("x3"));
        assert!(frame.contains_text("PRESS 'B' TO LAUNCH"));
        assert!(frame.contains_text("LEVEL 01"));

        let bricks = frame.sprites().filter(|(s, _)| s.row == SPRITE_ROW_BRICK).count();
        assert_eq!(bricks, state.level.tiles().count());
        let balls = frame.sprites().filter(|(s, _)| s.row == SPRITE_ROW_BALL).count();
        assert_eq!(balls, 1);
    }

    #[test]
    fn test_message_gone_after_fade() {
        let state = GameState::new(4, 0, 0);
        let mut frame = DrawList::new();
        draw_game(&mut frame, &state, SPLASH_FADE_MS + 1, Pen::YELLOW);
        assert!(!frame.contains_text("LEVEL 01"));
    }

    #[test]
    fn test_brick_sprite_columns() {
        assert_eq!(brick_sprite(1).col, 0);
        assert_eq!(brick_sprite(8).col, 28);
        assert_eq!(powerup_sprite(PowerUpKind::MultiBall).col, 10);
    }
}
