//! Blox headless runner
//!
//! Drives the full screen state machine with an autopilot at the nominal tick
//! rate and no display, recording each frame into a draw list. Useful for soak
//! testing the simulation and for exercising the save directory.
//!
//! Example:
//!   RUST_LOG=info cargo run -- --ticks 200000 --seed 7 --save-dir saves

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;

use blox::App;
use blox::app::Screen;
use blox::audio::LogSink;
use blox::consts::*;
use blox::persistence::FileStorage;
use blox::platform::{Buttons, Input};
use blox::renderer::DrawList;
use blox::sim::{GameEvent, GameState};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run Blox headlessly with an autopilot", long_about = None)]
struct Args {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 60_000)]
    ticks: u32,
    /// Seed for the game sessions
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// Directory holding the high score and settings slots
    #[arg(long, default_value = "blox-save")]
    save_dir: PathBuf,
    /// Render one frame every this many ticks
    #[arg(long, default_value_t = 2)]
    render_every: u32,
}

#[derive(Debug, Default)]
struct Summary {
    games: u32,
    best_score: u32,
    best_level: u32,
    bricks: u32,
    powerups: u32,
    lives_lost: u32,
}

/// Pick the ball to chase: the lowest one coming down, else any ball
fn target_x(game: &GameState) -> f32 {
    game.balls
        .iter()
        .filter(|b| !b.stuck && b.vel.y > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .or_else(|| game.balls.first())
        .map_or(SCREEN_WIDTH / 2.0, |b| b.pos.x)
}

/// Buttons and stick the autopilot holds this tick.
///
/// Confirm buttons are tapped on alternate ticks so every tap is a fresh
/// press edge.
fn autopilot(app: &App, tick: u32) -> (Buttons, Vec2) {
    let tap = tick % 2 == 0;
    match app.screen() {
        Screen::Splash(_) | Screen::Hiscore(_) if tap => (Buttons::A, Vec2::ZERO),
        Screen::Death(_) if tap => (Buttons::B, Vec2::ZERO),
        Screen::Game(game) => {
            let error = target_x(game) - game.paddle.x;
            let stick = Vec2::new((error / 8.0).clamp(-1.0, 1.0), 0.0);
            let launch = if game.has_stuck_ball() && tap && tick % 200 == 0 {
                Buttons::B
            } else {
                Buttons::empty()
            };
            (launch, stick)
        }
        _ => (Buttons::empty(), Vec2::ZERO),
    }
}

fn record(summary: &mut Summary, app: &App) {
    let Some(game) = app.game() else {
        return;
    };
    summary.best_score = summary.best_score.max(game.score);
    summary.best_level = summary.best_level.max(game.level.number());
    for event in &game.events {
        match event {
            GameEvent::BrickDestroyed { .. } => summary.bricks += 1,
            GameEvent::PowerUpCollected { .. } => summary.powerups += 1,
            GameEvent::LifeLost { .. } => summary.lives_lost += 1,
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let storage = FileStorage::new(&args.save_dir)
        .with_context(|| format!("open save directory {:?}", args.save_dir))?;
    log::info!("Saving to {}", storage.root().display());

    let mut app = App::new(Box::new(storage), Box::new(LogSink::default()), args.seed);
    let mut frame = DrawList::new();
    let mut input = Input::default();
    let mut summary = Summary::default();
    let mut in_game = false;

    for tick in 0..args.ticks {
        let now = tick * TICK_MS;
        let (held, stick) = autopilot(&app, tick);
        input = input.advance(held, stick);
        app.update(now, &input);

        let playing = app.game().is_some();
        if playing && !in_game {
            summary.games += 1;
        }
        in_game = playing;
        record(&mut summary, &app);

        if args.render_every > 0 && tick % args.render_every == 0 {
            app.render(now, &mut frame);
        }
    }

    log::info!(
        "{} ticks: {} games, best score {}, best level {}, {} bricks, {} power-ups, {} lives lost, last frame {} draw calls",
        args.ticks,
        summary.games,
        summary.best_score,
        summary.best_level,
        summary.bricks,
        summary.powerups,
        summary.lives_lost,
        frame.len()
    );
    println!("{:#?}", summary);
    Ok(())
}
