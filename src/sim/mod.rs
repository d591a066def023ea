//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of balls and power-ups)
//! - No rendering or platform dependencies beyond the output manager

pub mod ball;
pub mod collision;
pub mod level;
pub mod level_data;
pub mod paddle;
pub mod powerup;
pub mod state;
pub mod tick;
pub mod tween;

pub use ball::{Ball, BallSize};
pub use collision::{Axis, Cell, LeadingEdge, Rect, leading_edge};
pub use level::Level;
pub use paddle::{BatMode, Paddle};
pub use powerup::{PowerUp, PowerUpKind};
pub use state::{GameEvent, GameState, Message};
pub use tick::{TickInput, TickResult, tick};
pub use tween::{Easing, Tween};
