//! Non-gameplay screens
//!
//! Each screen follows the same shape: constructed on entry, `update` once per
//! tick returning the transition it wants (if any), `render` once per frame.

pub mod death;
pub mod hiscore;
pub mod menu;
pub mod splash;

pub use death::DeathScreen;
pub use hiscore::HiscoreScreen;
pub use menu::MenuScreen;
pub use splash::SplashScreen;

use crate::renderer::Pen;
use crate::sim::Tween;

/// Pen for prompts: yellow, its green channel pulsing with `pulse`
pub fn prompt_pen(pulse: &Tween, now_ms: u32) -> Pen {
    Pen::rgb(255, pulse.value(now_ms).clamp(0.0, 255.0) as u8, 0)
}
