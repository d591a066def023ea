//! Platform input model
//!
//! The device reports a held-button bitmask and an analog stick each frame.
//! [`Input::advance`] derives press edges from the previous frame so screens
//! can react to "pressed this frame" without tracking history themselves.

use bitflags::bitflags;
use glam::Vec2;

bitflags! {
    /// Handheld buttons
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Buttons: u16 {
        const DPAD_LEFT = 1 << 0;
        const DPAD_RIGHT = 1 << 1;
        const DPAD_UP = 1 << 2;
        const DPAD_DOWN = 1 << 3;
        const A = 1 << 4;
        const B = 1 << 5;
        const X = 1 << 6;
        const Y = 1 << 7;
        const HOME = 1 << 8;
        const MENU = 1 << 9;
        const JOYSTICK = 1 << 10;

        const DPAD = Self::DPAD_LEFT.bits()
            | Self::DPAD_RIGHT.bits()
            | Self::DPAD_UP.bits()
            | Self::DPAD_DOWN.bits();
    }
}

impl Default for Buttons {
    fn default() -> Self {
        Self::empty()
    }
}

/// One frame of input
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Input {
    /// Buttons currently down
    pub held: Buttons,
    /// Buttons that went down this frame
    pub pressed: Buttons,
    /// Analog stick, each axis in [-1, 1]
    pub stick: Vec2,
}

impl Input {
    /// Input with the given buttons both held and freshly pressed
    pub fn press(buttons: Buttons) -> Self {
        Self {
            held: buttons,
            pressed: buttons,
            stick: Vec2::ZERO,
        }
    }

    /// Input with buttons held down since an earlier frame
    pub fn hold(buttons: Buttons) -> Self {
        Self {
            held: buttons,
            ..Self::default()
        }
    }

    pub fn with_stick(mut self, stick: Vec2) -> Self {
        self.stick = stick.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
        self
    }

    /// Next frame's input from the raw held mask, computing press edges
    pub fn advance(&self, held: Buttons, stick: Vec2) -> Self {
        Self {
            held,
            pressed: held & !self.held,
            stick: stick.clamp(Vec2::splat(-1.0), Vec2::splat(1.0)),
        }
    }

    #[inline]
    pub fn is_held(&self, buttons: Buttons) -> bool {
        self.held.intersects(buttons)
    }

    #[inline]
    pub fn was_pressed(&self, buttons: Buttons) -> bool {
        self.pressed.intersects(buttons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_edges() {
        let first = Input::default().advance(Buttons::A, Vec2::ZERO);
        assert!(first.was_pressed(Buttons::A));
        let second = first.advance(Buttons::A | Buttons::B, Vec2::ZERO);
        assert!(!second.was_pressed(Buttons::A));
        assert!(second.was_pressed(Buttons::B));
        assert!(second.is_held(Buttons::A));
        let third = second.advance(Buttons::empty(), Vec2::ZERO);
        assert!(third.pressed.is_empty());
        assert!(!third.is_held(Buttons::A));
    }

    #[test]
    fn test_stick_is_clamped() {
        let input = Input::default().with_stick(Vec2::new(3.0, -2.0));
        assert_eq!(input.stick, Vec2::new(1.0, -1.0));
        assert!(Input::hold(Buttons::DPAD_LEFT).is_held(Buttons::DPAD));
    }
}
