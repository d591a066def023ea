//! Time-based interpolation for fading messages and pulsing pens

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// Eases out and back: `from` -> `to` -> `from` over one period
    Sine,
}

/// Interpolates `from` -> `to` over `duration_ms`, starting when `start` is
/// called. A tween with `repeat: None` loops forever; `Some(n)` stops after
/// `n` periods and then reports finished.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tween {
    easing: Easing,
    from: f32,
    to: f32,
    duration_ms: u32,
    repeat: Option<u32>,
    started_at: Option<u32>,
}

impl Tween {
    pub fn new(easing: Easing, from: f32, to: f32, duration_ms: u32, repeat: Option<u32>) -> Self {
        Self {
            easing,
            from,
            to,
            duration_ms: duration_ms.max(1),
            repeat,
            started_at: None,
        }
    }

    /// Single linear run
    pub fn one_shot(from: f32, to: f32, duration_ms: u32) -> Self {
        Self::new(Easing::Linear, from, to, duration_ms, Some(1))
    }

    /// Endless sine pulse
    pub fn pulse(from: f32, to: f32, period_ms: u32) -> Self {
        Self::new(Easing::Sine, from, to, period_ms, None)
    }

    pub fn start(&mut self, now_ms: u32) {
        self.started_at = Some(now_ms);
    }

    pub fn stop(&mut self) {
        self.started_at = None;
    }

    fn elapsed(&self, now_ms: u32) -> Option<u32> {
        self.started_at.map(|start| now_ms.saturating_sub(start))
    }

    pub fn is_finished(&self, now_ms: u32) -> bool {
        match (self.elapsed(now_ms), self.repeat) {
            (Some(elapsed), Some(times)) => elapsed >= self.duration_ms.saturating_mul(times),
            _ => false,
        }
    }

    pub fn is_running(&self, now_ms: u32) -> bool {
        self.started_at.is_some() && !self.is_finished(now_ms)
    }

    /// Current value; `from` before starting, `to` once finished
    pub fn value(&self, now_ms: u32) -> f32 {
        let Some(elapsed) = self.elapsed(now_ms) else {
            return self.from;
        };
        if self.is_finished(now_ms) {
            return match self.easing {
                Easing::Linear => self.to,
                Easing::Sine => self.from,
            };
        }
        let t = (elapsed % self.duration_ms) as f32 / self.duration_ms as f32;
        let k = match self.easing {
            Easing::Linear => t,
            Easing::Sine => (t * std::f32::consts::PI).sin(),
        };
        self.from + (self.to - self.from) * k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_fades_and_finishes() {
        let mut tween = Tween::one_shot(255.0, 0.0, 1000);
        assert!(!tween.is_running(0));
        assert!(!tween.is_finished(0));
        tween.start(100);
        assert!(tween.is_running(100));
        assert!((tween.value(600) - 127.5).abs() < 1e-3);
        assert!(!tween.is_finished(1099));
        assert!(tween.is_finished(1100));
        assert_eq!(tween.value(5000), 0.0);
        tween.stop();
        assert!(!tween.is_finished(5000));
    }

    #[test]
    fn test_pulse_never_finishes() {
        let mut tween = Tween::pulse(255.0, 100.0, 500);
        tween.start(0);
        assert!(tween.is_running(1_000_000));
        assert_eq!(tween.value(0), 255.0);
        assert!((tween.value(250) - 100.0).abs() < 1e-3);
    }
}
