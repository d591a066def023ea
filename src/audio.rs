//! Sound and haptic output
//!
//! The game only ever fires effects and forgets them. Actual synthesis and
//! the vibration motor live behind [`AudioSink`]; the [`Output`] manager in
//! front of it drops whatever the player has switched off.

use crate::consts::*;
use crate::persistence::Storage;
use crate::settings::{OutputOption, OutputSettings};
use crate::sim::Tween;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball bounced off something; pitch tells walls from bricks
    Bounce { frequency: u16 },
    /// Power-up collected
    Pickup,
    /// Falling tone for a power-up at this height; 0 silences it
    Falling { height: u16 },
    /// Every brick of the level is gone
    LevelComplete,
}

/// Device-side audio channels and vibration motor
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
    /// Set the vibration level (0.0 - 1.0)
    fn vibrate(&mut self, level: f32);
    fn set_music(&mut self, _playing: bool) {}
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _effect: SoundEffect) {}
    fn vibrate(&mut self, _level: f32) {}
}

/// Traces effects to the log, for headless runs
#[derive(Debug, Default)]
pub struct LogSink {
    vibrating: bool,
}

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect) {
        if !matches!(effect, SoundEffect::Falling { .. }) {
            log::trace!("sound: {:?}", effect);
        }
    }

    fn vibrate(&mut self, level: f32) {
        let vibrating = level > 0.0;
        if vibrating != self.vibrating {
            log::trace!("haptic: {}", if vibrating { "on" } else { "off" });
            self.vibrating = vibrating;
        }
    }

    fn set_music(&mut self, playing: bool) {
        log::trace!("music: {}", playing);
    }
}

/// Output manager: gates effects by the player's settings
pub struct Output {
    settings: OutputSettings,
    sink: Box<dyn AudioSink>,
    haptic: Tween,
    clock_ms: u32,
}

impl Output {
    pub fn new(settings: OutputSettings, sink: Box<dyn AudioSink>) -> Self {
        let mut output = Self {
            settings,
            sink,
            haptic: Tween::one_shot(0.0, 0.0, 1),
            clock_ms: 0,
        };
        output.sink.set_music(settings.music);
        output
    }

    /// Silent output with default settings
    pub fn silent() -> Self {
        Self::new(OutputSettings::default(), Box::new(NullSink))
    }

    pub fn settings(&self) -> &OutputSettings {
        &self.settings
    }

    pub fn enabled(&self, option: OutputOption) -> bool {
        self.settings.get(option)
    }

    /// Change one setting and persist the whole record straight away
    pub fn set_enabled(&mut self, option: OutputOption, enabled: bool, storage: &mut dyn Storage) {
        self.settings.set(option, enabled);
        self.settings.save(storage);
        match option {
            OutputOption::Music => self.sink.set_music(enabled),
            OutputOption::Haptic if !enabled => {
                self.haptic.stop();
                self.sink.vibrate(0.0);
            }
            _ => {}
        }
    }

    pub fn toggle(&mut self, option: OutputOption, storage: &mut dyn Storage) {
        let enabled = !self.enabled(option);
        self.set_enabled(option, enabled, storage);
    }

    pub fn play(&mut self, effect: SoundEffect) {
        if self.settings.sound {
            self.sink.play(effect);
        }
    }

    pub fn play_bounce(&mut self, frequency: u16) {
        self.play(SoundEffect::Bounce { frequency });
    }

    /// Start a vibration pulse decaying linearly from `strength` to zero
    pub fn trigger_haptic(&mut self, strength: f32, duration_ms: u32) {
        self.haptic = Tween::one_shot(strength, 0.0, duration_ms);
        self.haptic.start(self.clock_ms);
    }

    /// Standard feedback for any bounce
    pub fn bounce_feedback(&mut self, frequency: u16) {
        self.trigger_haptic(HAPTIC_BOUNCE_STRENGTH, HAPTIC_BOUNCE_MS);
        self.play_bounce(frequency);
    }

    /// Current vibration level (0 when haptics are off or idle)
    pub fn vibration(&self) -> f32 {
        if self.settings.haptic && self.haptic.is_running(self.clock_ms) {
            self.haptic.value(self.clock_ms)
        } else {
            0.0
        }
    }

    /// Advance the output clock and drive the vibration motor
    pub fn update(&mut self, now_ms: u32) {
        self.clock_ms = now_ms;
        let level = self.vibration();
        self.sink.vibrate(level);
    }
}

impl std::fmt::Debug for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Output")
            .field("settings", &self.settings)
            .field("clock_ms", &self.clock_ms)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        played: Rc<RefCell<Vec<SoundEffect>>>,
        vibration: Rc<RefCell<f32>>,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect) {
            self.played.borrow_mut().push(effect);
        }

        fn vibrate(&mut self, level: f32) {
            *self.vibration.borrow_mut() = level;
        }
    }

    fn recorded() -> (Output, Rc<RefCell<Vec<SoundEffect>>>, Rc<RefCell<f32>>) {
        let recorder = Recorder::default();
        let played = recorder.played.clone();
        let vibration = recorder.vibration.clone();
        (Output::new(OutputSettings::default(), Box::new(recorder)), played, vibration)
    }

    #[test]
    fn test_disabled_sound_is_skipped() {
        let (mut output, played, _) = recorded();
        let mut storage = MemoryStorage::new();
        output.play(SoundEffect::Pickup);
        output.toggle(OutputOption::Sound, &mut storage);
        output.play(SoundEffect::LevelComplete);
        assert_eq!(*played.borrow(), vec![SoundEffect::Pickup]);
        // The change was persisted
        assert!(!OutputSettings::load(&storage).sound);
    }

    #[test]
    fn test_haptic_pulse_decays() {
        let (mut output, _, vibration) = recorded();
        output.update(1000);
        output.trigger_haptic(0.25, 50);
        output.update(1000);
        assert!((*vibration.borrow() - 0.25).abs() < 1e-6);
        output.update(1025);
        assert!((*vibration.borrow() - 0.125).abs() < 1e-6);
        output.update(1050);
        assert_eq!(*vibration.borrow(), 0.0);
    }

    #[test]
    fn test_haptic_disabled_stays_still() {
        let (mut output, _, vibration) = recorded();
        let mut storage = MemoryStorage::new();
        output.set_enabled(OutputOption::Haptic, false, &mut storage);
        output.trigger_haptic(0.25, 50);
        output.update(10);
        assert_eq!(*vibration.borrow(), 0.0);
    }
}
