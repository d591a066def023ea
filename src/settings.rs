//! Output settings
//!
//! Persisted separately from the high score table.

use serde::{Deserialize, Serialize};

use crate::persistence::{SLOT_SETTINGS, Storage, load_json, save_json};

/// Which outputs the player wants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    pub sound: bool,
    pub music: bool,
    pub haptic: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            sound: true,
            music: true,
            haptic: true,
        }
    }
}

/// One adjustable line of the settings menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputOption {
    Sound,
    Music,
    Haptic,
}

impl OutputOption {
    /// Menu order
    pub const ALL: [OutputOption; 3] = [OutputOption::Sound, OutputOption::Music, OutputOption::Haptic];

    pub fn label(self) -> &'static str {
        match self {
            OutputOption::Sound => "Sound",
            OutputOption::Music => "Music",
            OutputOption::Haptic => "Haptic",
        }
    }
}

impl OutputSettings {
    pub fn get(&self, option: OutputOption) -> bool {
        match option {
            OutputOption::Sound => self.sound,
            OutputOption::Music => self.music,
            OutputOption::Haptic => self.haptic,
        }
    }

    pub fn set(&mut self, option: OutputOption, enabled: bool) {
        match option {
            OutputOption::Sound => self.sound = enabled,
            OutputOption::Music => self.music = enabled,
            OutputOption::Haptic => self.haptic = enabled,
        }
    }

    /// Load from storage; first run (or a bad slot) gives the defaults
    pub fn load(storage: &dyn Storage) -> Self {
        match load_json(storage, SLOT_SETTINGS) {
            Some(settings) => {
                log::info!("Loaded output settings");
                settings
            }
            None => {
                log::info!("Using default output settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        if save_json(storage, SLOT_SETTINGS, self) {
            log::info!("Output settings saved");
        }
    }
}
