//! Output settings overlay
//!
//! Opened from a running game. While open it takes all input; the game
//! underneath is frozen and not drawn.

use glam::IVec2;

use crate::app::Services;
use crate::consts::*;
use crate::platform::{Buttons, Input};
use crate::renderer::scene::backdrop;
use crate::renderer::{Font, Pen, Renderer, TextAlign};
use crate::settings::{OutputOption, OutputSettings};

const ROW_TOP: i32 = 100;
const ROW_HEIGHT: i32 = 30;

#[derive(Debug, Clone, Default)]
pub struct MenuScreen {
    cursor: usize,
}

impl MenuScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> OutputOption {
        OutputOption::ALL[self.cursor]
    }

    pub fn update(&mut self, input: &Input, services: &mut Services) {
        let last = OutputOption::ALL.len() - 1;
        let mut moved = false;
        if input.was_pressed(Buttons::DPAD_UP) && self.cursor > 0 {
            self.cursor -= 1;
            moved = true;
        }
        if input.was_pressed(Buttons::DPAD_DOWN) && self.cursor < last {
            self.cursor += 1;
            moved = true;
        }
        if input.was_pressed(Buttons::DPAD_LEFT | Buttons::DPAD_RIGHT) {
            let option = self.selected();
            services.output.toggle(option, services.storage.as_mut());
            log::info!("{} {}", option.label(), if services.output.enabled(option) { "on" } else { "off" });
            moved = true;
        }
        if moved {
            services.output.trigger_haptic(HAPTIC_MENU_STRENGTH, HAPTIC_MENU_MS);
        }
    }

    pub fn render(&self, r: &mut dyn Renderer, settings: &OutputSettings, prompt: Pen) {
        let w = SCREEN_WIDTH as i32;
        let h = SCREEN_HEIGHT as i32;
        r.clear();
        backdrop(r, |y| Pen::rgb(10, ((h - y) / 3) as u8, ((h - y) / 2) as u8));

        r.set_pen(Pen::WHITE);
        r.text("SETTINGS", Font::Splash, IVec2::new(w / 2, 40), TextAlign::CenterCenter);

        let labels_x = w / 2 - 80;
        for (i, option) in OutputOption::ALL.iter().enumerate() {
            let y = ROW_TOP + ROW_HEIGHT * i as i32;
            r.set_pen(Pen::WHITE);
            r.text(option.label(), Font::Message, IVec2::new(labels_x, y), TextAlign::CenterLeft);
            r.set_pen(if i == self.cursor { prompt } else { Pen::WHITE });
            let state = if settings.get(*option) { "<ON>" } else { "<OFF>" };
            r.text(state, Font::Message, IVec2::new(w / 2 + 16, y), TextAlign::CenterLeft);
        }

        r.set_pen(Pen::WHITE);
        r.text(
            "PRESS MENU TO EXIT",
            Font::Message,
            IVec2::new(w / 2, h - 20),
            TextAlign::CenterCenter,
        );
    }
}
