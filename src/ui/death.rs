//! Post-game screen: enter initials for a ranking score

use glam::IVec2;

use crate::app::{Services, Transition};
use crate::consts::*;
use crate::highscores::HighScores;
use crate::platform::{Buttons, Input};
use crate::renderer::scene::backdrop;
use crate::renderer::{Font, Pen, Renderer, TextAlign};

#[derive(Debug, Clone)]
pub struct DeathScreen {
    /// Score to record; 0 when it does not make the table
    score: u32,
    name: [u8; INITIALS_LEN],
    cursor: usize,
}

impl DeathScreen {
    /// Enter with the finished game's score, ranked against the stored table
    pub fn new(final_score: u32, table: &HighScores) -> Self {
        let score = if table.rank(final_score).is_some() {
            final_score
        } else {
            log::info!("Score {} does not rank", final_score);
            0
        };
        Self {
            score,
            name: [b'A'; INITIALS_LEN],
            cursor: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn name(&self) -> String {
        self.name.iter().map(|&c| c as char).collect()
    }

    pub fn update(&mut self, input: &Input, services: &mut Services) -> Option<Transition> {
        // Nothing worth recording
        if self.score == 0 {
            return Some(Transition::Hiscore);
        }

        if input.was_pressed(Buttons::DPAD_LEFT) && self.cursor > 0 {
            self.cursor -= 1;
        }
        if input.was_pressed(Buttons::DPAD_RIGHT) && self.cursor < INITIALS_LEN - 1 {
            self.cursor += 1;
        }
        let letter = &mut self.name[self.cursor];
        if input.was_pressed(Buttons::DPAD_UP) && *letter < b'Z' {
            *letter += 1;
        }
        if input.was_pressed(Buttons::DPAD_DOWN) && *letter > b'A' {
            *letter -= 1;
        }

        if input.was_pressed(Buttons::B) {
            let mut table = HighScores::load(services.storage.as_ref());
            match table.insert(self.score, &self.name()) {
                Some(position) => {
                    log::info!("{} placed {} with {}", self.name(), position + 1, self.score);
                    table.save(services.storage.as_mut());
                }
                None => log::warn!("Score {} no longer ranks, not saved", self.score),
            }
            return Some(Transition::Hiscore);
        }

        None
    }

    pub fn render(&self, r: &mut dyn Renderer, prompt: Pen) {
        let w = SCREEN_WIDTH as i32;
        let h = SCREEN_HEIGHT as i32;
        r.clear();
        backdrop(r, |y| Pen::rgb(((h - y) / 2) as u8, 10, 10));

        r.set_pen(prompt);
        r.text("NEW HIGH SCORE", Font::Message, IVec2::new(w / 2, 30), TextAlign::TopCenter);

        r.set_pen(Pen::YELLOW);
        r.text(
            &format!("{:05}", self.score),
            Font::Message,
            IVec2::new(w / 2, 55),
            TextAlign::TopCenter,
        );

        // Initials spaced out, with the cursor letter underlined
        let spaced = self
            .name
            .iter()
            .map(|&c| (c as char).to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let size = r.measure_text(&spaced, Font::Message);
        let origin = IVec2::new((w - size.x) / 2, (h - size.y) / 2);
        r.set_pen(Pen::WHITE);
        r.text(&spaced, Font::Message, origin, TextAlign::TopLeft);

        let glyph = Font::Message.glyph_size();
        let underline = origin + IVec2::new(glyph.x * 2 * self.cursor as i32, size.y + 1);
        r.set_pen(prompt);
        r.h_span(underline, glyph.x);

        r.set_pen(Pen::WHITE);
        r.text(
            "LEFT/RIGHT TO SELECT",
            Font::Message,
            IVec2::new(w / 2, h - 70),
            TextAlign::CenterCenter,
        );
        r.text(
            "UP/DOWN TO CHANGE",
            Font::Message,
            IVec2::new(w / 2, h - 55),
            TextAlign::CenterCenter,
        );
        r.set_pen(prompt);
        r.text(
            "PRESS 'B' TO SAVE",
            Font::Message,
            IVec2::new(w / 2, h - 30),
            TextAlign::CenterCenter,
        );
    }
}
