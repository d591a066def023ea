//! High score listing

use glam::IVec2;

use crate::app::Transition;
use crate::consts::*;
use crate::highscores::HighScores;
use crate::persistence::Storage;
use crate::platform::{Buttons, Input};
use crate::renderer::scene::backdrop;
use crate::renderer::{Font, Pen, Renderer, TextAlign};

const ROW_TOP: i32 = 45;
const ROW_HEIGHT: i32 = 16;

#[derive(Debug, Clone)]
pub struct HiscoreScreen {
    table: HighScores,
}

impl HiscoreScreen {
    /// Reads the table fresh, so scores saved elsewhere show up
    pub fn new(storage: &dyn Storage) -> Self {
        Self {
            table: HighScores::load(storage),
        }
    }

    pub fn table(&self) -> &HighScores {
        &self.table
    }

    pub fn update(&mut self, input: &Input) -> Option<Transition> {
        input.was_pressed(Buttons::A).then_some(Transition::Game)
    }

    pub fn render(&self, r: &mut dyn Renderer, prompt: Pen) {
        let w = SCREEN_WIDTH as i32;
        let h = SCREEN_HEIGHT as i32;
        r.clear();
        backdrop(r, |y| Pen::rgb(10, ((h - y) / 2) as u8, 10));

        r.set_pen(Pen::WHITE);
        r.text("HIGH SCORES", Font::Message, IVec2::new(w / 2, 15), TextAlign::TopCenter);

        r.set_pen(Pen::YELLOW);
        let listed = self.table.entries().iter().filter(|e| e.score > 0);
        for (i, entry) in listed.enumerate() {
            let y = ROW_TOP + ROW_HEIGHT * i as i32;
            r.text(
                &format!("{:2}. {}", i + 1, entry.name),
                Font::Message,
                IVec2::new(w / 2 - 70, y),
                TextAlign::TopLeft,
            );
            r.text(
                &format!("{:05}", entry.score),
                Font::Message,
                IVec2::new(w / 2 + 70, y),
                TextAlign::TopRight,
            );
        }

        r.set_pen(prompt);
        r.text(
            "PRESS 'A' TO START",
            Font::Message,
            IVec2::new(w / 2, h - 20),
            TextAlign::CenterCenter,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use crate::renderer::DrawList;

    #[test]
    fn test_lists_only_real_scores() {
        let mut storage = MemoryStorage::new();
        let mut table = HighScores::new();
        table.insert(900, "ACE");
        table.insert(450, "BOB");
        table.save(&mut storage);

        let screen = HiscoreScreen::new(&storage);
        let mut frame = DrawList::new();
        screen.render(&mut frame, Pen::YELLOW);
        assert!(frame.contains_text(" 1. ACE"));
        assert!(frame.contains_text("00900"));
        assert!(frame.contains_text(" 2. BOB"));
        assert!(!frame.contains_text(" 3."));
    }

    #[test]
    fn test_a_starts_a_game() {
        let mut screen = HiscoreScreen::new(&MemoryStorage::new());
        assert_eq!(screen.update(&Input::default()), None);
        assert_eq!(screen.update(&Input::press(Buttons::A)), Some(Transition::Game));
    }
}
