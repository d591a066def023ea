//! Title screen

use glam::IVec2;

use crate::app::Transition;
use crate::consts::*;
use crate::platform::{Buttons, Input};
use crate::renderer::scene::backdrop;
use crate::renderer::{Font, Pen, Renderer, TextAlign};

#[derive(Debug, Clone, Default)]
pub struct SplashScreen;

impl SplashScreen {
    pub fn new() -> Self {
        Self
    }

    pub fn update(&mut self, input: &Input) -> Option<Transition> {
        input.was_pressed(Buttons::A).then_some(Transition::Game)
    }

    pub fn render(&self, r: &mut dyn Renderer, prompt: Pen) {
        let w = SCREEN_WIDTH as i32;
        let h = SCREEN_HEIGHT as i32;
        r.clear();
        backdrop(r, |y| Pen::rgb(((h - y) / 3) as u8, 10, ((h - y) / 2) as u8));

        r.set_pen(Pen::WHITE);
        r.text("BLOX", Font::Splash, IVec2::new(w / 2, h / 3), TextAlign::CenterCenter);

        r.set_pen(prompt);
        r.text(
            "PRESS 'A' TO START",
            Font::Message,
            IVec2::new(w / 2, h - 45),
            TextAlign::CenterCenter,
        );
    }
}
