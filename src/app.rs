//! Screen state machine
//!
//! SPLASH -> GAME -> DEATH -> HISCORE -> GAME ..., with a settings MENU that
//! can be opened over GAME. A screen change takes effect within the same
//! tick: the new screen gets its first update straight away, and further
//! changes keep resolving up to [`MAX_TRANSITIONS_PER_TICK`] times.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::{AudioSink, Output};
use crate::consts::*;
use crate::highscores::HighScores;
use crate::persistence::Storage;
use crate::platform::{Buttons, Input};
use crate::renderer::Renderer;
use crate::renderer::scene::draw_game;
use crate::settings::OutputSettings;
use crate::sim::{GameState, TickInput, TickResult, Tween, tick};
use crate::ui::{DeathScreen, HiscoreScreen, MenuScreen, SplashScreen, prompt_pen};

/// Requested screen change, carrying whatever the next screen needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Game,
    Death { final_score: u32 },
    Hiscore,
}

/// Process-wide collaborators handed to the screens
pub struct Services {
    pub storage: Box<dyn Storage>,
    pub output: Output,
}

impl Services {
    pub fn new(storage: Box<dyn Storage>, output: Output) -> Self {
        Self { storage, output }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").field("output", &self.output).finish_non_exhaustive()
    }
}

/// The active screen
#[derive(Debug)]
pub enum Screen {
    Splash(SplashScreen),
    Game(Box<GameState>),
    Death(DeathScreen),
    Hiscore(HiscoreScreen),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Splash(_) => "splash",
            Screen::Game(_) => "game",
            Screen::Death(_) => "death",
            Screen::Hiscore(_) => "hiscore",
        }
    }
}

#[derive(Debug)]
pub struct App {
    screen: Screen,
    menu: Option<MenuScreen>,
    services: Services,
    /// Seeds each new game
    seeds: Pcg32,
    /// Prompt pen pulse shared by every screen
    pulse: Tween,
}

impl App {
    /// Start on the splash screen, loading output settings from `storage`
    pub fn new(storage: Box<dyn Storage>, sink: Box<dyn AudioSink>, seed: u64) -> Self {
        let settings = OutputSettings::load(storage.as_ref());
        let mut pulse = Tween::pulse(255.0, 100.0, PEN_PULSE_MS);
        pulse.start(0);
        log::info!("Blox starting (seed {})", seed);
        Self {
            screen: Screen::Splash(SplashScreen::new()),
            menu: None,
            services: Services::new(storage, Output::new(settings, sink)),
            seeds: Pcg32::seed_from_u64(seed),
            pulse,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn game(&self) -> Option<&GameState> {
        match &self.screen {
            Screen::Game(state) => Some(state.as_ref()),
            _ => None,
        }
    }

    pub fn game_mut(&mut self) -> Option<&mut GameState> {
        match &mut self.screen {
            Screen::Game(state) => Some(state.as_mut()),
            _ => None,
        }
    }

    pub fn menu_open(&self) -> bool {
        self.menu.is_some()
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut Services {
        &mut self.services
    }

    /// Advance one tick
    pub fn update(&mut self, now_ms: u32, input: &Input) {
        self.update_screens(now_ms, input);
        self.services.output.update(now_ms);
    }

    fn update_screens(&mut self, now_ms: u32, input: &Input) {
        if input.was_pressed(Buttons::MENU) && matches!(self.screen, Screen::Game(_)) {
            self.menu = match self.menu {
                Some(_) => None,
                None => Some(MenuScreen::new()),
            };
            log::debug!("Menu {}", if self.menu.is_some() { "opened" } else { "closed" });
            return;
        }
        if let Some(menu) = &mut self.menu {
            menu.update(input, &mut self.services);
            return;
        }

        // Press edges belong to the screen that saw them; a screen entered
        // mid-tick only sees held buttons.
        let mut input = *input;
        for _ in 0..MAX_TRANSITIONS_PER_TICK {
            let Some(transition) = self.step(now_ms, &input) else {
                return;
            };
            self.enter(transition, now_ms);
            input.pressed = Buttons::empty();
        }
        log::warn!(
            "Still switching screens after {} transitions, resuming on {}",
            MAX_TRANSITIONS_PER_TICK,
            self.screen.name()
        );
    }

    fn step(&mut self, now_ms: u32, input: &Input) -> Option<Transition> {
        match &mut self.screen {
            Screen::Splash(splash) => splash.update(input),
            Screen::Game(state) => {
                match tick(state, &TickInput::from_input(input), now_ms, &mut self.services.output) {
                    TickResult::Continue => None,
                    TickResult::GameOver { score } => Some(Transition::Death { final_score: score }),
                }
            }
            Screen::Death(death) => death.update(input, &mut self.services),
            Screen::Hiscore(hiscore) => hiscore.update(input),
        }
    }

    fn enter(&mut self, transition: Transition, now_ms: u32) {
        self.screen = match transition {
            Transition::Game => {
                let hiscore = HighScores::load(self.services.storage.as_ref()).top_score();
                let seed = self.seeds.random();
                Screen::Game(Box::new(GameState::new(seed, hiscore, now_ms)))
            }
            Transition::Death { final_score } => {
                let table = HighScores::load(self.services.storage.as_ref());
                Screen::Death(DeathScreen::new(final_score, &table))
            }
            Transition::Hiscore => Screen::Hiscore(HiscoreScreen::new(self.services.storage.as_ref())),
        };
        self.menu = None;
        log::info!("Screen -> {}", self.screen.name());
    }

    /// Draw the current frame
    pub fn render(&self, now_ms: u32, r: &mut dyn Renderer) {
        let prompt = prompt_pen(&self.pulse, now_ms);
        if let Some(menu) = &self.menu {
            menu.render(r, self.services.output.settings(), prompt);
            return;
        }
        match &self.screen {
            Screen::Splash(splash) => splash.render(r, prompt),
            Screen::Game(state) => draw_game(r, state, now_ms, prompt),
            Screen::Death(death) => death.render(r, prompt),
            Screen::Hiscore(hiscore) => hiscore.render(r, prompt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullSink;
    use crate::persistence::MemoryStorage;
    use crate::renderer::DrawList;

    fn app() -> App {
        App::new(Box::new(MemoryStorage::new()), Box::new(NullSink), 42)
    }

    #[test]
    fn test_splash_to_game() {
        let mut app = app();
        assert!(matches!(app.screen(), Screen::Splash(_)));
        app.update(0, &Input::default());
        assert!(app.game().is_none());
        app.update(10, &Input::press(Buttons::A));
        assert!(app.game().is_some());
    }

    #[test]
    fn test_menu_only_from_game() {
        let mut app = app();
        app.update(0, &Input::press(Buttons::MENU));
        assert!(!app.menu_open());

        app.update(10, &Input::press(Buttons::A));
        app.update(20, &Input::press(Buttons::MENU));
        assert!(app.menu_open());

        // Game is frozen while the menu is up
        let paddle_x = app.game().map(|g| g.paddle.x);
        app.update(30, &Input::hold(Buttons::DPAD_RIGHT));
        assert_eq!(app.game().map(|g| g.paddle.x), paddle_x);

        let mut frame = DrawList::new();
        app.render(30, &mut frame);
        assert!(frame.contains_text("SETTINGS"));
        assert!(!frame.contains_text("SCORE"));

        app.update(40, &Input::press(Buttons::MENU));
        assert!(!app.menu_open());
        app.update(50, &Input::hold(Buttons::DPAD_RIGHT));
        assert!(app.game().map(|g| g.paddle.x) > paddle_x);
    }

    #[test]
    fn test_menu_reopens_at_top() {
        let mut app = app();
        app.update(0, &Input::press(Buttons::A));
        app.update(10, &Input::press(Buttons::MENU));
        app.update(20, &Input::press(Buttons::DPAD_DOWN));
        app.update(30, &Input::press(Buttons::MENU));
        app.update(40, &Input::press(Buttons::MENU));
        assert_eq!(app.menu.as_ref().map(|m| m.cursor()), Some(0));
    }

    #[test]
    fn test_game_over_chain_resolves_in_one_tick() {
        let mut app = app();
        app.update(0, &Input::press(Buttons::A));
        if let Some(game) = app.game_mut() {
            game.lives = 0;
            game.splash.stop();
            game.splash.start(0);
        }
        // Game over -> death (score 0) -> hiscore, all in this tick
        app.update(SPLASH_FADE_MS, &Input::default());
        assert!(matches!(app.screen(), Screen::Hiscore(_)));
    }

    #[test]
    fn test_stale_press_does_not_cascade() {
        let mut app = app();
        app.update(0, &Input::press(Buttons::A));
        if let Some(game) = app.game_mut() {
            game.lives = 0;
            game.splash.start(0);
        }
        // A is pressed, but it was seen by the game screen, not the hiscore one
        app.update(SPLASH_FADE_MS, &Input::press(Buttons::A));
        assert!(matches!(app.screen(), Screen::Hiscore(_)));
    }
}
