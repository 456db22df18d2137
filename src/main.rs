//! Block Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! browser build wires keyboard events and requestAnimationFrame into the
//! core and updates HUD text; drawing the playfield belongs to the host
//! page's renderer. The native build runs a short headless demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use block_breaker::input::InputRouter;
    use block_breaker::progress::{LocalStore, ProgressStore};
    use block_breaker::sim::{GamePhase, GameState, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        router: InputRouter,
        progress: ProgressStore<LocalStore>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                router: InputRouter::new(),
                progress: ProgressStore::load(LocalStore),
            }
        }

        /// Drain intents and advance one tick
        fn update(&mut self) {
            let input = self.router.take();
            tick(&mut self.state, &input, &mut self.progress);
        }

        /// Update HUD text elements in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-lives") {
                el.set_text_content(Some(&self.state.lives.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-stage") {
                el.set_text_content(Some(&self.state.stage.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-cleared") {
                el.set_text_content(Some(&format!(
                    "{} / {}",
                    self.progress.cleared_count(),
                    block_breaker::stages::MAX_STAGE
                )));
            }
            if let Some(el) = document.get_element_by_id("hud-message") {
                el.set_text_content(Some(self.status_line()));
            }
        }

        /// One-line prompt for the current phase or pending confirmation
        fn status_line(&self) -> &'static str {
            use block_breaker::input::ConfirmRequest;
            if let Some(request) = self.router.pending_confirmation() {
                return match request {
                    ConfirmRequest::ResetProgress => "Wipe stage progress? (y/n)",
                    ConfirmRequest::ResetScore => "Also reset the score? (y/n)",
                };
            }
            match self.state.phase {
                GamePhase::StageSelect => "Arrows select a stage, Space starts, R resets progress",
                GamePhase::Playing if !self.state.started => {
                    "Space to start - Esc for stage select"
                }
                GamePhase::Playing => "Space to pause",
                GamePhase::LifeLost => "Lost a life! Space to continue",
                GamePhase::StageClear => "Stage clear! Space for the next stage",
                GamePhase::GameOver => "Game over - Space to return",
                GamePhase::GameComplete => "All stages cleared! Space to return",
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        let seed = chrono::Utc::now().timestamp_millis() as u64;
        log::info!("Block Breaker starting with seed {seed}");

        let game = Rc::new(RefCell::new(Game::new(seed)));
        setup_key_listeners(game.clone());
        request_animation_frame(game);
    }

    fn setup_key_listeners(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                // Keep Space from scrolling the page
                if event.key() == " " {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                let phase = g.state.phase;
                g.router.key_down(&event.key(), phase);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().router.key_up(&event.key());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.update_hud();
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use block_breaker::consts::PADDLE_STEP;
    use block_breaker::progress::{MemoryStore, ProgressStore};
    use block_breaker::sim::{GamePhase, GameState, TickInput, tick};
    use block_breaker::{Frame, InputRouter, Renderer};

    /// Headless renderer that reports frames to the log
    struct LogRenderer;

    impl Renderer for LogRenderer {
        fn render(&mut self, frame: &Frame<'_>) {
            log::debug!(
                "phase {:?} stage {} score {} lives {} bricks {}",
                frame.phase,
                frame.stage,
                frame.score,
                frame.lives,
                frame.field.alive_count()
            );
        }
    }

    env_logger::init();

    let seed = chrono::Utc::now().timestamp_millis() as u64;
    log::info!("Block Breaker (native) starting with seed {seed}");

    let mut state = GameState::new(seed);
    let mut progress = ProgressStore::load(MemoryStore::new());
    let mut router = InputRouter::new();
    let mut renderer = LogRenderer;

    // Scripted demo: confirm stage 1 from the select grid, unpause, then
    // let a ball-tracking paddle play until the stage resolves
    for _ in 0..2 {
        router.key_down(" ", state.phase);
        let input = router.take();
        tick(&mut state, &input, &mut progress);
    }

    for _ in 0..200_000 {
        if state.phase != GamePhase::Playing {
            break;
        }
        let target = state.ball.pos.x - state.paddle.width / 2.0;
        let input = TickInput {
            move_left: state.paddle.x > target + PADDLE_STEP,
            move_right: state.paddle.x < target - PADDLE_STEP,
            ..Default::default()
        };
        tick(&mut state, &input, &mut progress);
        renderer.render(&Frame::new(
            &state,
            progress.cleared_stages(),
            router.pending_confirmation(),
        ));
    }

    log::info!(
        "demo finished in {:?} with score {} and {} bricks left",
        state.phase,
        state.score,
        state.field.alive_count()
    );
}
