//! Glitch Runner entry point
//!
//! Wasm: wires the dashboard page, input and the two callback chains (frame
//! loop and spawn timers). Native: runs a short headless demo of the sim.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent,
        TouchEvent,
    };

    use glitch_runner::Tuning;
    use glitch_runner::consts::GROUND_OFFSET;
    use glitch_runner::page;
    use glitch_runner::sim::{GamePhase, GameSession, Viewport, spawn_due, step};

    const COLOR_GROUND: &str = "#16324a";
    const COLOR_PLAYER: &str = "#00ff9c";
    const COLOR_OBSTACLE: &str = "#ff3864";

    /// Game instance holding the session and the drawing surface
    struct Game {
        session: GameSession,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl Game {
        /// Canvas dimensions are re-read every frame; a mid-run resize does
        /// not reposition the player (accepted quirk)
        fn viewport(&self) -> Viewport {
            Viewport::new(self.canvas.width() as f32, self.canvas.height() as f32)
        }

        /// Clear and draw the whole scene for the current state
        fn render(&self, view: &Viewport) {
            let ctx = &self.ctx;
            ctx.clear_rect(0.0, 0.0, view.width as f64, view.height as f64);

            ctx.set_fill_style_str(COLOR_GROUND);
            ctx.fill_rect(
                0.0,
                view.ground as f64,
                view.width as f64,
                GROUND_OFFSET as f64,
            );

            let p = &self.session.player;
            ctx.set_fill_style_str(COLOR_PLAYER);
            ctx.fill_rect(p.x as f64, p.y as f64, p.width as f64, p.height as f64);

            ctx.set_fill_style_str(COLOR_OBSTACLE);
            for ob in &self.session.obstacles {
                // Glitched quad: box corners displaced by the offsets rolled
                // at spawn time; hit detection stays on the plain box
                let corners = [
                    (ob.x, ob.y, ob.glitch[0]),
                    (ob.x + ob.width, ob.y, ob.glitch[1]),
                    (ob.x + ob.width, ob.y + ob.height, ob.glitch[2]),
                    (ob.x, ob.y + ob.height, ob.glitch[3]),
                ];
                ctx.begin_path();
                ctx.move_to(
                    (corners[0].0 + corners[0].2.x) as f64,
                    (corners[0].1 + corners[0].2.y) as f64,
                );
                for &(x, y, offset) in &corners[1..] {
                    ctx.line_to((x + offset.x) as f64, (y + offset.y) as f64);
                }
                ctx.close_path();
                ctx.fill();
            }
        }

        /// Live score readout while playing
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("gameScore") {
                el.set_text_content(Some(&(self.session.score.floor() as u32).to_string()));
            }
        }

        /// Reveal the overlay matching a terminal phase
        fn show_terminal_overlay(&self, document: &Document) {
            match self.session.phase {
                GamePhase::GameOver => {
                    if let Some(el) = document.get_element_by_id("finalScore") {
                        el.set_text_content(Some(
                            &(self.session.score.floor() as u32).to_string(),
                        ));
                    }
                    show(document, "gameOverOverlay");
                    log::info!(
                        "Run over at score {}",
                        self.session.score.floor() as u32
                    );
                }
                GamePhase::Win => {
                    show(document, "gameWinOverlay");
                    log::info!("Target score reached, run won");
                }
                _ => {}
            }
        }
    }

    fn show(document: &Document, id: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.class_list().remove_1("hidden").ok();
        }
    }

    fn hide(document: &Document, id: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.class_list().add_1("hidden").ok();
        }
    }

    /// Reset the session, hide every overlay and kick off both chains
    fn start_game(game: &Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let (was_playing, generation, delay) = {
            let mut g = game.borrow_mut();
            let was_playing = g.session.is_playing();
            let view = g.viewport();
            g.session.start(view.ground);
            (
                was_playing,
                g.session.generation(),
                g.session.next_spawn_delay(),
            )
        };
        for id in ["gameStartOverlay", "gameOverOverlay", "gameWinOverlay"] {
            hide(&document, id);
        }
        // A mid-run restart keeps the existing frame chain; the old spawn
        // chain dies on its next firing via the generation check
        if !was_playing {
            schedule_frame(game.clone());
        }
        schedule_spawn(game.clone(), generation, delay);
        log::info!("Run started (generation {generation})");
    }

    fn schedule_frame(game: Rc<RefCell<Game>>) {
        let closure = Closure::once(move |_time: f64| {
            frame(game);
        });
        let window = web_sys::window().expect("no window");
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One display frame: advance, draw, then reschedule only while the
    /// session is still playing. Terminal transitions therefore halt the
    /// chain synchronously - no extra frame mutates post-mortem state.
    fn frame(game: Rc<RefCell<Game>>) {
        let still_playing = {
            let mut g = game.borrow_mut();
            if !g.session.is_playing() {
                return;
            }
            let view = g.viewport();
            step(&mut g.session, &view, 1.0);
            g.render(&view);

            let document = web_sys::window().unwrap().document().unwrap();
            g.update_hud(&document);
            if g.session.is_over() {
                g.show_terminal_overlay(&document);
            }
            g.session.is_playing()
        };
        if still_playing {
            schedule_frame(game);
        }
    }

    /// One link in the spawn timer chain. The closure carries the generation
    /// captured at schedule time; `spawn_due` decides whether the chain is
    /// still alive and, if so, hands back the next delay.
    fn schedule_spawn(game: Rc<RefCell<Game>>, generation: u64, delay_ms: f32) {
        let handoff = game.clone();
        let closure = Closure::once(move || {
            let next = {
                let mut g = handoff.borrow_mut();
                let view = g.viewport();
                spawn_due(&mut g.session, generation, &view)
            };
            if let Some(delay) = next {
                schedule_spawn(handoff, generation, delay);
            }
        });
        let window = web_sys::window().expect("no window");
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms as i32,
        );
        closure.forget();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard jump
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.key().as_str() {
                    " " | "ArrowUp" => {
                        event.prevent_default();
                        game.borrow_mut().session.jump();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer jump
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().session.jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch jump
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().session.jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        // Start, retry and claim-reward all begin a fresh run
        for id in ["btnGameStart", "btnGameRetry", "btnClaimReward"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    start_game(&game);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Tuning overrides from an optional JSON node in the page
    fn load_tuning(document: &Document) -> Tuning {
        let Some(node) = document.get_element_by_id("game-tuning") else {
            return Tuning::default();
        };
        let json = node.text_content().unwrap_or_default();
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides from page");
                tuning
            }
            Err(err) => {
                log::warn!("Ignoring malformed tuning blob: {err}");
                Tuning::default()
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Glitch Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no game canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let tuning = load_tuning(&document);
        let seed = js_sys::Date::now() as u64;
        log::info!("Session seed: {seed}");

        let view = Viewport::new(canvas.width() as f32, canvas.height() as f32);
        let game = Rc::new(RefCell::new(Game {
            session: GameSession::new(seed, tuning, view.ground),
            canvas,
            ctx,
        }));

        // Static resting frame while idle in the start state
        game.borrow().render(&view);

        let canvas_handle = game.borrow().canvas.clone();
        setup_input_handlers(&canvas_handle, game.clone());
        setup_buttons(game.clone());

        // Dashboard shell around the game
        page::dom::init(&document, seed.wrapping_add(1));
        page::fx::init_particles(&document, seed.wrapping_add(2));
        page::fx::init_tilt(&document);

        log::info!("Glitch Runner running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Glitch Runner (native) starting...");

    println!("\nRunning headless demo run...");
    demo_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted run with a naive autopilot, driving the sim the way the page
/// would: fixed frame steps plus a simulated spawn timer clock.
#[cfg(not(target_arch = "wasm32"))]
fn demo_run() {
    use glitch_runner::Tuning;
    use glitch_runner::sim::{GamePhase, GameSession, Viewport, spawn_due, step};

    let view = Viewport::new(600.0, 300.0);
    let mut session = GameSession::new(0xC0FFEE, Tuning::default(), view.ground);
    session.start(view.ground);
    let generation = session.generation();

    let frame_ms = 1000.0 / 60.0;
    let mut clock_ms = 0.0f32;
    let mut next_spawn_ms = session.next_spawn_delay();
    let mut frames = 0u32;

    while session.is_playing() && frames < 20_000 {
        clock_ms += frame_ms;
        if clock_ms >= next_spawn_ms {
            if let Some(delay) = spawn_due(&mut session, generation, &view) {
                next_spawn_ms = clock_ms + delay;
            }
        }

        // Jump when the nearest obstacle closes in
        let player_right = session.player.x + session.player.width;
        let threat = session
            .obstacles
            .iter()
            .any(|o| o.x > player_right && o.x - player_right < session.speed * 12.0);
        if threat {
            session.jump();
        }

        step(&mut session, &view, 1.0);
        frames += 1;
    }

    let score = session.score.floor() as u32;
    match session.phase {
        GamePhase::Win => println!("✓ Demo run won after {frames} frames (score {score})"),
        GamePhase::GameOver => println!("✓ Demo run crashed after {frames} frames (score {score})"),
        _ => println!("✓ Demo run stopped after {frames} frames (score {score})"),
    }
}
