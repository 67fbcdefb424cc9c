//! Castle Dash entry point
//!
//! On the web this wires DOM input to the engine and drives it from
//! `requestAnimationFrame`. Natively it plays the whole sequence headless
//! with the ledge-hopping autopilot and logs each phase.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{FocusEvent, KeyboardEvent, PointerEvent};

    use castle_dash::input::TouchButton;
    use castle_dash::{Engine, RenderSnapshot, Settings};

    /// Global function the page defines to draw a snapshot
    const PRESENT_HOOK: &str = "castleDashPresent";

    /// Fallback frame length before the first timestamp arrives
    const FIRST_FRAME_MS: f64 = 1000.0 / 60.0;

    struct Game {
        engine: Engine,
        last_time: f64,
        present: Option<js_sys::Function>,
    }

    impl Game {
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                FIRST_FRAME_MS
            };
            self.last_time = time;

            self.engine.frame(dt, &mut to_page(&self.present));
        }

        fn revive(&mut self) {
            self.engine.revive(&mut to_page(&self.present));
        }

        /// Advance the dialogue by one acknowledged step
        fn advance_dialogue(&mut self) {
            if let Some(step) = self.engine.snapshot().dialogue_step {
                self.engine
                    .acknowledge_dialogue(step + 1, &mut to_page(&self.present));
            }
        }

        /// Push the current state without waiting for a tick
        fn present_now(&self) {
            if let Some(hook) = &self.present {
                present_snapshot(hook, &self.engine.snapshot());
            }
        }
    }

    /// Dispatcher forwarding snapshots to the page hook, if there is one
    fn to_page(hook: &Option<js_sys::Function>) -> impl FnMut(&RenderSnapshot) + '_ {
        move |snapshot: &RenderSnapshot| {
            if let Some(hook) = hook {
                present_snapshot(hook, snapshot);
            }
        }
    }

    fn present_snapshot(hook: &js_sys::Function, snapshot: &RenderSnapshot) {
        match serde_json::to_string(snapshot) {
            Ok(json) => {
                let _ = hook.call1(&JsValue::NULL, &JsValue::from_str(&json));
            }
            Err(e) => log::error!("Snapshot serialization failed: {}", e),
        }
    }

    fn find_present_hook(window: &web_sys::Window) -> Option<js_sys::Function> {
        js_sys::Reflect::get(window, &JsValue::from_str(PRESENT_HOOK))
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
        }

        log::info!("Castle Dash starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let settings = Settings::load();
        // Written back so the bindings can be edited in storage
        settings.save();

        let engine = match Engine::new(settings) {
            Ok(engine) => engine,
            Err(e) => {
                log::error!("Engine failed to start: {}", e);
                return;
            }
        };

        let present = find_present_hook(&window);
        if present.is_none() {
            log::warn!("window.{} not defined; nothing will be drawn", PRESENT_HOOK);
        }

        let game = Rc::new(RefCell::new(Game {
            engine,
            last_time: 0.0,
            present,
        }));
        game.borrow().present_now();

        setup_keyboard(&window, game.clone());
        setup_touch_buttons(&document, game.clone());
        setup_prompt_buttons(&document, game.clone());
        setup_focus_loss(&window, &document, game.clone());

        request_animation_frame(game);

        log::info!("Castle Dash running!");
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().engine.key_down(&event.key()) {
                    // Keep Space and ArrowUp from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().engine.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        for name in ["left", "right", "jump"] {
            let Some(button) = TouchButton::from_name(name) else {
                continue;
            };
            let Some(el) = document.get_element_by_id(&format!("touch-{}", name)) else {
                continue;
            };

            let events = [
                ("pointerdown", true),
                ("pointerup", false),
                ("pointerleave", false),
                ("pointercancel", false),
            ];
            for (event_name, pressed) in events {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    event.prevent_default();
                    game.borrow_mut().engine.set_touch(button, pressed);
                });
                let _ = el
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_prompt_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        // Fall screen
        if let Some(btn) = document.get_element_by_id("revive-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().revive();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Dialogue
        if let Some(btn) = document.get_element_by_id("dialogue-next-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().advance_dialogue();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Held inputs are dropped when the page stops receiving key-ups
    fn setup_focus_loss(
        window: &web_sys::Window,
        document: &web_sys::Document,
        game: Rc<RefCell<Game>>,
    ) {
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().engine.release_all();
                    log::info!("Inputs released (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: FocusEvent| {
                game.borrow_mut().engine.release_all();
                log::info!("Inputs released (window blur)");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().update(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use castle_dash::consts::{DIALOGUE_AUTO_END, DIALOGUE_FINAL_STEP};
    use castle_dash::input::TouchButton;
    use castle_dash::sim::ledge_hop;
    use castle_dash::{Engine, EngineError, RenderSnapshot, Settings};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Ten minutes of displayed frames
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    pub fn run() -> Result<(), EngineError> {
        let mut settings = Settings::load();
        // Nobody is watching to press "revive"
        settings.auto_revive = true;
        let mut engine = Engine::new(settings)?;

        let mut phase = engine.snapshot().phase;
        log::info!("Phase: {:?}", phase);

        let mut present = |snapshot: &RenderSnapshot| {
            if snapshot.phase != phase {
                phase = snapshot.phase;
                log::info!("Phase: {:?} (deaths {})", phase, snapshot.deaths);
            }
            if let Some(step) = snapshot.dialogue_step {
                log::debug!("Dialogue step {}", step);
            }
        };

        for frame in 0..MAX_FRAMES {
            if let Some(step) = engine.snapshot().dialogue_step {
                if step >= DIALOGUE_FINAL_STEP {
                    let snapshot = engine.snapshot();
                    log::info!(
                        "Finished after {} frames, {} ticks, {} deaths",
                        frame,
                        engine.state().time_ticks,
                        snapshot.deaths
                    );
                    return Ok(());
                }
                if step >= DIALOGUE_AUTO_END {
                    engine.acknowledge_dialogue(step + 1, &mut present);
                    continue;
                }
            }

            if let Some(segment) = engine.state().phase.segment() {
                let intent = ledge_hop(&engine.state().actor, engine.levels().get(segment));
                engine.set_touch(TouchButton::Left, intent.move_left);
                engine.set_touch(TouchButton::Right, intent.move_right);
                engine.set_touch(TouchButton::Jump, intent.jump);
            }

            engine.frame(FRAME_MS, &mut present);
        }

        log::warn!("Gave up after {} frames in {:?}", MAX_FRAMES, phase);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Castle Dash (native) starting...");
    log::info!("Playing headless with the autopilot - run with `trunk serve` for the web version");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
