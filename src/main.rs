//! Flappy Web entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, Document, EventTarget, HtmlCanvasElement, KeyboardEvent,
        MouseEvent,
    };

    use flappy_web::Game;
    use flappy_web::audio::WebAudio;
    use flappy_web::platform::{
        InputSource, LocalStorage, RuntimeSlot, Stoppable, is_activation_key, is_mute_key,
    };
    use flappy_web::renderer::{RenderError, RenderState, fit_to_viewport};

    type WebGame = Game<WebAudio, LocalStorage>;

    /// Game session plus the surface it draws to
    struct Shell {
        game: WebGame,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
    }

    impl Shell {
        /// One update and one render
        fn frame(&mut self, time: f64) {
            self.game.frame(time);
            if let Some(ref mut render_state) = self.render_state {
                render_state.present(&self.game.scene());
            }
        }

        /// Scale the canvas to the window, keeping the world aspect ratio
        fn fit_canvas(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let vw = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            let vh = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            let layout = fit_to_viewport(
                vw,
                vh,
                window.device_pixel_ratio(),
                self.game.settings().max_device_pixel_ratio,
            );

            let style = self.canvas.style();
            let _ = style.set_property("width", &format!("{}px", layout.css_width));
            let _ = style.set_property("height", &format!("{}px", layout.css_height));
            self.canvas.set_width(layout.pixel_width);
            self.canvas.set_height(layout.pixel_height);

            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(layout.pixel_width, layout.pixel_height);
            }
            log::debug!(
                "Canvas {}x{} (scale {:.2}, dpr {})",
                layout.pixel_width,
                layout.pixel_height,
                layout.scale,
                layout.dpr
            );
        }
    }

    /// An attached DOM listener that can be removed again
    struct Listener {
        target: EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(web_sys::Event)>,
    }

    impl Listener {
        fn attach(
            target: &EventTarget,
            kind: &'static str,
            handler: impl FnMut(web_sys::Event) + 'static,
        ) -> Result<Self, JsValue> {
            let callback = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
            // Non-passive so preventDefault can suppress scrolling and zooming
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                callback.as_ref().unchecked_ref(),
                &options,
            )?;
            Ok(Self {
                target: target.clone(),
                kind,
                callback,
            })
        }

        fn detach(&self) {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
        }
    }

    /// Self-rescheduling requestAnimationFrame loop
    struct FrameLoop {
        raf_id: Rc<Cell<Option<i32>>>,
        callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
    }

    impl FrameLoop {
        fn start(shell: Rc<RefCell<Shell>>) -> Result<Self, JsValue> {
            let raf_id = Rc::new(Cell::new(None));
            let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> =
                Rc::new(RefCell::new(None));

            let next = callback.clone();
            let id = raf_id.clone();
            *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                id.set(None);
                shell.borrow_mut().frame(time);
                // Cleared by stop(), after which nothing is rescheduled
                if let Some(cb) = next.borrow().as_ref() {
                    id.set(request_frame(cb).ok());
                }
            }));

            if let Some(cb) = callback.borrow().as_ref() {
                raf_id.set(Some(request_frame(cb)?));
            }
            Ok(Self { raf_id, callback })
        }

        fn stop(&self) {
            if let Some(id) = self.raf_id.take()
                && let Some(window) = web_sys::window()
            {
                let _ = window.cancel_animation_frame(id);
            }
            // Dropping the closure also breaks its reference to itself
            self.callback.borrow_mut().take();
        }
    }

    fn request_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
        web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))?
            .request_animation_frame(callback.as_ref().unchecked_ref())
    }

    /// Everything that keeps the game alive in the page
    struct Runtime {
        frame_loop: FrameLoop,
        listeners: Vec<Listener>,
    }

    impl Stoppable for Runtime {
        fn stop(&mut self) {
            self.frame_loop.stop();
            for listener in self.listeners.drain(..) {
                listener.detach();
            }
        }
    }

    thread_local! {
        static RUNTIME: RefCell<RuntimeSlot<Runtime>> = const { RefCell::new(RuntimeSlot::new()) };
    }

    /// Tear down: no further frames, no listeners left behind
    pub fn shutdown() {
        if RUNTIME.with(|r| r.borrow_mut().shutdown()) {
            log::info!("Flappy Web stopped");
        }
    }

    fn find_or_create_canvas(document: &Document) -> Result<HtmlCanvasElement, JsValue> {
        if let Some(el) = document.get_element_by_id("canvas") {
            return el
                .dyn_into::<HtmlCanvasElement>()
                .map_err(|_| JsValue::from_str("#canvas is not a canvas element"));
        }
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")?
            .dyn_into()
            .map_err(|_| JsValue::from_str("failed to create canvas"))?;
        canvas.set_id("canvas");
        document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&canvas)?;
        Ok(canvas)
    }

    fn style_page(document: &Document, canvas: &HtmlCanvasElement) {
        if let Some(body) = document.body() {
            let style = body.style();
            for (name, value) in [
                ("margin", "0"),
                ("height", "100vh"),
                ("display", "flex"),
                ("align-items", "center"),
                ("justify-content", "center"),
                ("background", "#000"),
                ("overflow", "hidden"),
            ] {
                let _ = style.set_property(name, value);
            }
        }
        let style = canvas.style();
        for (name, value) in [
            ("display", "block"),
            ("image-rendering", "pixelated"),
            ("touch-action", "none"),
            ("user-select", "none"),
        ] {
            let _ = style.set_property(name, value);
        }
    }

    async fn init_gpu(canvas: &HtmlCanvasElement) -> Result<RenderState, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, canvas.width(), canvas.height()).await
    }

    fn setup_input_handlers(
        target: &EventTarget,
        shell: &Rc<RefCell<Shell>>,
    ) -> Result<Vec<Listener>, JsValue> {
        let mut listeners = Vec::new();

        // Pointer (mouse, pen, and touch on browsers with pointer events)
        {
            let shell = shell.clone();
            listeners.push(Listener::attach(target, "pointerdown", move |event| {
                if let Some(mouse) = event.dyn_ref::<MouseEvent>()
                    && mouse.button() != 0
                {
                    return;
                }
                event.prevent_default();
                shell
                    .borrow_mut()
                    .game
                    .press(InputSource::Pointer, event.time_stamp(), false);
            })?);
        }

        // Touch start
        {
            let shell = shell.clone();
            listeners.push(Listener::attach(target, "touchstart", move |event| {
                event.prevent_default();
                shell
                    .borrow_mut()
                    .game
                    .press(InputSource::Touch, event.time_stamp(), false);
            })?);
        }

        // Keyboard
        {
            let shell = shell.clone();
            listeners.push(Listener::attach(target, "keydown", move |event| {
                let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let code = key_event.code();
                if is_activation_key(&code, &key_event.key()) {
                    event.prevent_default();
                    shell.borrow_mut().game.press(
                        InputSource::Keyboard,
                        event.time_stamp(),
                        key_event.repeat(),
                    );
                } else if is_mute_key(&code) && !key_event.repeat() {
                    shell.borrow_mut().game.toggle_mute();
                }
            })?);
        }

        // Resize
        {
            let shell = shell.clone();
            listeners.push(Listener::attach(target, "resize", move |_event| {
                shell.borrow_mut().fit_canvas();
            })?);
        }

        Ok(listeners)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Flappy Web starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        // A restart must not leave the old loop or its listeners running
        shutdown();

        let canvas = find_or_create_canvas(&document)?;
        style_page(&document, &canvas);

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(seed, WebAudio::new(), LocalStorage);
        let shell = Rc::new(RefCell::new(Shell {
            game,
            render_state: None,
            canvas: canvas.clone(),
        }));
        shell.borrow_mut().fit_canvas();

        // Without a GPU the game still runs (sound, input, scores), just unseen
        match init_gpu(&canvas).await {
            Ok(render_state) => shell.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Rendering unavailable: {}", e),
        }

        let listeners = setup_input_handlers(window.as_ref(), &shell)?;
        let frame_loop = FrameLoop::start(shell)?;

        let generation = RUNTIME.with(|r| {
            r.borrow_mut().install(Runtime {
                frame_loop,
                listeners,
            })
        });

        log::info!("Flappy Web running! (generation {})", generation);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    //! Autopilot runs without a window, for smoke-testing the game loop

    use flappy_web::Game;
    use flappy_web::audio::{Cue, RecordingAudio};
    use flappy_web::consts::*;
    use flappy_web::platform::MemoryStorage;
    use flappy_web::sim::{GamePhase, GameState};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up on a run after this much simulated time
    const MAX_RUN_MS: f64 = 120_000.0;

    /// Height the autopilot holds: a little below the middle of the next gap
    fn target_y(state: &GameState) -> f32 {
        state
            .pipes
            .iter()
            .find(|p| p.x + PIPE_WIDTH > state.bird.x - BIRD_WIDTH / 2.0)
            .map(|p| p.top + PIPE_GAP * 0.6)
            .unwrap_or(WORLD_HEIGHT / 2.0)
    }

    fn should_flap(state: &GameState) -> bool {
        state.bird.vy > 0.0 && state.bird.y > target_y(state)
    }

    pub fn run(seed: u64, runs: u32) {
        let mut game = Game::new(seed, RecordingAudio::new(), MemoryStorage::new());
        let mut t = 0.0;

        for run in 1..=runs {
            game.activate();
            let started = t;
            while game.phase() == GamePhase::Playing && t - started < MAX_RUN_MS {
                if should_flap(game.state()) {
                    game.activate();
                }
                game.frame(t);
                t += FRAME_MS;
            }

            let score = game.state().score;
            let seconds = (t - started) / 1000.0;
            log::info!("Run {} finished: score {} after {:.1} s", run, score, seconds);
            println!("Run {}: score {} ({:.1} s)", run, score, seconds);

            if game.phase() != GamePhase::GameOver {
                println!("Autopilot still alive after {:.0} s, stopping", seconds);
                break;
            }
            game.activate();
        }

        let audio = game.audio();
        println!(
            "Best {} | wing {} point {} hit {} die {}",
            game.best_score(),
            audio.count(Cue::Wing),
            audio.count(Cue::Point),
            audio.count(Cue::Hit),
            audio.count(Cue::Die),
        );
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        web_sys::console::error_1(&e);
    }
}

/// Stop the game loop and detach input listeners
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn stop() {
    wasm_game::shutdown();
}

/// Start a fresh session after `stop()`, replacing any running one
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn restart() {
    if let Err(e) = wasm_game::run().await {
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Web (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    headless::run(seed, 5);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
