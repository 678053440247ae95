//! Finger Stars entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use finger_stars::consts::*;
    use finger_stars::hud::{self, HudText};
    use finger_stars::input::LatestHands;
    use finger_stars::renderer::vertex::{colors, css_rgba};
    use finger_stars::renderer::{RenderState, StarPainter};
    use finger_stars::sim::{GameEvent, GameState, TickInput, tick};

    const VIDEO_ID: &str = "video";

    // Camera and ml5 handPose live on the JS side; detections come back as JSON
    #[wasm_bindgen(inline_js = "
        export function start_camera(video_id, width, height) {
            const video = document.getElementById(video_id);
            navigator.mediaDevices
                .getUserMedia({ video: { width, height }, audio: false })
                .then((stream) => {
                    video.srcObject = stream;
                    return video.play();
                })
                .catch((e) => console.error('Camera unavailable:', e));
        }

        export function start_hand_tracking(video_id, on_hands) {
            const video = document.getElementById(video_id);
            const handPose = ml5.handPose({ flipped: true }, () => {
                handPose.detectStart(video, (results) => {
                    const hands = results.map((hand) => ({
                        keypoints: hand.keypoints.map((k) => ({ x: k.x, y: k.y })),
                    }));
                    on_hands(JSON.stringify(hands), video.videoWidth, video.videoHeight);
                });
            });
        }
    ")]
    extern "C" {
        fn start_camera(video_id: &str, width: u32, height: u32);
        fn start_hand_tracking(
            video_id: &str,
            on_hands: &Closure<dyn FnMut(String, u32, u32)>,
        );
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        painter: StarPainter,
        hands: LatestHands,
        /// Last text written to the DOM, to skip redundant updates
        last_hud: Option<HudText>,
    }

    impl Game {
        fn new(seed: u64, start_ms: f64, hands: LatestHands) -> Self {
            Self {
                state: GameState::new(seed, start_ms),
                render_state: None,
                painter: StarPainter::new(seed ^ 0x5eed),
                hands,
                last_hud: None,
            }
        }

        /// Run one simulation frame against the newest hand detection
        fn update(&mut self, time: f64) {
            let snapshot = self.hands.snapshot();
            let input = TickInput {
                now_ms: time,
                fingertips: snapshot.fingertips(),
            };

            let outcome = tick(&mut self.state, &input);
            match outcome.event {
                Some(GameEvent::ScoreTick(score)) => log::info!("Score: {}", score),
                Some(GameEvent::GameOver { score }) => log::info!(
                    "Game over with score {} ({} stars on screen)",
                    score,
                    self.state.grid.particle_count()
                ),
                None => {}
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = self.painter.vertices(&self.state);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            let text = HudText::from_state(&self.state);
            if self.last_hud.as_ref() == Some(&text) {
                return;
            }

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&text.score));
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                match text.game_over {
                    Some(message) => {
                        el.set_text_content(Some(message));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }

            self.last_hud = Some(text);
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    /// Position and style the overlay text
    fn style_hud(document: &Document) {
        if let Some(root) = document.document_element() {
            let _ = root.set_attribute(
                "style",
                &format!("background: {};", css_rgba(colors::BACKGROUND)),
            );
        }
        if let Some(el) = document.get_element_by_id("hud-score") {
            let _ = el.set_attribute(
                "style",
                &format!(
                    "position: absolute; top: {m}px; right: {m}px; text-align: right; \
                     font-size: {}px; color: {};",
                    hud::SCORE_FONT_PX,
                    hud::SCORE_COLOR,
                    m = hud::SCORE_MARGIN_PX,
                ),
            );
        }
        if let Some(el) = document.get_element_by_id("game-over") {
            let _ = el.set_attribute(
                "style",
                &format!(
                    "position: absolute; inset: 0; display: flex; align-items: center; \
                     justify-content: center; font-size: {}px; color: {};",
                    hud::GAME_OVER_FONT_PX,
                    hud::GAME_OVER_COLOR,
                ),
            );
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        log::info!("Finger Stars starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Fixed logical canvas, backed at device resolution
        let dpr = window.device_pixel_ratio();
        let width = (CANVAS_WIDTH as f64 * dpr) as u32;
        let height = (CANVAS_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        style_hud(&document);

        // Hand detections flow into the newest-wins slot, in canvas pixels
        let hands = LatestHands::new();
        start_camera(VIDEO_ID, CANVAS_WIDTH, CANVAS_HEIGHT);
        {
            let hands = hands.clone();
            let canvas_size = Vec2::new(CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32);
            let on_hands = Closure::<dyn FnMut(String, u32, u32)>::new(
                move |json: String, video_width: u32, video_height: u32| {
                    let video_size = Vec2::new(video_width as f32, video_height as f32);
                    if let Err(e) = hands.publish_json_scaled(&json, video_size, canvas_size) {
                        log::warn!("Ignoring malformed hand detection: {}", e);
                    }
                },
            );
            start_hand_tracking(VIDEO_ID, &on_hands);
            on_hands.forget();
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, now_ms(), hands)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32),
        )
        .await
        .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Finger Stars running!");
        Ok(())
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
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use finger_stars::demo::{ascii_grid, run_session};

    env_logger::init();
    log::info!("Finger Stars (native) starting...");
    log::info!("No camera on native - running a scripted headless session");

    let seed = 42;
    let summary = run_session(seed, 60 * 60);
    let state = &summary.state;

    log::info!(
        "Session ended after {} frames: score {}, phase {:?}, {} stars",
        summary.frames,
        state.score.score(),
        state.phase(),
        state.grid.particle_count()
    );
    match serde_json::to_string(&state.score) {
        Ok(json) => log::debug!("Final score clock: {}", json),
        Err(e) => log::warn!("Could not serialize score clock: {}", e),
    }

    println!("{}", ascii_grid(&state.grid));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
