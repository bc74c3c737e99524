//! Browser host
//!
//! Sizes the canvas, sets up WebGPU, and runs the animation-frame loop. The
//! running app lives in a thread-local so `shutdown()` can tear it down:
//! cancel the pending frame and remove every listener it registered.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, TouchEvent, Window};

use super::input::{KeyCommand, key_command, touch_directions};
use super::storage::LocalStorageStore;
use crate::engine::{Engine, EngineListener, StateUpdate};
use crate::error::EngineError;
use crate::renderer::{Mesh, RenderState};
use crate::settings::Settings;
use crate::sim::RunState;
use crate::tuning::Tuning;

thread_local! {
    static APP: RefCell<Option<WebApp>> = const { RefCell::new(None) };
}

/// Mirrors engine updates into the page's HUD elements, when present
struct HudListener {
    document: Document,
}

impl HudListener {
    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }
}

impl EngineListener for HudListener {
    fn on_state_change(&mut self, update: &StateUpdate) {
        self.set_text("score", &update.score.to_string());
        self.set_text("high-score", &update.high_score.to_string());
        self.set_text("combo", &update.combo.to_string());
        if let Some(el) = self.document.get_element_by_id("game-over") {
            let class = if update.run_state == RunState::GameOver {
                ""
            } else {
                "hidden"
            };
            let _ = el.set_attribute("class", class);
        }
    }

    fn on_time_update(&mut self, percent: f32) {
        if let Some(el) = self.document.get_element_by_id("time-fill") {
            let _ = el.set_attribute("style", &format!("width: {:.1}%", percent));
        }
    }
}

/// Engine plus the GPU objects it paints through
struct App {
    engine: Engine<LocalStorageStore>,
    render_state: RenderState,
    mesh: Mesh,
}

impl App {
    fn frame(&mut self, time: f64) {
        self.engine.frame(time);

        self.mesh.clear();
        self.engine.render(&mut self.mesh, time);

        match self.render_state.render(&self.mesh) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let config = &self.render_state.config;
                let (w, h) = (config.width, config.height);
                let logical = self.render_state.logical_size;
                self.render_state.resize(w, h, logical);
            }
            Err(e) => log::error!("{}", EngineError::from(e)),
        }
    }
}

/// Handle to the running game
pub struct WebApp {
    app: Rc<RefCell<App>>,
    window: Window,
    canvas: HtmlCanvasElement,
    raf_id: Rc<Cell<Option<i32>>>,
    frame_cb: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
    resize_cb: Closure<dyn FnMut(web_sys::Event)>,
    keydown_cb: Closure<dyn FnMut(KeyboardEvent)>,
    touch_cb: Closure<dyn FnMut(TouchEvent)>,
    destroyed: bool,
}

impl WebApp {
    /// Cancel the pending frame, drop the listeners, stop the engine.
    /// Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.frame_cb.borrow_mut().take();

        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.resize_cb.as_ref().unchecked_ref());
        let _ = self.window.remove_event_listener_with_callback(
            "keydown",
            self.keydown_cb.as_ref().unchecked_ref(),
        );
        let _ = self.canvas.remove_event_listener_with_callback(
            "touchstart",
            self.touch_cb.as_ref().unchecked_ref(),
        );

        self.app.borrow_mut().engine.destroy();
        log::info!("Web app torn down");
    }
}

impl Drop for WebApp {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Canvas backing size (device pixels) and logical size (CSS pixels)
fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) -> (u32, u32, (f32, f32)) {
    let dpr = window.device_pixel_ratio();
    let client_w = canvas.client_width().max(1);
    let client_h = canvas.client_height().max(1);
    let width = (client_w as f64 * dpr) as u32;
    let height = (client_h as f64 * dpr) as u32;
    canvas.set_width(width);
    canvas.set_height(height);
    (width, height, (client_w as f32, client_h as f32))
}

/// Boot the game on `#canvas` and keep it running until `shutdown()`
pub async fn run() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("logger init failed: {}", e).into());
    }

    log::info!("Sky Stairs starting...");

    match start().await {
        Ok(app) => {
            APP.with(|slot| *slot.borrow_mut() = Some(app));
            log::info!("Sky Stairs running!");
        }
        Err(e) => log::error!("Startup failed: {}", e),
    }
}

/// Tear down the running game
#[wasm_bindgen]
pub fn shutdown() {
    if let Some(mut app) = APP.with(|slot| slot.borrow_mut().take()) {
        app.destroy();
    }
}

async fn start() -> Result<WebApp, EngineError> {
    let window = web_sys::window().ok_or(EngineError::MissingHost("window"))?;
    let document = window
        .document()
        .ok_or(EngineError::MissingHost("document"))?;

    if let Some(loading) = document.get_element_by_id("loading") {
        let _ = loading.set_attribute("class", "hidden");
    }

    let canvas: HtmlCanvasElement = document
        .get_element_by_id("canvas")
        .ok_or(EngineError::MissingHost("canvas"))?
        .dyn_into()
        .map_err(|_| EngineError::MissingHost("canvas element"))?;

    let (width, height, logical) = fit_canvas(&window, &canvas);

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
        ..Default::default()
    });
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await?;
    log::info!("Using adapter: {:?}", adapter.get_info().name);

    let render_state = RenderState::new(surface, &adapter, width, height, logical).await?;

    let seed = js_sys::Date::now() as u64;
    let engine = Engine::new(
        LocalStorageStore::new(),
        Box::new(HudListener {
            document: document.clone(),
        }),
        Vec2::new(logical.0, logical.1),
        seed,
        Tuning::default(),
        Settings::load(),
    );

    let app = Rc::new(RefCell::new(App {
        engine,
        render_state,
        mesh: Mesh::new(),
    }));

    let resize_cb = {
        let app = app.clone();
        let window = window.clone();
        let canvas = canvas.clone();
        Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (w, h, logical) = fit_canvas(&window, &canvas);
            let mut app = app.borrow_mut();
            app.render_state.resize(w, h, logical);
            app.engine.resize(logical.0, logical.1);
        })
    };
    window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())?;

    let keydown_cb = {
        let app = app.clone();
        Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(command) = key_command(&event.key()) else {
                return;
            };
            event.prevent_default();
            let mut app = app.borrow_mut();
            match command {
                KeyCommand::Move(dir) => {
                    app.engine.handle_direction(dir);
                }
                KeyCommand::Restart => {
                    if app.engine.state().run_state == RunState::GameOver {
                        app.engine.restart();
                    }
                }
                KeyCommand::ToggleAutopilot => {
                    app.engine.toggle_autopilot();
                }
                KeyCommand::CycleQuality => {
                    let mut settings = app.engine.settings().clone();
                    settings.quality = settings.quality.next();
                    settings.save();
                    log::info!("Quality: {}", settings.quality.as_str());
                    app.engine.set_settings(settings);
                }
                KeyCommand::ToggleReducedMotion => {
                    let mut settings = app.engine.settings().clone();
                    settings.reduced_motion = !settings.reduced_motion;
                    settings.save();
                    log::info!("Reduced motion: {}", settings.reduced_motion);
                    app.engine.set_settings(settings);
                }
            }
        })
    };
    window.add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())?;

    let touch_cb = {
        let app = app.clone();
        let canvas = canvas.clone();
        Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            event.prevent_default();
            let rect = canvas.get_bounding_client_rect();
            let landed = event.changed_touches();
            let xs = (0..landed.length())
                .filter_map(|i| landed.get(i))
                .map(|touch| touch.client_x() as f32 - rect.left() as f32);
            let dirs = touch_directions(xs, canvas.client_width() as f32);

            let mut app = app.borrow_mut();
            for dir in dirs {
                app.engine.handle_direction(dir);
            }
        })
    };
    canvas.add_event_listener_with_callback("touchstart", touch_cb.as_ref().unchecked_ref())?;

    // Self-scheduling frame callback; the cell breaks the cycle on destroy
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let frame_cb: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    {
        let app = app.clone();
        let window_loop = window.clone();
        let raf_id = raf_id.clone();
        let frame_cb_inner = frame_cb.clone();
        *frame_cb.borrow_mut() = Some(Closure::new(move |time: f64| {
            raf_id.set(None);
            app.borrow_mut().frame(time);
            if let Some(cb) = frame_cb_inner.borrow().as_ref()
                && let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref())
            {
                raf_id.set(Some(id));
            }
        }));
    }
    if let Some(cb) = frame_cb.borrow().as_ref() {
        raf_id.set(Some(window.request_animation_frame(cb.as_ref().unchecked_ref())?));
    }

    Ok(WebApp {
        app,
        window,
        canvas,
        raf_id,
        frame_cb,
        resize_cb,
        keydown_cb,
        touch_cb,
        destroyed: false,
    })
}
