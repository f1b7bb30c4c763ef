//! Browser host: canvas setup, event listeners, and the frame loop
//!
//! A mount owns everything it creates. `dispose()` cancels the animation
//! frame and detaches every listener, so a torn-down game leaves nothing
//! behind on the page.

use crate::config::{GameConfig, GameKind};
use crate::consts::{COLLECTOR_HEIGHT, COLLECTOR_WIDTH, FIELD_SIZE};
use crate::games;
use crate::render::CanvasSurface;
use crate::sim::{ArcadeGame, FrameInput, Ticker};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Event, EventTarget, HtmlCanvasElement, HtmlImageElement, KeyboardEvent, MouseEvent,
};

fn init_logging() {
    console_error_panic_hook::set_once();
    // A second mount re-initializing the logger is fine to ignore.
    let _ = console_log::init_with_level(log::Level::Info);
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

/// An attached DOM listener that detaches itself when dropped
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(Event)>,
    ) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

struct Mount {
    game: Box<dyn ArcadeGame>,
    surface: CanvasSurface,
    canvas: HtmlCanvasElement,
    input: FrameInput,
    ticker: Ticker,
    raf_id: Option<i32>,
    raf_closure: Option<Closure<dyn FnMut(f64)>>,
    listeners: Vec<Listener>,
}

impl Mount {
    /// One animation frame: run fixed substeps, draw once. The ticker
    /// consumes edge inputs on the first substep and latches them across
    /// frames that run none.
    fn frame(&mut self, now_ms: f64) {
        self.ticker
            .advance(now_ms, self.game.as_mut(), &mut self.input);
        self.game.render(&mut self.surface, now_ms);
    }

    fn teardown(&mut self) {
        if let Some(id) = self.raf_id.take() {
            if let Ok(w) = window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
        self.raf_closure = None;
        self.listeners.clear();
    }
}

/// A running game bound to a canvas. Obtained from [`mount`] or
/// [`mount_collector`]; call [`GameHandle::dispose`] to tear it down.
#[wasm_bindgen]
pub struct GameHandle {
    mount: Rc<RefCell<Mount>>,
}

/// Bind the configured game variant to the canvas with the given DOM id
/// and start its frame loop.
#[wasm_bindgen]
pub fn mount(canvas_id: &str, config_json: &str) -> Result<GameHandle, JsValue> {
    init_logging();
    let config = GameConfig::from_json(config_json)
        .map_err(|e| JsValue::from_str(&format!("bad config: {e}")))?;
    log::info!(
        "mounting {} for {}",
        config.game_type.as_tag(),
        config.brand.name
    );

    let seed = js_sys::Date::now() as u64;
    let game = games::build(&config, seed);
    let logo = load_logo(&config)?;
    start(canvas_id, game, Vec2::splat(FIELD_SIZE), logo)
}

/// Bind the widescreen collector game, branded only by company name.
#[wasm_bindgen]
pub fn mount_collector(canvas_id: &str, company: Option<String>) -> Result<GameHandle, JsValue> {
    init_logging();
    let seed = js_sys::Date::now() as u64;
    let company = company.unwrap_or_else(|| "Brand Arcade".to_string());
    let game = Box::new(games::Collector::new(&company, seed));
    start(
        canvas_id,
        game,
        Vec2::new(COLLECTOR_WIDTH, COLLECTOR_HEIGHT),
        None,
    )
}

fn load_logo(config: &GameConfig) -> Result<Option<HtmlImageElement>, JsValue> {
    // Only the card game draws the logo, but loading is harmless elsewhere.
    let Some(url) = &config.brand.logo_url else {
        return Ok(None);
    };
    if config.game_type != GameKind::MemoryMatch {
        return Ok(None);
    }
    let img = HtmlImageElement::new()?;
    img.set_cross_origin(Some("anonymous"));
    img.set_src(url);
    Ok(Some(img))
}

fn start(
    canvas_id: &str,
    game: Box<dyn ArcadeGame>,
    field: Vec2,
    logo: Option<HtmlImageElement>,
) -> Result<GameHandle, JsValue> {
    let w = window()?;
    let document = w
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element #{canvas_id}")))?
        .dyn_into()?;
    canvas.set_width(field.x as u32);
    canvas.set_height(field.y as u32);
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()?;

    let mount = Rc::new(RefCell::new(Mount {
        game,
        surface: CanvasSurface::new(ctx, logo),
        canvas: canvas.clone(),
        input: FrameInput::default(),
        ticker: Ticker::new(),
        raf_id: None,
        raf_closure: None,
        listeners: Vec::new(),
    }));

    attach_listeners(&mount, &w, &canvas)?;
    start_frame_loop(&mount, &w)?;

    Ok(GameHandle { mount })
}

fn attach_listeners(
    mount: &Rc<RefCell<Mount>>,
    w: &web_sys::Window,
    canvas: &HtmlCanvasElement,
) -> Result<(), JsValue> {
    let keydown = {
        let mount = Rc::clone(mount);
        Closure::wrap(Box::new(move |event: Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = event.key().to_lowercase();
            let mut m = mount.borrow_mut();
            if m.input.held.set_key(&key, true) {
                event.prevent_default();
            }
            if (key == " " || key == "spacebar") && !event.repeat() {
                m.input.primary = true;
            }
        }) as Box<dyn FnMut(Event)>)
    };
    let keyup = {
        let mount = Rc::clone(mount);
        Closure::wrap(Box::new(move |event: Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = event.key().to_lowercase();
            if mount.borrow_mut().input.held.set_key(&key, false) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(Event)>)
    };
    let mousedown = {
        let mount = Rc::clone(mount);
        Closure::wrap(Box::new(move |event: Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let mut m = mount.borrow_mut();
            let rect = m.canvas.get_bounding_client_rect();
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                return;
            }
            // Map CSS pixels to the canvas coordinate space.
            let sx = m.canvas.width() as f64 / rect.width();
            let sy = m.canvas.height() as f64 / rect.height();
            let x = (event.client_x() as f64 - rect.left()) * sx;
            let y = (event.client_y() as f64 - rect.top()) * sy;
            m.input.clicks.push(Vec2::new(x as f32, y as f32));
        }) as Box<dyn FnMut(Event)>)
    };

    let mut m = mount.borrow_mut();
    m.listeners
        .push(Listener::attach(w.as_ref(), "keydown", keydown)?);
    m.listeners
        .push(Listener::attach(w.as_ref(), "keyup", keyup)?);
    m.listeners
        .push(Listener::attach(canvas.as_ref(), "mousedown", mousedown)?);
    Ok(())
}

fn start_frame_loop(mount: &Rc<RefCell<Mount>>, w: &web_sys::Window) -> Result<(), JsValue> {
    let raf_mount = Rc::clone(mount);
    let closure = Closure::wrap(Box::new(move |now_ms: f64| {
        let mut m = raf_mount.borrow_mut();
        if m.raf_closure.is_none() {
            // Disposed between scheduling and delivery.
            return;
        }
        m.frame(now_ms);
        let next = {
            let closure = m.raf_closure.as_ref();
            closure.and_then(|c| {
                window()
                    .ok()
                    .and_then(|w| w.request_animation_frame(c.as_ref().unchecked_ref()).ok())
            })
        };
        m.raf_id = next;
    }) as Box<dyn FnMut(f64)>);

    let id = w.request_animation_frame(closure.as_ref().unchecked_ref())?;
    let mut m = mount.borrow_mut();
    m.raf_id = Some(id);
    m.raf_closure = Some(closure);
    Ok(())
}

#[wasm_bindgen]
impl GameHandle {
    /// Current score, readable from the host page
    pub fn score(&self) -> u32 {
        self.mount.borrow().game.score()
    }

    /// Stop the frame loop and detach all listeners. The handle is inert
    /// afterwards.
    pub fn dispose(&mut self) {
        self.mount.borrow_mut().teardown();
    }
}

impl Drop for GameHandle {
    fn drop(&mut self) {
        self.mount.borrow_mut().teardown();
    }
}
