//! Animal shatter: click the animal, it bursts into gravity particles and a
//! different animal fades in.
//!
//! While any particle from the previous burst is alive further clicks are
//! ignored, so button mashing cannot pile up bursts.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, window};

use crate::ANIMALS;
use crate::config::{ParticleConfig, ShatterConfig};
use crate::dom;
use crate::games::pick_different;
use crate::particles::{self, ParticleSystem, Point};
use crate::rng::GameRng;

pub struct ShatterGame {
    cfg: ShatterConfig,
    count: u32,
    current: &'static str,
    particles: ParticleSystem,
}

impl ShatterGame {
    pub fn new(cfg: ShatterConfig, particle_cfg: ParticleConfig, current: &str) -> Self {
        let current = ANIMALS.iter().copied().find(|a| *a == current).unwrap_or(ANIMALS[0]);
        Self { cfg, count: 0, current, particles: ParticleSystem::new(particle_cfg) }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn current(&self) -> &'static str {
        self.current
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    fn center(&self) -> Point {
        let half = self.cfg.canvas_size as f64 / 2.0;
        Point::new(half, half)
    }

    /// Returns the animal to show next, or `None` when the click was swallowed
    /// by the spam guard.
    pub fn click(&mut self, rng: &mut GameRng) -> Option<&'static str> {
        if !self.particles.is_idle() {
            return None;
        }
        self.count += 1;
        let center = self.center();
        self.particles.emit(center, self.cfg.particles_per_click, rng);
        self.current = pick_different(ANIMALS, self.current, rng);
        Some(self.current)
    }

    pub fn step(&mut self) -> bool {
        self.particles.step()
    }

    /// Drop a burst that can no longer be animated so clicks are accepted again.
    pub fn abandon_burst(&mut self) {
        self.particles.clear();
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub struct ShatterView {
    game: ShatterGame,
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
    frame_pending: bool,
}

impl ShatterView {
    /// Size the canvas and grab its context. Safe to repeat on every activation.
    pub fn init_canvas(&mut self) -> Result<(), JsValue> {
        let size = self.game.cfg.canvas_size;
        self.canvas.set_width(size);
        self.canvas.set_height(size);
        let ctx: CanvasRenderingContext2d = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        self.ctx = Some(ctx);
        Ok(())
    }

    /// One animation frame: step, then draw what survived.
    fn frame(&mut self) -> bool {
        let live = self.game.step();
        if let Some(ctx) = &self.ctx {
            let w = self.canvas.width() as f64;
            let h = self.canvas.height() as f64;
            particles::render(ctx, w, h, self.game.particles().particles());
        }
        if !live {
            self.frame_pending = false;
        }
        live
    }
}

pub struct ShatterHandle {
    view: Rc<RefCell<ShatterView>>,
}

impl ShatterHandle {
    pub fn on_activate(&self) {
        if let Err(e) = self.view.borrow_mut().init_canvas() {
            log::warn!("shatter canvas init failed: {e:?}");
        }
    }
}

/// Schedule the next frame. On failure the loop is marked stopped so the
/// next accepted click tries again.
fn request_frame(f: &FrameCallback, view: &RefCell<ShatterView>) {
    let requested = match (window(), f.borrow().as_ref()) {
        (Some(w), Some(cb)) => w.request_animation_frame(cb.as_ref().unchecked_ref()),
        (None, _) => Err(JsValue::from_str("no window")),
        (_, None) => Err(JsValue::from_str("frame callback missing")),
    };
    if let Err(e) = requested {
        log::warn!("shatter: requestAnimationFrame failed: {e:?}");
        let mut view = view.borrow_mut();
        view.game.abandon_burst();
        view.frame_pending = false;
    }
}

pub fn install(
    doc: &Document,
    cfg: &ShatterConfig,
    particle_cfg: &ParticleConfig,
    rng: Rc<RefCell<GameRng>>,
) -> Result<Option<ShatterHandle>, JsValue> {
    let (Some(container), Some(target), Some(canvas), Some(display)) = (
        dom::by_id::<Element>(doc, "shatterContainer"),
        dom::by_id::<HtmlElement>(doc, "shatter-target"),
        dom::by_id::<HtmlCanvasElement>(doc, "shatterCanvas"),
        dom::by_id::<Element>(doc, "shatterCount"),
    ) else {
        return Ok(None);
    };

    let shown = target.text_content().unwrap_or_default();
    let mut view = ShatterView {
        game: ShatterGame::new(cfg.clone(), particle_cfg.clone(), shown.trim()),
        canvas,
        ctx: None,
        frame_pending: false,
    };
    view.init_canvas()?;
    let view = Rc::new(RefCell::new(view));

    // The frame closure lives for the page lifetime and re-arms itself while
    // particles remain; it is never cancelled, it just stops requesting frames.
    let frame: FrameCallback = Rc::new(RefCell::new(None));
    {
        let f = frame.clone();
        let v = view.clone();
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
            let live = v.borrow_mut().frame();
            if live {
                request_frame(&f, &v);
            }
        }) as Box<dyn FnMut(f64)>));
    }

    let swap_delay = cfg.swap_delay_ms;
    let v = view.clone();
    dom::listen(&container, "click", move |_evt| {
        let (next, count, start_loop) = {
            let mut view = v.borrow_mut();
            let Some(next) = view.game.click(&mut rng.borrow_mut()) else { return };
            let start_loop = !view.frame_pending;
            view.frame_pending = true;
            (next, view.game.count(), start_loop)
        };
        dom::set_text(&display, &count.to_string());
        if start_loop {
            request_frame(&frame, &v);
        }

        dom::set_style(&target, &[("opacity", "0"), ("transform", "scale(0.1)")]);
        let target = target.clone();
        dom::set_timeout(swap_delay, move || {
            dom::set_text(&target, next);
            dom::set_style(&target, &[("opacity", "1"), ("transform", "scale(1)")]);
        });
    })?;

    Ok(Some(ShatterHandle { view }))
}
