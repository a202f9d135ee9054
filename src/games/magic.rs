//! Magic button: every click bumps a counter and sprays a handful of CSS dots.
//!
//! The dots are driven by CSS transitions, not by the particle stepper, and are
//! not capped: rapid clicking simply stacks more short-lived elements.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use crate::config::MagicConfig;
use crate::dom;
use crate::games::hsl;
use crate::rng::GameRng;

/// One expanding dot: where it travels to (relative to the click) and how it looks.
#[derive(Clone, Debug, PartialEq)]
pub struct BurstDot {
    pub size: f64,
    pub hue: f64,
    pub dx: f64,
    pub dy: f64,
}

pub struct MagicButton {
    cfg: MagicConfig,
    presses: u32,
}

impl MagicButton {
    pub fn new(cfg: MagicConfig) -> Self {
        Self { cfg, presses: 0 }
    }

    pub fn presses(&self) -> u32 {
        self.presses
    }

    pub fn press(&mut self, rng: &mut GameRng) -> Vec<BurstDot> {
        self.presses += 1;
        (0..self.cfg.dots_per_click)
            .map(|_| {
                let size = rng.range(self.cfg.min_size, self.cfg.max_size);
                let hue = rng.hue();
                let angle = rng.angle();
                let dist = rng.range(self.cfg.min_distance, self.cfg.max_distance);
                BurstDot { size, hue, dx: angle.cos() * dist, dy: angle.sin() * dist }
            })
            .collect()
    }
}

pub fn install(doc: &Document, cfg: &MagicConfig, rng: Rc<RefCell<GameRng>>) -> Result<(), JsValue> {
    let (Some(button), Some(display)) = (
        dom::by_id::<HtmlElement>(doc, "magicButton"),
        dom::by_id::<Element>(doc, "pressCount"),
    ) else {
        return Ok(());
    };

    let game = Rc::new(RefCell::new(MagicButton::new(cfg.clone())));
    let cfg = cfg.clone();
    let doc = doc.clone();
    dom::listen(&button, "click", move |evt| {
        let Some(mouse) = evt.dyn_ref::<MouseEvent>() else { return };
        let (x, y) = (mouse.client_x() as f64, mouse.client_y() as f64);
        let dots = {
            let mut g = game.borrow_mut();
            let dots = g.press(&mut rng.borrow_mut());
            dom::set_text(&display, &g.presses().to_string());
            dots
        };
        for dot in dots {
            if let Err(e) = spawn_dot(&doc, &cfg, x, y, dot) {
                log::warn!("burst dot failed: {e:?}");
            }
        }
    })
}

fn spawn_dot(doc: &Document, cfg: &MagicConfig, x: f64, y: f64, dot: BurstDot) -> Result<(), JsValue> {
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let el = dom::create_div(doc, None)?;
    let size = format!("{}px", dot.size);
    dom::set_style(
        &el,
        &[
            ("position", "fixed"),
            ("left", format!("{x}px").as_str()),
            ("top", format!("{y}px").as_str()),
            ("width", size.as_str()),
            ("height", size.as_str()),
            ("border-radius", "50%"),
            ("background", hsl(dot.hue, 70, 60).as_str()),
            ("pointer-events", "none"),
            ("z-index", "100"),
            ("transition", "all 0.6s ease-out"),
        ],
    );
    body.append_child(&el)?;

    // Kick the transition on the next tick so the start state is painted first.
    let kick = el.clone();
    dom::set_timeout(cfg.kick_delay_ms, move || {
        dom::set_style(
            &kick,
            &[
                (
                    "transform",
                    format!("translate({}px, {}px) scale(0)", dot.dx, dot.dy).as_str(),
                ),
                ("opacity", "0"),
            ],
        );
    });
    dom::set_timeout(cfg.ttl_ms, move || el.remove());
    Ok(())
}
