//! Bubble pop: a bubble rises every second while the view is visible; press it
//! before it floats away to score.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use crate::config::BubbleConfig;
use crate::dom;
use crate::games::parse_data;
use crate::rng::GameRng;
use crate::views::{ViewId, ViewSwitcher};

/// Appearance of a freshly spawned bubble.
#[derive(Clone, Debug, PartialEq)]
pub struct BubbleSpec {
    pub id: u32,
    pub size: f64,
    pub left_pct: f64,
    pub rise_s: f64,
    pub hue: f64,
}

impl BubbleSpec {
    pub fn background(&self) -> String {
        format!("hsla({:.0}, 70%, 70%, 0.4)", self.hue)
    }

    /// Value of the element's `data-id`, read back by the arena's press handler.
    pub fn data_id(&self) -> String {
        self.id.to_string()
    }
}

pub struct BubbleField {
    cfg: BubbleConfig,
    score: u32,
    next_id: u32,
    live: Vec<u32>,
}

impl BubbleField {
    pub fn new(cfg: BubbleConfig) -> Self {
        Self { cfg, score: 0, next_id: 0, live: Vec::new() }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, id: u32) -> bool {
        self.live.contains(&id)
    }

    /// Interval tick. Spawns nothing unless the bubble view is showing.
    pub fn tick(&mut self, view_active: bool, rng: &mut GameRng) -> Option<BubbleSpec> {
        if !view_active {
            return None;
        }
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.live.push(id);
        Some(BubbleSpec {
            id,
            size: rng.range(self.cfg.min_size, self.cfg.max_size),
            left_pct: rng.range(self.cfg.min_left_pct, self.cfg.max_left_pct),
            rise_s: rng.range(self.cfg.min_rise_s, self.cfg.max_rise_s),
            hue: rng.hue(),
        })
    }

    fn remove(&mut self, id: u32) -> bool {
        match self.live.iter().position(|b| *b == id) {
            Some(i) => {
                self.live.swap_remove(i);
                true
            }
            None => false,
        }
    }

    /// Pressed before expiry: scores once and reports whether it counted.
    pub fn pop(&mut self, id: u32) -> bool {
        let hit = self.remove(id);
        if hit {
            self.score += 1;
        }
        hit
    }

    /// Time-to-live elapsed; no score.
    pub fn expire(&mut self, id: u32) -> bool {
        self.remove(id)
    }
}

pub fn install(
    doc: &Document,
    cfg: &BubbleConfig,
    rng: Rc<RefCell<GameRng>>,
    views: Rc<RefCell<ViewSwitcher>>,
) -> Result<(), JsValue> {
    let (Some(arena), Some(display)) = (
        dom::by_id::<Element>(doc, "bubble-arena"),
        dom::by_id::<Element>(doc, "bubble-score"),
    ) else {
        return Ok(());
    };

    let field = Rc::new(RefCell::new(BubbleField::new(cfg.clone())));

    // One press handler for the arena; bubbles carry their id in `data-id`.
    {
        let field = field.clone();
        dom::listen(&arena, "mousedown", move |evt| {
            let Some(bubble) = dom::delegate_target(&evt, ".bubble") else { return };
            let Some(id) = parse_data::<u32>(bubble.get_attribute("data-id")) else { return };
            let mut f = field.borrow_mut();
            if f.pop(id) {
                dom::set_text(&display, &format!("Score: {}", f.score()));
                bubble.remove();
            }
        })?;
    }

    let ttl = cfg.ttl_ms;
    let doc = doc.clone();
    dom::set_interval(cfg.spawn_interval_ms, move || {
        let active = views.borrow().is_active(ViewId::Bubbles);
        let Some(spec) = field.borrow_mut().tick(active, &mut rng.borrow_mut()) else {
            return;
        };
        match spawn(&doc, &arena, &spec) {
            Ok(el) => {
                let field = field.clone();
                dom::set_timeout(ttl, move || {
                    if field.borrow_mut().expire(spec.id) {
                        el.remove();
                    }
                });
            }
            Err(e) => {
                log::warn!("bubble spawn failed: {e:?}");
                field.borrow_mut().expire(spec.id);
            }
        }
    })?;
    Ok(())
}

fn spawn(doc: &Document, arena: &Element, spec: &BubbleSpec) -> Result<HtmlElement, JsValue> {
    let el = dom::create_div(doc, Some("bubble"))?;
    el.set_attribute("data-id", &spec.data_id())?;
    let size = format!("{}px", spec.size);
    dom::set_style(
        &el,
        &[
            ("width", size.as_str()),
            ("height", size.as_str()),
            ("left", format!("{}%", spec.left_pct).as_str()),
            ("--speed", format!("{}s", spec.rise_s).as_str()),
            ("background", spec.background().as_str()),
        ],
    );
    arena.append_child(&el)?;
    Ok(el)
}
