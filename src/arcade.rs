//! Arcade shell: builds shared state, installs every game and wires the nav tabs.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use crate::config::ArcadeConfig;
use crate::dom;
use crate::games::{bubbles, magic, memory, music, paint, shatter};
use crate::rng::GameRng;
use crate::views::{Activation, ViewId, ViewSwitcher};
use crate::{ambient, audio};

thread_local! {
    static STARTED: Cell<bool> = const { Cell::new(false) };
}

/// Setup hooks of the views that need one.
struct ViewHooks {
    paint: Option<paint::PaintHandle>,
    memory: Option<memory::MemoryHandle>,
    shatter: Option<shatter::ShatterHandle>,
}

impl ViewHooks {
    fn run(&self, activation: Activation) {
        let res = match activation.view {
            // resize every time, listeners once
            ViewId::Draw => self.paint.as_ref().map(|p| p.on_activate()),
            // shuffle only on first visit; reset button handles the rest
            ViewId::Memory => self.memory.as_ref().map(|m| m.on_activate(activation.first)),
            ViewId::Shatter => self.shatter.as_ref().map(|s| {
                s.on_activate();
                Ok(())
            }),
            ViewId::Magic | ViewId::Bubbles | ViewId::Music => None,
        };
        if let Some(Err(e)) = res {
            log::warn!("setup of view '{}' failed: {e:?}", activation.view);
        }
    }
}

struct Nav {
    buttons: Vec<(ViewId, HtmlElement)>,
    panels: Vec<(ViewId, HtmlElement)>,
}

impl Nav {
    fn collect(doc: &Document) -> Result<Self, JsValue> {
        let buttons = dom::select_all(doc, ".nav-btn")?
            .into_iter()
            .filter_map(|b| {
                let slug = b.get_attribute("data-game")?;
                match ViewId::from_slug(&slug) {
                    Some(v) => Some((v, b)),
                    None => {
                        log::warn!("nav button for unknown game '{slug}'");
                        None
                    }
                }
            })
            .collect();
        let panels = ViewId::ALL
            .into_iter()
            .filter_map(|v| dom::by_id::<HtmlElement>(doc, &v.element_id()).map(|p| (v, p)))
            .collect();
        Ok(Self { buttons, panels })
    }

    /// The view marked active in the markup, if any.
    fn marked_active(&self) -> Option<ViewId> {
        self.panels
            .iter()
            .find(|(_, p)| p.class_list().contains("active"))
            .map(|(v, _)| *v)
    }

    /// Mirror the switcher onto the page: exactly one button and panel carry `active`.
    fn show(&self, active: ViewId) {
        for (v, el) in self.buttons.iter().chain(self.panels.iter()) {
            dom::toggle_class(el, "active", *v == active);
        }
    }
}

pub fn start(cfg: ArcadeConfig) -> Result<(), JsValue> {
    if STARTED.with(|s| s.replace(true)) {
        log::warn!("arcade already started; ignoring");
        return Ok(());
    }
    let doc = dom::doc()?;
    let rng = Rc::new(RefCell::new(GameRng::from_browser()));

    ambient::install(&doc, &cfg.stars, &mut rng.borrow_mut())?;

    let nav = Rc::new(Nav::collect(&doc)?);
    let initial = nav.marked_active().unwrap_or(ViewId::Magic);
    let views = Rc::new(RefCell::new(ViewSwitcher::new(initial)));

    magic::install(&doc, &cfg.magic, rng.clone())?;
    bubbles::install(&doc, &cfg.bubbles, rng.clone(), views.clone())?;
    music::install(&doc, &cfg.music)?;
    let hooks = Rc::new(ViewHooks {
        shatter: shatter::install(&doc, &cfg.shatter, &cfg.particles, rng.clone())?,
        paint: paint::install(&doc, &cfg.paint)?,
        memory: memory::install(&doc, &cfg.memory, rng.clone())?,
    });

    for (view, button) in &nav.buttons {
        let view = *view;
        let nav = nav.clone();
        let views = views.clone();
        let hooks = hooks.clone();
        dom::listen(button, "click", move |_evt| {
            let activation = views.borrow_mut().activate(view);
            nav.show(view);
            log::debug!("view {} -> {} (first: {})", activation.previous, view, activation.first);
            hooks.run(activation);
        })?;
    }

    let activation = views.borrow_mut().activate(initial);
    nav.show(initial);
    hooks.run(activation);

    log::info!(
        "Cosmic Arcade running ({} notes, view '{}')",
        audio::NOTES.len(),
        initial
    );
    Ok(())
}
