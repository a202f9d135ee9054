//! Twinkling starfield behind the arcade.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::config::StarConfig;
use crate::dom;
use crate::rng::GameRng;

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub size: f64,
    pub left_pct: f64,
    pub top_pct: f64,
    pub twinkle_s: f64,
}

pub fn starfield(cfg: &StarConfig, rng: &mut GameRng) -> Vec<Star> {
    (0..cfg.count)
        .map(|_| Star {
            size: rng.range(0.0, cfg.max_size),
            left_pct: rng.range(0.0, 100.0),
            top_pct: rng.range(0.0, 100.0),
            twinkle_s: rng.range(cfg.min_twinkle_s, cfg.max_twinkle_s),
        })
        .collect()
}

pub fn install(doc: &Document, cfg: &StarConfig, rng: &mut GameRng) -> Result<(), JsValue> {
    let Some(container) = dom::by_id::<Element>(doc, "starContainer") else {
        return Ok(());
    };
    for star in starfield(cfg, rng) {
        let el = dom::create_div(doc, Some("star"))?;
        let size = format!("{}px", star.size);
        dom::set_style(
            &el,
            &[
                ("width", size.as_str()),
                ("height", size.as_str()),
                ("left", format!("{}%", star.left_pct).as_str()),
                ("top", format!("{}%", star.top_pct).as_str()),
                ("--duration", format!("{}s", star.twinkle_s).as_str()),
            ],
        );
        container.append_child(&el)?;
    }
    Ok(())
}
