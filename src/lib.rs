//! Cosmic Arcade core crate.
//!
//! A tab shell hosting independent mini-games (magic button, animal shatter,
//! rainbow paint, bubble pop, musical emojis, cosmic match) over a twinkling
//! starfield. Each game keeps its state in a plain struct that is tested
//! natively; the browser glue in each module only forwards events to it.
//!
//! The host page supplies the markup: `.nav-btn[data-game]` buttons and one
//! `#game-<slug>` panel per view, plus the ids each game looks up. A game whose
//! elements are missing is skipped with a console warning.

use wasm_bindgen::prelude::*;

pub mod ambient;
pub mod arcade;
pub mod audio;
pub mod config;
pub mod dom;
pub mod games;
pub mod particles;
pub mod rng;
pub mod views;

pub use config::ArcadeConfig;
pub use views::{ViewId, ViewSwitcher};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second init (e.g. hot reload) keeps the existing logger.
    let _ = console_log::init_with_level(log::Level::Info);
}

// -----------------------------------------------------------------------------
// Content tables
// -----------------------------------------------------------------------------

/// Animals cycled through by the shatter game.
pub const ANIMALS: &[&str] = &["🦁", "🐯", "🦒", "🐘", "🦏", "🦓", "🐊", "🐆", "🐒", "🦍"];

/// Card faces for the memory game; each is dealt exactly twice.
pub const SPACE_SYMBOLS: &[&str] = &["🚀", "🪐", "⭐", "👨‍🚀", "👽", "🛸", "🛰️", "🌑"];

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_arcade() -> Result<(), JsValue> {
    arcade::start(ArcadeConfig::default())
}

/// Start with a JSON override of the defaults, e.g. `{"particles":{"gravity":0.4}}`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_arcade_with_config(json: &str) -> Result<(), JsValue> {
    let cfg = ArcadeConfig::from_json(json)
        .map_err(|e| JsValue::from_str(&format!("invalid arcade config: {e}")))?;
    arcade::start(cfg)
}
