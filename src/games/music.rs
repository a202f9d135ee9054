//! Musical emojis: each key plays a short triangle-wave note.

use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::audio::Synth;
use crate::config::MusicConfig;
use crate::dom;

/// Resolve the note name of the `.music-key` that received (or contains) the click.
fn clicked_note(evt: &web_sys::Event) -> Option<String> {
    dom::delegate_target(evt, ".music-key")?.get_attribute("data-note")
}

pub fn install(doc: &Document, cfg: &MusicConfig) -> Result<(), JsValue> {
    let Some(keyboard) = doc.query_selector(".music-keyboard")? else {
        log::warn!(".music-keyboard not found; feature disabled");
        return Ok(());
    };
    let mut synth = Synth::new(cfg);
    dom::listen(&keyboard, "click", move |evt| {
        if let Some(note) = clicked_note(&evt) {
            synth.play_note(&note);
        }
    })
}
