//! Thin helpers over web-sys for lookups, listeners and timers.
//!
//! All closures handed to the browser live for the page lifetime (`forget`) or
//! are consumed by their single invocation (`once_into_js`).

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlElement, Window, window};

pub fn win() -> Result<Window, JsValue> {
    window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn doc() -> Result<Document, JsValue> {
    win()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Look up `#id` and cast it; a missing or mistyped element is logged and skipped.
pub fn by_id<T: JsCast>(doc: &Document, id: &str) -> Option<T> {
    let Some(el) = doc.get_element_by_id(id) else {
        log::warn!("#{id} not found; feature disabled");
        return None;
    };
    match el.dyn_into::<T>() {
        Ok(t) => Some(t),
        Err(_) => {
            log::warn!("#{id} has an unexpected element type");
            None
        }
    }
}

pub fn select_all(doc: &Document, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    let list = doc.query_selector_all(selector)?;
    let mut out = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
            out.push(el);
        }
    }
    Ok(out)
}

/// Register `handler` for `event` on `target` for the rest of the page lifetime.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Nearest element matching `selector` at or above the event target, for one
/// listener on a container serving all of its (re-created) children.
pub fn delegate_target(evt: &web_sys::Event, selector: &str) -> Option<Element> {
    let target = evt.target()?.dyn_into::<Element>().ok()?;
    target.closest(selector).ok()?
}

/// Fire-and-forget one-shot timer.
pub fn set_timeout<F>(ms: i32, f: F)
where
    F: FnOnce() + 'static,
{
    let cb = Closure::once_into_js(f);
    let scheduled = window().map(|w| {
        w.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)
    });
    if !matches!(scheduled, Some(Ok(_))) {
        log::warn!("setTimeout({ms}ms) could not be scheduled");
    }
}

/// Repeating timer that is never cancelled.
pub fn set_interval<F>(ms: i32, f: F) -> Result<i32, JsValue>
where
    F: FnMut() + 'static,
{
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
    let id = win()?
        .set_interval_with_callback_and_timeout_and_arguments_0(closure.as_ref().unchecked_ref(), ms)?;
    closure.forget();
    Ok(id)
}

pub fn create_div(doc: &Document, class: Option<&str>) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = doc.create_element("div")?.dyn_into()?;
    if let Some(class) = class {
        el.set_class_name(class);
    }
    Ok(el)
}

/// Apply inline style properties, logging (not failing) on rejected values.
pub fn set_style(el: &HtmlElement, props: &[(&str, &str)]) {
    let style = el.style();
    for (name, value) in props {
        if style.set_property(name, value).is_err() {
            log::warn!("style {name}: {value} rejected");
        }
    }
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

/// Add or remove `class` on `el`.
pub fn toggle_class(el: &Element, class: &str, on: bool) {
    let list = el.class_list();
    let res = if on { list.add_1(class) } else { list.remove_1(class) };
    if res.is_err() {
        log::warn!("class '{class}' could not be updated");
    }
}
