//! Rainbow paint: drag on the canvas to draw; the stroke hue advances one degree
//! per segment.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent};

use crate::config::PaintConfig;
use crate::dom;
use crate::games::hsl;
use crate::particles::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub hue: u16,
}

impl Segment {
    pub fn color(&self) -> String {
        hsl(self.hue as f64, 100, 50)
    }
}

/// Pointer state of one painting session.
#[derive(Debug, Default)]
pub struct Brush {
    drawing: bool,
    hue: u16, // [0, 360)
    last: Option<Point>,
}

impl Brush {
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn hue(&self) -> u16 {
        self.hue
    }

    pub fn pointer_down(&mut self, at: Point) {
        self.drawing = true;
        self.last = Some(at);
    }

    /// Segment from the previous point to `at`, or `None` when not drawing.
    pub fn pointer_move(&mut self, at: Point) -> Option<Segment> {
        if !self.drawing {
            return None;
        }
        let from = self.last.unwrap_or(at);
        let seg = Segment { from, to: at, hue: self.hue };
        self.hue = (self.hue + 1) % 360;
        self.last = Some(at);
        Some(seg)
    }

    pub fn pointer_up(&mut self) {
        self.drawing = false;
        self.last = None;
    }
}

/// What the draw view must do when it becomes visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaintActivation {
    pub resize: bool,
    pub bind_listeners: bool,
}

/// Draw-view lifecycle: the canvas is refitted on every visit, pointer
/// listeners are attached on the first one only.
#[derive(Debug, Default)]
pub struct PaintSession {
    activations: u32,
}

impl PaintSession {
    pub fn activate(&mut self) -> PaintActivation {
        self.activations = self.activations.saturating_add(1);
        PaintActivation { resize: true, bind_listeners: self.activations == 1 }
    }

    pub fn activations(&self) -> u32 {
        self.activations
    }
}

pub struct PaintView {
    cfg: PaintConfig,
    brush: Brush,
    session: PaintSession,
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
}

impl PaintView {
    fn draw(&self, seg: Segment) {
        let Some(ctx) = &self.ctx else { return };
        ctx.set_stroke_style_str(&seg.color());
        ctx.begin_path();
        ctx.move_to(seg.from.x, seg.from.y);
        ctx.line_to(seg.to.x, seg.to.y);
        ctx.stroke();
    }

    fn clear(&self) {
        if let Some(ctx) = &self.ctx {
            ctx.clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
        }
    }

    /// Fit the canvas to its container. Resizing resets the 2D state, so the
    /// stroke style is re-applied every time.
    fn resize(&mut self) -> Result<(), JsValue> {
        if let Some(parent) = self.canvas.parent_element() {
            let rect = parent.get_bounding_client_rect();
            self.canvas.set_width(rect.width().max(0.0) as u32);
            self.canvas.set_height(rect.height().max(0.0) as u32);
        }
        let ctx: CanvasRenderingContext2d = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        ctx.set_line_join("round");
        ctx.set_line_cap("round");
        ctx.set_line_width(self.cfg.line_width);
        self.ctx = Some(ctx);
        Ok(())
    }

    fn to_canvas(&self, client_x: f64, client_y: f64) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        Point::new(client_x - rect.left(), client_y - rect.top())
    }
}

/// Pointer position of a mouse or first-touch event, in client coordinates.
fn client_point(evt: &web_sys::Event) -> Option<(f64, f64)> {
    if let Some(m) = evt.dyn_ref::<MouseEvent>() {
        return Some((m.client_x() as f64, m.client_y() as f64));
    }
    let touch = evt.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some((touch.client_x() as f64, touch.client_y() as f64))
}

#[derive(Clone)]
pub struct PaintHandle {
    view: Rc<RefCell<PaintView>>,
}

impl PaintHandle {
    /// Runs on every activation of the draw view.
    pub fn on_activate(&self) -> Result<(), JsValue> {
        let plan = {
            let mut v = self.view.borrow_mut();
            let plan = v.session.activate();
            if plan.resize {
                v.resize()?;
            }
            plan
        };
        if plan.bind_listeners {
            self.bind_pointer()?;
        }
        Ok(())
    }

    fn bind_pointer(&self) -> Result<(), JsValue> {
        let canvas = self.view.borrow().canvas.clone();

        for event in ["mousedown", "touchstart"] {
            let v = self.view.clone();
            dom::listen(&canvas, event, move |evt| {
                if evt.type_().starts_with("touch") {
                    evt.prevent_default();
                }
                let Some((cx, cy)) = client_point(&evt) else { return };
                let mut view = v.borrow_mut();
                let at = view.to_canvas(cx, cy);
                view.brush.pointer_down(at);
                if let Some(seg) = view.brush.pointer_move(at) {
                    view.draw(seg);
                }
            })?;
        }

        for event in ["mousemove", "touchmove"] {
            let v = self.view.clone();
            dom::listen(&canvas, event, move |evt| {
                if evt.type_().starts_with("touch") {
                    evt.prevent_default();
                }
                let Some((cx, cy)) = client_point(&evt) else { return };
                let mut view = v.borrow_mut();
                let at = view.to_canvas(cx, cy);
                if let Some(seg) = view.brush.pointer_move(at) {
                    view.draw(seg);
                }
            })?;
        }

        for event in ["mouseup", "mouseleave", "touchend", "touchcancel"] {
            let v = self.view.clone();
            dom::listen(&canvas, event, move |_evt| v.borrow_mut().brush.pointer_up())?;
        }
        Ok(())
    }
}

pub fn install(doc: &Document, cfg: &PaintConfig) -> Result<Option<PaintHandle>, JsValue> {
    let Some(canvas) = dom::by_id::<HtmlCanvasElement>(doc, "paintCanvas") else {
        return Ok(None);
    };
    let view = Rc::new(RefCell::new(PaintView {
        cfg: cfg.clone(),
        brush: Brush::default(),
        session: PaintSession::default(),
        canvas,
        ctx: None,
    }));

    if let Some(clear) = dom::by_id::<HtmlElement>(doc, "clearCanvas") {
        let v = view.clone();
        dom::listen(&clear, "click", move |_evt| v.borrow().clear())?;
    }
    Ok(Some(PaintHandle { view }))
}
