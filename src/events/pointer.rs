use crate::input;
use nebula_core::Sketch;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub sketch: Rc<RefCell<Sketch>>,
}

pub fn wire_pointer_handlers(w: PointerWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    for kind in ["pointerup", "pointerleave", "pointercancel"] {
        wire_pointer_end(&w, kind);
    }
}

fn listen(canvas: &web::HtmlCanvasElement, kind: &str, closure: Closure<dyn FnMut(web::PointerEvent)>) {
    _ = canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &PointerWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if !input::accepts_pointer(ev.is_primary(), ev.buttons()) {
            return;
        }
        ev.prevent_default();
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        let p = input::pointer_point(&ev, &w.canvas);
        w.sketch.borrow_mut().pointer_down(p);
    }) as Box<dyn FnMut(_)>);
    listen(&w.canvas, "pointerdown", closure);
}

fn wire_pointermove(w: &PointerWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if !ev.is_primary() {
            return;
        }
        let mut sketch = w.sketch.borrow_mut();
        if sketch.is_drawing() {
            let p = input::pointer_point(&ev, &w.canvas);
            sketch.pointer_move(p);
        }
    }) as Box<dyn FnMut(_)>);
    listen(&w.canvas, "pointermove", closure);
}

fn wire_pointer_end(w: &PointerWiring, kind: &'static str) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if !ev.is_primary() {
            return;
        }
        let mut sketch = w.sketch.borrow_mut();
        if let Some(id) = sketch.pointer_up() {
            if let Some(stroke) = sketch.strokes().iter().find(|s| s.id == id) {
                log::info!(
                    "[{}] stroke {} -> {} particles (live {})",
                    kind,
                    stroke.id_string(),
                    stroke.particles.len(),
                    sketch.live_particle_count()
                );
            }
        }
    }) as Box<dyn FnMut(_)>);
    listen(&w.canvas, kind, closure);
}
