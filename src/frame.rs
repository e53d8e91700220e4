use crate::audio::MicAnalyser;
use crate::render::CanvasPainter;
use glam::Vec2;
use instant::Instant;
use nebula_core::{render_frame, Sketch};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub sketch: Rc<RefCell<Sketch>>,
    pub mic: Rc<RefCell<MicAnalyser>>,
    pub canvas: web::HtmlCanvasElement,
    pub painter: CanvasPainter,
    pub meter: Option<web::HtmlElement>,
    pub start: Instant,
    pub frames: u64,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let (raw, active) = {
            let mut mic = self.mic.borrow_mut();
            (mic.poll(), mic.status().active)
        };

        let mut sketch = self.sketch.borrow_mut();
        sketch.tick(self.start.elapsed().as_secs_f64(), raw);

        let size = Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32);
        self.painter.set_size(size);
        let stats = render_frame(&*sketch, &mut self.painter, size);

        if active {
            if let Some(meter) = &self.meter {
                crate::overlay::set_meter(meter, raw);
            }
        }

        self.frames += 1;
        if self.frames % 600 == 0 {
            log::debug!(
                "[frame] {} strokes, {} particles, {} glows, {} skipped, volume {:.3}",
                sketch.strokes().len(),
                stats.particles,
                stats.glows,
                stats.skipped,
                sketch.volume()
            );
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
