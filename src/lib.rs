#![cfg(target_arch = "wasm32")]
use instant::Instant;
use nebula_core::{Sketch, SketchConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

use audio::MicAnalyser;
use constants::{AUDIO_TOGGLE_ID, CANVAS_ID, LEVEL_METER_ID};

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn wire_audio_toggle(document: &web::Document, mic: Rc<RefCell<MicAnalyser>>) {
    let doc = document.clone();
    dom::add_click_listener(document, AUDIO_TOGGLE_ID, move || {
        let (active, pending) = {
            let m = mic.borrow();
            (m.status().active, m.is_pending())
        };
        if active || pending {
            let mut m = mic.borrow_mut();
            m.stop();
            overlay::show_audio_status(&doc, m.status());
            return;
        }
        mic.borrow_mut().begin_start();
        let mic_start = mic.clone();
        let doc_start = doc.clone();
        spawn_local(async move {
            MicAnalyser::start(mic_start.clone()).await;
            overlay::show_audio_status(&doc_start, mic_start.borrow().status());
        });
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("nebula-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::get_canvas(&document, CANVAS_ID)?;
    wire_canvas_resize(&canvas);
    let ctx = dom::context_2d(&canvas)?;

    let sketch = Rc::new(RefCell::new(Sketch::new(SketchConfig::default())?));
    let mic = Rc::new(RefCell::new(MicAnalyser::new()));

    events::pointer::wire_pointer_handlers(events::pointer::PointerWiring {
        canvas: canvas.clone(),
        sketch: sketch.clone(),
    });
    wire_audio_toggle(&document, mic.clone());
    overlay::show_audio_status(&document, mic.borrow().status());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        sketch,
        mic,
        canvas,
        painter: render::CanvasPainter::new(ctx),
        meter: dom::get_html_element(&document, LEVEL_METER_ID),
        start: Instant::now(),
        frames: 0,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
