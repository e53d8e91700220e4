use glam::Vec2;
use nebula_core::Point;
use web_sys as web;

/// Map a client-space position into canvas backing-store pixels.
///
/// `rect_origin`/`rect_size` describe the canvas CSS box, `backing` its
/// `width`/`height` attributes. A collapsed box falls back to the raw
/// offset from the box origin.
pub fn client_to_canvas(client: Vec2, rect_origin: Vec2, rect_size: Vec2, backing: Vec2) -> Vec2 {
    let local = client - rect_origin;
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return local;
    }
    local / rect_size * backing
}

/// Only the primary pointer draws; secondary touches and pens are ignored.
#[inline]
pub fn accepts_pointer(is_primary: bool, buttons: u16) -> bool {
    is_primary && buttons & 1 == 1
}

pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    client_to_canvas(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
        Vec2::new(canvas.width() as f32, canvas.height() as f32),
    )
}

pub fn pointer_point(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Point {
    let px = pointer_canvas_px(ev, canvas);
    Point::new(px.x, px.y, ev.time_stamp())
}
