use glam::Vec2;
use nebula_core::{BlendMode, Painter, Rgba};
use std::f64::consts::TAU;
use web_sys as web;

/// CSS color for a linear `[0, 1]` RGBA tuple.
pub fn css_rgba(c: Rgba) -> String {
    let ch = |x: f32| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        ch(c[0]),
        ch(c[1]),
        ch(c[2]),
        c[3].clamp(0.0, 1.0)
    )
}

pub fn composite_op(mode: BlendMode) -> &'static str {
    match mode {
        BlendMode::Normal => "source-over",
        BlendMode::Additive => "lighter",
    }
}

/// Immediate-mode painter over a canvas 2D context.
pub struct CanvasPainter {
    ctx: web::CanvasRenderingContext2d,
    size: Vec2,
}

impl CanvasPainter {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            size: Vec2::ZERO,
        }
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }
}

impl Painter for CanvasPainter {
    fn clear(&mut self, rgb: [f32; 3]) {
        let [r, g, b] = rgb;
        self.ctx.set_fill_style_str(&css_rgba([r, g, b, 1.0]));
        self.ctx
            .fill_rect(0.0, 0.0, self.size.x as f64, self.size.y as f64);
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        _ = self.ctx.set_global_composite_operation(composite_op(mode));
    }

    fn stroke_segment(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        let ctx = &self.ctx;
        // resizing the canvas resets context state
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        ctx.set_line_width(width as f64);
        ctx.set_stroke_style_str(&css_rgba(color));
        ctx.begin_path();
        ctx.move_to(from.x as f64, from.y as f64);
        ctx.line_to(to.x as f64, to.y as f64);
        ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(&css_rgba(color));
        ctx.begin_path();
        _ = ctx.arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
        ctx.fill();
    }
}
