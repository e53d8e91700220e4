use std::time::Instant;

use glam::Vec2;
use nebula_core::{render_frame, Point, Sketch, SketchConfig};
use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

mod audio;
mod gpu;

use audio::MicInput;
use gpu::{GpuState, ShapeBatcher};

/// Pointer timestamps in milliseconds since launch.
fn stamp(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn end_stroke(sketch: &mut Sketch) {
    if let Some(id) = sketch.pointer_up() {
        if let Some(stroke) = sketch.strokes().iter().find(|s| s.id == id) {
            log::info!(
                "[input] stroke {} -> {} particles (live {})",
                stroke.id_string(),
                stroke.particles.len(),
                sketch.live_particle_count()
            );
        }
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut sketch = match Sketch::new(SketchConfig::default()) {
        Ok(s) => s,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };
    let mut mic = MicInput::new();
    let mut batcher = ShapeBatcher::default();

    let event_loop = EventLoop::new().expect("event loop");
    event_loop.set_control_flow(ControlFlow::Poll);
    let window = WindowBuilder::new()
        .with_title("Nebula Sketch (native) - drag to draw, M toggles microphone")
        .build(&event_loop)
        .expect("window");

    let mut state = pollster::block_on(GpuState::new(&window)).expect("gpu");
    let start = Instant::now();
    let mut cursor = Vec2::ZERO;

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(size) => state.resize(size),
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::CursorMoved { position, .. } => {
                    cursor = Vec2::new(position.x as f32, position.y as f32);
                    sketch.pointer_move(Point::new(cursor.x, cursor.y, stamp(start)));
                }
                WindowEvent::MouseInput {
                    state: button_state,
                    button: MouseButton::Left,
                    ..
                } => match button_state {
                    ElementState::Pressed => {
                        sketch.pointer_down(Point::new(cursor.x, cursor.y, stamp(start)))
                    }
                    ElementState::Released => end_stroke(&mut sketch),
                },
                WindowEvent::CursorLeft { .. } => end_stroke(&mut sketch),
                WindowEvent::Touch(touch) => {
                    let p = Point::new(
                        touch.location.x as f32,
                        touch.location.y as f32,
                        stamp(start),
                    );
                    match touch.phase {
                        TouchPhase::Started => sketch.pointer_down(p),
                        TouchPhase::Moved => {
                            sketch.pointer_move(p);
                        }
                        TouchPhase::Ended | TouchPhase::Cancelled => end_stroke(&mut sketch),
                    }
                }
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            repeat: false,
                            ..
                        },
                    ..
                } => match logical_key {
                    Key::Character(c) if c.eq_ignore_ascii_case("m") => {
                        mic.toggle();
                        if let Some(err) = &mic.status().error {
                            log::warn!("[audio] {err}");
                        }
                    }
                    Key::Named(NamedKey::Escape) => elwt.exit(),
                    _ => {}
                },
                _ => {}
            },
            Event::AboutToWait => {
                sketch.tick(start.elapsed().as_secs_f64(), mic.level());
                render_frame(&sketch, &mut batcher, state.size());
                match state.render(&batcher) {
                    Ok(_) => state.window.request_redraw(),
                    Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(e) => log::warn!("[gpu] {e:?}"),
                }
            }
            _ => {}
        })
        .unwrap();
}
