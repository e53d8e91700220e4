//! wgpu implementation of the core `Painter`: every primitive is recorded
//! as a capsule instance, grouped into runs that share a blend mode, and
//! drawn in order with one instanced call per run.

use glam::Vec2;
use nebula_core::{BlendMode, Painter, Rgba};
use wgpu::util::DeviceExt;

pub static SHAPES_WGSL: &str = include_str!("../shaders/shapes.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    viewport: [f32; 2],
    _pad: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShapeInstance {
    a: [f32; 2],
    b: [f32; 2],
    radius: f32,
    _pad: [f32; 3],
    color: [f32; 4],
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Run {
    mode: BlendMode,
    start: u32,
    end: u32,
}

/// CPU-side recording of one frame.
#[derive(Debug)]
pub struct ShapeBatcher {
    clear: [f32; 3],
    mode: BlendMode,
    instances: Vec<ShapeInstance>,
    runs: Vec<Run>,
}

impl Default for ShapeBatcher {
    fn default() -> Self {
        Self {
            clear: [0.0; 3],
            mode: BlendMode::Normal,
            instances: Vec::new(),
            runs: Vec::new(),
        }
    }
}

impl ShapeBatcher {
    fn push(&mut self, a: Vec2, b: Vec2, radius: f32, color: Rgba) {
        let idx = self.instances.len() as u32;
        self.instances.push(ShapeInstance {
            a: a.to_array(),
            b: b.to_array(),
            radius,
            _pad: [0.0; 3],
            color,
        });
        match self.runs.last_mut() {
            Some(run) if run.mode == self.mode && run.end == idx => run.end = idx + 1,
            _ => self.runs.push(Run {
                mode: self.mode,
                start: idx,
                end: idx + 1,
            }),
        }
    }
}

impl Painter for ShapeBatcher {
    /// Clearing discards everything recorded so far; the color becomes the
    /// render pass load color.
    fn clear(&mut self, rgb: [f32; 3]) {
        self.clear = rgb;
        self.instances.clear();
        self.runs.clear();
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.mode = mode;
    }

    fn stroke_segment(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.push(from, to, width * 0.5, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.push(center, center, radius, color);
    }
}

fn blend_state(mode: BlendMode) -> wgpu::BlendState {
    match mode {
        BlendMode::Normal => wgpu::BlendState::ALPHA_BLENDING,
        BlendMode::Additive => wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        },
    }
}

pub struct GpuState<'w> {
    pub window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    normal_pipeline: wgpu::RenderPipeline,
    additive_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    instance_capacity: usize,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    pub async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Blend in display space, like a 2D canvas does
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shapes"),
            source: wgpu::ShaderSource::Wgsl(SHAPES_WGSL.into()),
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        // Unit quad corners for two triangles
        let quad_vertices: [f32; 12] = [
            0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_capacity = 4096;
        let instance_vb = create_instance_buffer(&device, instance_capacity);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let normal_pipeline =
            create_pipeline(&device, &pipeline_layout, &shader, format, BlendMode::Normal);
        let additive_pipeline =
            create_pipeline(&device, &pipeline_layout, &shader, format, BlendMode::Additive);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            normal_pipeline,
            additive_pipeline,
            globals_buffer,
            quad_vb,
            instance_vb,
            instance_capacity,
            bind_group,
            width: size.width.max(1),
            height: size.height.max(1),
        })
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, frame: &ShapeBatcher) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals {
                viewport: [self.width as f32, self.height as f32],
                _pad: [0.0; 2],
            }),
        );

        if frame.instances.len() > self.instance_capacity {
            self.instance_capacity = frame.instances.len().next_power_of_two();
            self.instance_vb = create_instance_buffer(&self.device, self.instance_capacity);
            log::debug!("[gpu] instance buffer grown to {}", self.instance_capacity);
        }
        if !frame.instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(&frame.instances));
        }

        let [r, g, b] = frame.clear;
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            for run in &frame.runs {
                let pipeline = match run.mode {
                    BlendMode::Normal => &self.normal_pipeline,
                    BlendMode::Additive => &self.additive_pipeline,
                };
                rpass.set_pipeline(pipeline);
                rpass.draw(0..6, run.start..run.end);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("instance_vb"),
        size: (std::mem::size_of::<ShapeInstance>() * capacity) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    mode: BlendMode,
) -> wgpu::RenderPipeline {
    let vertex_buffers = [
        // slot 0: quad corners
        wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 2) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 0,
                shader_location: 0,
            }],
        },
        // slot 1: shape instances
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShapeInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 1,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 8,
                    shader_location: 2,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 16,
                    shader_location: 3,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 32,
                    shader_location: 4,
                },
            ],
        },
    ];
    let label = match mode {
        BlendMode::Normal => "shapes_normal",
        BlendMode::Additive => "shapes_additive",
    };
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &vertex_buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend_state(mode)),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_split_on_blend_changes() {
        let mut b = ShapeBatcher::default();
        b.clear([0.1, 0.1, 0.1]);
        b.set_blend_mode(BlendMode::Normal);
        b.stroke_segment(Vec2::ZERO, Vec2::new(10.0, 0.0), 8.0, [1.0; 4]);
        b.stroke_segment(Vec2::new(10.0, 0.0), Vec2::new(20.0, 0.0), 6.0, [1.0; 4]);
        b.set_blend_mode(BlendMode::Additive);
        b.fill_circle(Vec2::new(5.0, 5.0), 2.0, [1.0, 1.0, 1.0, 0.5]);
        assert_eq!(b.instances.len(), 3);
        assert_eq!(
            b.runs,
            vec![
                Run { mode: BlendMode::Normal, start: 0, end: 2 },
                Run { mode: BlendMode::Additive, start: 2, end: 3 },
            ]
        );
        // segment width maps to capsule radius
        assert_eq!(b.instances[0].radius, 4.0);
        // circles are degenerate capsules
        assert_eq!(b.instances[2].a, b.instances[2].b);
    }

    #[test]
    fn clear_starts_a_new_frame() {
        let mut b = ShapeBatcher::default();
        b.fill_circle(Vec2::ZERO, 1.0, [1.0; 4]);
        b.clear([0.0, 0.0, 0.0]);
        assert!(b.instances.is_empty());
        assert!(b.runs.is_empty());
    }

    #[test]
    fn instance_layout_matches_shader_offsets() {
        assert_eq!(std::mem::size_of::<ShapeInstance>(), 48);
        assert_eq!(std::mem::size_of::<Globals>(), 16);
    }
}
