use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};

use crate::coords::Viewport;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, Scene};

/// Corners of the two triangles covering one capsule, expanded in the vertex
/// shader from `vertex_index`.
const VERTICES_PER_INSTANCE: u32 = 6;

/// Initial instance buffer capacity; grows by powers of two.
const MIN_INSTANCE_CAPACITY: usize = 64;

/// Renderer for every scene primitive (`DrawCmd::Line` and `DrawCmd::Dot`).
///
/// Lines and dots share one capsule pipeline so a single instanced draw call
/// honors the scene's paint order across primitive kinds. A dot is emitted as
/// a zero-length capsule whose half width is the dot radius.
#[derive(Default)]
pub struct StrokeRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    uniforms: Option<(wgpu::Buffer, wgpu::BindGroup)>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    instances: Vec<StrokeInstance>,
}

impl StrokeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one pass drawing `scene` back to front on top of `target`.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, scene: &mut Scene) {
        if !ctx.viewport.is_valid() {
            return;
        }

        collect_instances(scene, &mut self.instances);
        if self.instances.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_uniforms(ctx);
        self.ensure_instance_capacity(ctx, self.instances.len());

        let (Some(pipeline), Some((ubo, bind_group)), Some(instance_vbo)) =
            (self.pipeline.as_ref(), self.uniforms.as_ref(), self.instance_vbo.as_ref())
        else {
            return;
        };

        ctx.queue
            .write_buffer(ubo, 0, bytemuck::bytes_of(&StrokeUniform::new(ctx.viewport)));
        ctx.queue
            .write_buffer(instance_vbo, 0, bytemuck::cast_slice(&self.instances));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("pendule stroke pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, instance_vbo.slice(..));

        // Instances are in paint order; the GPU blends them back to front.
        rpass.draw(0..VERTICES_PER_INSTANCE, 0..self.instances.len() as u32);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("pendule stroke shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/stroke.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("pendule stroke bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(StrokeUniform::SIZE),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("pendule stroke pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("pendule stroke pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[StrokeInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_over()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("stroke pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        // Bound to the old layout.
        self.uniforms = None;
    }

    fn ensure_uniforms(&mut self, ctx: &RenderCtx<'_>) {
        if self.uniforms.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pendule stroke ubo"),
            size: StrokeUniform::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("pendule stroke bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.uniforms = Some((ubo, bind_group));
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = instance_capacity_for(required);
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pendule stroke instance vbo"),
            size: (new_cap * std::mem::size_of::<StrokeInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        log::debug!("stroke instance buffer grown to {new_cap}");
        self.instance_capacity = new_cap;
    }
}

/// Source-over for premultiplied colors.
fn premul_over() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

fn instance_capacity_for(required: usize) -> usize {
    required.next_power_of_two().max(MIN_INSTANCE_CAPACITY)
}

/// Converts the scene into GPU instances, back to front.
///
/// Primitives with a non-positive size or non-finite geometry or color are skipped.
fn collect_instances(scene: &mut Scene, out: &mut Vec<StrokeInstance>) {
    out.clear();

    for item in scene.iter_in_paint_order() {
        let instance = match &item.cmd {
            DrawCmd::Line(line) => StrokeInstance {
                p0: [line.p0.x, line.p0.y],
                p1: [line.p1.x, line.p1.y],
                radius_pad: [line.width * 0.5, 0.0],
                color: line.color.to_array(),
            },
            DrawCmd::Dot(dot) => StrokeInstance {
                p0: [dot.center.x, dot.center.y],
                p1: [dot.center.x, dot.center.y],
                radius_pad: [dot.radius, 0.0],
                color: dot.color.to_array(),
            },
        };

        let finite = instance
            .p0
            .iter()
            .chain(&instance.p1)
            .chain(&instance.color)
            .all(|v| v.is_finite());
        if instance.radius_pad[0] > 0.0 && instance.radius_pad[0].is_finite() && finite {
            out.push(instance);
        }
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Matches `Viewport` in `stroke.wgsl` (16 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct StrokeUniform {
    size: [f32; 2],
    scale: f32,
    _pad: f32,
}

impl StrokeUniform {
    const SIZE: u64 = std::mem::size_of::<StrokeUniform>() as u64;

    fn new(viewport: Viewport) -> Self {
        Self {
            size: [viewport.width, viewport.height],
            scale: viewport.scale_factor,
            _pad: 0.0,
        }
    }
}

/// Instance data layout (40 bytes):
///
///  offset  0  p0          [f32; 2]   loc 0
///  offset  8  p1          [f32; 2]   loc 1
///  offset 16  radius_pad  [f32; 2]   loc 2  (.x = half width)
///  offset 24  color       [f32; 4]   loc 3  (premultiplied)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct StrokeInstance {
    p0: [f32; 2],
    p1: [f32; 2],
    radius_pad: [f32; 2],
    color: [f32; 4],
}

impl StrokeInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x2, // p0
        1 => Float32x2, // p1
        2 => Float32x2, // radius_pad
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<StrokeInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
