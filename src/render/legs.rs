use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::creature::{Leg, LEG_COUNT};

/// Per-vertex data for leg line segments.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LegVertex {
    pub position: [f32; 2],
    pub color: [f32; 4], // premultiplied RGBA
}

/// Two vertices per leg.
const MAX_LEG_VERTICES: usize = LEG_COUNT * 2;
/// Leg stroke color (#00FF00).
const LEG_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

/// Turns leg snapshots into a line list.
pub struct LegBatch {
    vertex_buf: Vec<LegVertex>,
}

impl LegBatch {
    pub fn new() -> Self {
        Self {
            vertex_buf: Vec::with_capacity(MAX_LEG_VERTICES),
        }
    }

    /// Build the vertex list for this frame, one segment per leg.
    pub fn build_vertices(&mut self, legs: &[Leg]) -> &[LegVertex] {
        self.vertex_buf.clear();

        for leg in legs {
            self.vertex_buf.push(LegVertex {
                position: leg.start.as_vec2().into(),
                color: LEG_COLOR,
            });
            self.vertex_buf.push(LegVertex {
                position: leg.end.as_vec2().into(),
                color: LEG_COLOR,
            });
        }

        &self.vertex_buf
    }
}

/// GPU pipeline for rendering legs as lines.
pub struct LegPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub screen_uniform_buffer: wgpu::Buffer,
    pub screen_bind_group: wgpu::BindGroup,
    pub num_vertices: u32,
}

impl LegPipeline {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("leg_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/legs.wgsl").into()),
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("leg_screen_layout"),
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

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("leg_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LegVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 8,
                    shader_location: 1,
                },
            ],
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("leg_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("leg_vertex_buffer"),
            size: (MAX_LEG_VERTICES * std::mem::size_of::<LegVertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Screen size uniform, 1x1 until the first resize
        let screen_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("leg_screen_uniform_buffer"),
            contents: bytemuck::cast_slice(&[1.0f32, 1.0f32]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let screen_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("leg_screen_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            vertex_buffer,
            screen_uniform_buffer,
            screen_bind_group,
            num_vertices: 0,
        }
    }

    pub fn update_vertices(&mut self, queue: &wgpu::Queue, vertices: &[LegVertex]) {
        let count = vertices.len().min(MAX_LEG_VERTICES);
        self.num_vertices = count as u32;
        if count > 0 {
            queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(&vertices[..count]),
            );
        }
    }

    /// Update the screen size uniform.
    pub fn update_screen_size(&self, queue: &wgpu::Queue, width: f32, height: f32) {
        queue.write_buffer(
            &self.screen_uniform_buffer,
            0,
            bytemuck::cast_slice(&[width, height]),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn one_segment_per_leg() {
        let legs = [
            Leg {
                start: DVec2::new(1.0, 2.0),
                end: DVec2::new(3.0, 4.0),
                ..Leg::default()
            },
            Leg {
                start: DVec2::new(1.0, 2.0),
                end: DVec2::new(-5.0, 6.5),
                ..Leg::default()
            },
        ];
        let mut batch = LegBatch::new();
        let verts = batch.build_vertices(&legs);

        assert_eq!(verts.len(), 4);
        assert_eq!(verts[0].position, [1.0, 2.0]);
        assert_eq!(verts[1].position, [3.0, 4.0]);
        assert_eq!(verts[3].position, [-5.0, 6.5]);
        assert!(verts.iter().all(|v| v.color == LEG_COLOR));
    }

    #[test]
    fn rebuilding_replaces_previous_frame() {
        let mut batch = LegBatch::new();
        batch.build_vertices(&[Leg::default(); LEG_COUNT]);
        let verts = batch.build_vertices(&[Leg::default(); 3]);
        assert_eq!(verts.len(), 6);
    }
}
