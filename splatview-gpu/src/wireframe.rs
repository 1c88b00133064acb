//! Scene pass: draws every mesh in the scene graph as colored edges.

use crate::pipeline::{PipelineBuildError, RenderPipelineBuilder};
use crate::types::{CameraUniforms, LineVertex};
use crate::{RenderContext, shaders};
use splatview_scene::SceneGraph;
use tracing::debug;
use wgpu::util::DeviceExt;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.025,
    a: 1.0,
};

/// Flatten the edges of all meshes in `scene` into a line list.
pub fn line_vertices(scene: &SceneGraph) -> Vec<LineVertex> {
    scene
        .meshes()
        .flat_map(|mesh| {
            let color = mesh.material.color;
            mesh.wireframe_segments()
                .into_iter()
                .flat_map(move |[a, b]| [LineVertex::new(a, color), LineVertex::new(b, color)])
        })
        .collect()
}

pub struct WireframePass {
    pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertex_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
    uploaded_revision: Option<u64>,
}

impl WireframePass {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> Result<Self, PipelineBuildError> {
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniforms::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Wireframe Bind Group Layout"),
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
            label: Some("Wireframe Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("wireframe"),
            source: wgpu::ShaderSource::Wgsl(shaders::WIREFRAME.into()),
        });

        let pipeline = RenderPipelineBuilder::new(device)
            .with_label("Wireframe Pipeline")
            .with_shader(&shader)
            .with_bind_group_layout(&bind_group_layout)
            .with_vertex_buffer(LineVertex::layout())
            .with_primitive(wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            })
            .with_fragment_target(Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            }))
            .build()?;

        Ok(Self {
            pipeline,
            camera_buffer,
            bind_group,
            vertex_buffer: None,
            vertex_count: 0,
            uploaded_revision: None,
        })
    }

    /// Re-upload edge geometry if the scene changed since the last upload.
    pub fn sync_scene(&mut self, device: &wgpu::Device, scene: &SceneGraph) {
        if self.uploaded_revision == Some(scene.revision()) {
            return;
        }
        let vertices = line_vertices(scene);
        debug!(
            revision = scene.revision(),
            vertices = vertices.len(),
            "uploading scene wireframe"
        );
        self.vertex_count = vertices.len() as u32;
        self.vertex_buffer = if vertices.is_empty() {
            None
        } else {
            Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Wireframe Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }))
        };
        self.uploaded_revision = Some(scene.revision());
    }

    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &CameraUniforms) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(camera));
    }

    /// Clear the target and draw the uploaded edges.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, ctx: &RenderContext) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Wireframe Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: ctx.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        if let Some(vertex_buffer) = self.vertex_buffer.as_ref() {
            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
            render_pass.draw(0..self.vertex_count, 0..1);
        }
    }
}
