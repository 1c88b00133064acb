use glam::{Mat4, Vec3, Vec4};

/// Shared camera uniform layout between host and shader.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniforms {
    pub view_matrix: [[f32; 4]; 4],
    pub proj_matrix: [[f32; 4]; 4],
    pub view_pos: [f32; 3],
    pub _padding: f32,
}

impl CameraUniforms {
    pub fn from_matrices(view: Mat4, proj: Mat4, eye: Vec3) -> Self {
        Self {
            view_matrix: view.to_cols_array_2d(),
            proj_matrix: proj.to_cols_array_2d(),
            view_pos: [eye.x, eye.y, eye.z],
            _padding: 0.0,
        }
    }
}

impl Default for CameraUniforms {
    fn default() -> Self {
        Self::from_matrices(Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ZERO)
    }
}

/// One endpoint of a wireframe edge.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl LineVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Clip-space rectangles (x0, y0, x1, y1) and colors of the progress bar.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct OverlayUniforms {
    pub track: [f32; 4],
    pub fill: [f32; 4],
    pub track_color: [f32; 4],
    pub fill_color: [f32; 4],
}

impl OverlayUniforms {
    const LEFT: f32 = -0.5;
    const RIGHT: f32 = 0.5;
    const HALF_HEIGHT: f32 = 0.015;

    /// Bar centered on screen, filled from the left by `fraction` of its width.
    pub fn progress_bar(fraction: f32) -> Self {
        let fraction = fraction.clamp(0.0, 1.0);
        let fill_right = Self::LEFT + (Self::RIGHT - Self::LEFT) * fraction;
        Self {
            track: [Self::LEFT, -Self::HALF_HEIGHT, Self::RIGHT, Self::HALF_HEIGHT],
            fill: [Self::LEFT, -Self::HALF_HEIGHT, fill_right, Self::HALF_HEIGHT],
            track_color: Vec4::new(0.2, 0.2, 0.2, 0.8).to_array(),
            fill_color: Vec4::new(0.3, 0.7, 1.0, 1.0).to_array(),
        }
    }
}
