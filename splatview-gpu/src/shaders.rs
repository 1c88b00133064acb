//! Shader source code embedded at compile time.

/// Wireframe line shader - transforms scene edges by the camera uniforms.
pub const WIREFRAME: &str = include_str!("../shaders/wireframe.wgsl");

/// Loading overlay shader - draws the progress bar track and fill in clip space.
pub const OVERLAY: &str = include_str!("../shaders/overlay.wgsl");
