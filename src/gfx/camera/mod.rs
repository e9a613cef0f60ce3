pub mod first_person;

// Re-export main types
pub use first_person::FirstPersonCamera;

/// cgmath's perspective matrix targets OpenGL's z range of [-1, 1];
/// wgpu expects [0, 1]. Applied once per frame when the shared
/// projection is composed for upload.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);
