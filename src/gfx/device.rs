//! The boundary between the scene and whatever graphics API backs it.
//!
//! The scene only ever needs four operations: create a vertex buffer,
//! create an index buffer, overwrite the shared per-draw uniform slot,
//! and issue an indexed draw. Everything else (surfaces, pipelines,
//! swapchains) is the backend's business. Keeping the boundary this
//! narrow is also what lets the scene tests run against a recording
//! mock instead of a GPU.

use cgmath::Matrix4;
use thiserror::Error;

use super::scene::vertex::Vertex3D;

/// Opaque handle to a device vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBufferId(pub(crate) usize);

/// Opaque handle to a device index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBufferId(pub(crate) usize);

/// Errors raised at the device boundary.
///
/// Resource creation failure is fatal at startup: callers propagate it
/// up to the host, which logs a diagnostic and aborts. There are no
/// retryable conditions at this layer.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("failed to allocate {kind} buffer of {bytes} bytes")]
    BufferAllocation { kind: &'static str, bytes: usize },
}

/// Contents of the shared per-draw uniform slot.
///
/// One of these is rewritten (discard semantics) before every single
/// draw call, so draws must stay strictly sequential: there is no
/// double-buffering, and a reordered draw would read another object's
/// transform.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl TransformUniform {
    pub fn new(model: Matrix4<f32>, view: Matrix4<f32>, projection: Matrix4<f32>) -> Self {
        Self {
            model: matrix4_to_array(model),
            view: matrix4_to_array(view),
            projection: matrix4_to_array(projection),
        }
    }
}

pub fn matrix4_to_array(matrix: Matrix4<f32>) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            result[i][j] = matrix[i][j];
        }
    }

    result
}

/// The resource-upload and draw capability the scene consumes.
///
/// Implementations own the underlying buffers; handles returned from
/// the `create_*` calls are only meaningful against the device that
/// issued them. Buffers are released when the device value drops.
pub trait GraphicsDevice {
    fn create_vertex_buffer(&mut self, vertices: &[Vertex3D])
        -> Result<VertexBufferId, DeviceError>;

    fn create_index_buffer(&mut self, indices: &[u32]) -> Result<IndexBufferId, DeviceError>;

    /// Overwrites the shared per-draw uniform slot. The next draw call
    /// reads whatever was uploaded last.
    fn upload_uniform(&mut self, uniform: &TransformUniform);

    fn draw_indexed(
        &mut self,
        vertex_buffer: VertexBufferId,
        index_buffer: IndexBufferId,
        index_count: u32,
    );
}
