use cgmath::{Matrix4, SquareMatrix};

use crate::gfx::device::{DeviceError, GraphicsDevice, IndexBufferId, VertexBufferId};
use crate::gfx::geometry::MeshData;

/// One renderable in the scene.
///
/// Owns its mesh data exclusively (immutable after construction) and
/// the device buffer handles created from it. The transform is derived
/// fresh every frame by [`Scene::update`](super::Scene::update); it is
/// never carried across frames.
pub struct RenderObject {
    pub name: &'static str,
    mesh: MeshData,
    vertex_buffer: VertexBufferId,
    index_buffer: IndexBufferId,
    transform: Matrix4<f32>,
}

impl RenderObject {
    /// Uploads the mesh to the device and wraps the resulting handles.
    /// Buffer allocation failure is propagated; it is fatal at startup.
    pub fn new(
        name: &'static str,
        mesh: MeshData,
        device: &mut dyn GraphicsDevice,
    ) -> Result<Self, DeviceError> {
        let vertex_buffer = device.create_vertex_buffer(&mesh.vertices)?;
        let index_buffer = device.create_index_buffer(&mesh.indices)?;

        log::debug!(
            "created '{}': {} vertices, {} indices",
            name,
            mesh.vertex_count(),
            mesh.index_count()
        );

        Ok(Self {
            name,
            mesh,
            vertex_buffer,
            index_buffer,
            transform: Matrix4::identity(),
        })
    }

    pub fn set_transform(&mut self, transform: Matrix4<f32>) {
        self.transform = transform;
    }

    pub fn transform(&self) -> Matrix4<f32> {
        self.transform
    }

    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    /// Issues this object's draw call. The caller must have uploaded
    /// the matching uniform immediately beforehand.
    pub fn draw(&self, device: &mut dyn GraphicsDevice) {
        device.draw_indexed(self.vertex_buffer, self.index_buffer, self.mesh.index_count());
    }
}
