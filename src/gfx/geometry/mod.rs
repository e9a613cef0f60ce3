//! # Procedural Geometry Generation
//!
//! This module provides functions to generate the demo's primitive
//! shapes procedurally, eliminating the need for external model files.
//!
//! ## Supported Primitives
//!
//! - **Cuboid**: closed box from a single side length
//! - **Quad**: single square panel
//!
//! ## Usage
//!
//! ```
//! use orrery::gfx::geometry::build_cuboid;
//!
//! let cube = build_cuboid(1.0);
//! assert_eq!(cube.triangle_count(), 12);
//! ```

pub mod primitives;

pub use primitives::{build_cuboid, build_quad};

use super::scene::vertex::Vertex3D;

/// Generated geometry ready for device upload.
///
/// Built once by a constructor in [`primitives`]; read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex3D>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Default for MeshData {
    fn default() -> Self {
        Self::new()
    }
}
