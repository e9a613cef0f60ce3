//! # Primitive Shape Generation
//!
//! Deterministic, device-free constructors for the demo's geometry.
//! Faces carry their own four vertices so shading stays flat across
//! edges; nothing is shared between adjacent faces.

use super::MeshData;
use crate::gfx::scene::vertex::Vertex3D;

/// The six outward face normals of an axis-aligned box.
const FACE_NORMALS: [[f32; 3]; 6] = [
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
];

/// Texture coordinates for the four corners of every face.
const CORNER_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];

/// Builds a closed cuboid of the given side length, centered at the
/// origin.
///
/// Produces 24 vertices and 36 indices: 6 faces, each with 4 dedicated
/// vertices whose normal equals the face normal. Triangle winding is
/// chosen per face so every face is counter-clockwise when seen from
/// outside, keeping the whole surface front-facing under back-face
/// culling.
pub fn build_cuboid(side_length: f32) -> MeshData {
    let half = side_length / 2.0;
    let mut mesh = MeshData::new();

    for normal in FACE_NORMALS {
        push_face(&mut mesh, half, normal);
    }

    mesh
}

/// Builds a single square panel of the given side length in the xy
/// plane, facing +z.
pub fn build_quad(side_length: f32) -> MeshData {
    let half = side_length / 2.0;
    let mut mesh = MeshData::new();

    push_face(&mut mesh, half, [0.0, 0.0, 1.0]);

    mesh
}

/// Appends one face: 4 vertices at half-length offset along `normal`,
/// plus 6 indices for its two triangles.
fn push_face(mesh: &mut MeshData, half: f32, normal: [f32; 3]) {
    let base = mesh.vertices.len() as u32;

    let positions: [[f32; 3]; 4] = if normal[2] != 0.0 {
        // The offset inherits the normal's sign, so the same corner
        // loop serves both the +z and -z face.
        let z = normal[2] * half;
        [
            [-half, -half, z],
            [half, -half, z],
            [half, half, z],
            [-half, half, z],
        ]
    } else if normal[1] != 0.0 {
        let y = normal[1] * half;
        [
            [-half, y, -half],
            [-half, y, half],
            [half, y, half],
            [half, y, -half],
        ]
    } else {
        let x = normal[0] * half;
        [
            [x, -half, -half],
            [x, half, -half],
            [x, half, half],
            [x, -half, half],
        ]
    };

    for (position, tex_coords) in positions.into_iter().zip(CORNER_UVS) {
        mesh.vertices.push(Vertex3D {
            position,
            normal,
            tex_coords,
        });
    }

    // Winding flips with the sign of the axis so the triangle normal
    // agrees with the outward face normal on every face.
    let winding: [u32; 6] = if normal[0] + normal[1] + normal[2] > 0.0 {
        [0, 1, 3, 1, 2, 3]
    } else {
        [3, 1, 0, 3, 2, 1]
    };
    mesh.indices.extend(winding.iter().map(|i| base + i));
}
