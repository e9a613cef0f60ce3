//! # Scene Management Module
//!
//! The scene owns the camera and every renderable, recomputes each
//! object's model transform every frame, and walks the renderables in
//! a fixed order at draw time.
//!
//! ## Key Components
//!
//! - [`Scene`] - camera + renderables + the update/render orchestration
//! - [`RenderObject`] - one renderable: mesh data, device buffer
//!   handles, and the transform derived for the current frame
//! - [`Vertex3D`] - vertex data structure with position, normal, and
//!   texture coordinates

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::RenderObject;
pub use scene::Scene;
pub use vertex::Vertex3D;
