//! # Graphics Module
//!
//! All graphics-related functionality for the demo: the first-person
//! camera, procedural geometry, the scene update/render orchestration,
//! and the device boundary the scene draws through.
//!
//! The core (camera, geometry, scene) never touches wgpu directly. It
//! talks to a [`device::GraphicsDevice`], injected by the host; the
//! wgpu-backed implementation lives in [`rendering`].

pub mod camera;
pub mod device;
pub mod geometry;
pub mod rendering;
pub mod scene;

// Re-export commonly used types
pub use device::{GraphicsDevice, TransformUniform};
pub use rendering::wgpu_device::WgpuDevice;
pub use scene::Scene;
