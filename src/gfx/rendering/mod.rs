// src/gfx/rendering/mod.rs
//! wgpu-backed implementation of the device boundary.
//!
//! Handles the surface, the render pipeline, and frame presentation.

pub mod wgpu_device;

// Re-export main types
pub use wgpu_device::WgpuDevice;
