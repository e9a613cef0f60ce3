// src/lib.rs
//! Orrery
//!
//! A small real-time 3D demo built on wgpu and winit: a first-person
//! camera, procedurally generated cuboids, and a scene of orbiting
//! bodies driven by a fixed update-then-render frame loop.

pub mod app;
pub mod gfx;
pub mod input;

// Re-export main types for convenience
pub use app::DemoApp;
