//! The winit host loop.
//!
//! Drives the fixed per-frame contract: measure `dt`, `Scene::update`,
//! then `Scene::render` between `begin_frame`/`end_frame`, once per
//! redraw, single-threaded. Quit (Escape or window close) is handled
//! here, outside the scene.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::gfx::{Scene, WgpuDevice};
use crate::input::InputState;

pub struct DemoApp {
    event_loop: EventLoop<()>,
    state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    device: Option<WgpuDevice>,
    scene: Option<Scene>,
    input: InputState,
    last_frame: Option<Instant>,
}

impl DemoApp {
    pub fn new() -> Result<Self> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;

        Ok(Self {
            event_loop,
            state: AppState {
                window: None,
                device: None,
                scene: None,
                input: InputState::new(),
                last_frame: None,
            },
        })
    }

    /// Runs the application (consumes self and starts the event loop).
    pub fn run(mut self) -> Result<()> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop
            .run_app(&mut self.state)
            .context("event loop failed")
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            WindowAttributes::default()
                .with_title("orrery")
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let (width, height) = window.inner_size().into();

        // Device and scene creation failures are fatal at startup.
        let mut device = match pollster::block_on(WgpuDevice::new(window.clone(), width, height)) {
            Ok(device) => device,
            Err(e) => {
                log::error!("failed to initialize graphics device: {e:#}");
                event_loop.exit();
                return;
            }
        };

        match Scene::new(&mut device, width, height) {
            Ok(scene) => self.scene = Some(scene),
            Err(e) => {
                log::error!("failed to initialize scene: {e}");
                event_loop.exit();
                return;
            }
        }

        self.window = Some(window);
        self.device = Some(device);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let (Some(device), Some(scene)) = (self.device.as_mut(), self.scene.as_mut()) else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state,
                        ..
                    },
                ..
            } => {
                if key_code == KeyCode::Escape {
                    event_loop.exit();
                    return;
                }
                self.input.set_key(key_code, state == ElementState::Pressed);
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                device.resize(width, height);
                scene.on_window_resized(width, height);
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = self
                    .last_frame
                    .replace(now)
                    .map(|last| now.duration_since(last).as_secs_f32())
                    .unwrap_or(0.0);

                scene.update(dt, &self.input);
                self.input.end_frame();

                match device.begin_frame() {
                    Ok(()) => {
                        scene.render(device);
                        device.end_frame();
                    }
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let (width, height) = device.surface_size();
                        device.resize(width, height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("surface out of memory");
                        event_loop.exit();
                    }
                    Err(e) => {
                        log::warn!("skipping frame: {e}");
                    }
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input.accumulate_pointer_delta(delta.0, delta.1);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
