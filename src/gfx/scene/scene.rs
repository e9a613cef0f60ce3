//! The per-frame update/render orchestration.

use cgmath::{Deg, Matrix4, Rad, Vector3};

use crate::gfx::camera::{FirstPersonCamera, OPENGL_TO_WGPU_MATRIX};
use crate::gfx::device::{DeviceError, GraphicsDevice, TransformUniform};
use crate::gfx::geometry::{build_cuboid, build_quad};
use crate::input::{movement_axes, InputState};

use super::object::RenderObject;

/// Camera travel speed in world units per second.
const CAMERA_SPEED: f32 = 5.0;

/// Spin rate of the orbiting bodies in radians per second.
const ANGULAR_VELOCITY: f32 = std::f32::consts::FRAC_PI_4;

/// Seconds between fps log lines.
const FPS_LOG_INTERVAL: f32 = 2.0;

/// The demo scene: a first-person camera, a spinning backdrop quad,
/// and a sun/earth/moon cuboid hierarchy.
///
/// Each frame runs two strictly ordered phases: [`Scene::update`]
/// derives camera state and every model transform, then
/// [`Scene::render`] walks the renderables in a fixed order, rewriting
/// the shared uniform slot before each draw. Dropping the scene
/// releases the meshes; device buffers die with the device value.
pub struct Scene {
    camera: FirstPersonCamera,
    quad: RenderObject,
    sun: RenderObject,
    earth: RenderObject,
    moon: RenderObject,
    /// Accumulated spin, monotonic over the scene's lifetime. Never
    /// wrapped; the trig functions handle large angles.
    spin_angle: f32,
    viewport: (u32, u32),
    fps_cooldown: f32,
}

impl Scene {
    /// Builds the scene and uploads all geometry through the injected
    /// device. Allocation failure aborts startup at the caller.
    pub fn new(
        device: &mut dyn GraphicsDevice,
        width: u32,
        height: u32,
    ) -> Result<Self, DeviceError> {
        let mut camera = FirstPersonCamera::new(
            Deg(45.0).into(),
            width as f32 / height as f32,
            1.0,   // z-near: everything closer is clipped
            500.0, // z-far: everything further is clipped
        );
        camera.move_to(Vector3::new(0.0, 0.0, 5.0));

        let quad = RenderObject::new("quad", build_quad(1.0), device)?;
        let sun = RenderObject::new("sun", build_cuboid(0.8), device)?;
        let earth = RenderObject::new("earth", build_cuboid(0.5), device)?;
        let moon = RenderObject::new("moon", build_cuboid(0.2), device)?;

        log::info!("scene initialized at {}x{}", width, height);

        Ok(Self {
            camera,
            quad,
            sun,
            earth,
            moon,
            spin_angle: 0.0,
            viewport: (width, height),
            fps_cooldown: 0.0,
        })
    }

    /// Advances the scene by `dt` seconds.
    ///
    /// Applies movement and pointer input to the camera, then derives
    /// every object's model transform from scratch. Children compose
    /// against the parent's full transform at use-time; nothing is
    /// cached between frames, so the hierarchy cannot drift.
    pub fn update(&mut self, dt: f32, input: &InputState) {
        // Frame timing comes from the host and is trusted; a NaN or
        // negative dt is a caller bug, not a condition to clamp.
        debug_assert!(
            dt.is_finite() && dt >= 0.0,
            "frame delta must be finite and non-negative, got {dt}"
        );

        self.camera.move_by(movement_axes(input), CAMERA_SPEED, dt);

        let (delta_x, delta_y) = input.pointer_delta();
        self.camera.rotate(delta_x, delta_y);

        // T * R * S per object; the translation of the spinning bodies
        // is the identity, so it is omitted.
        let sun_transform =
            Matrix4::from_angle_y(Rad(-self.spin_angle)) * Matrix4::from_scale(1.5);

        let earth_transform = sun_transform
            * Matrix4::from_translation(Vector3::new(5.0, 0.0, 0.0))
            * Matrix4::from_scale(1.5);

        let moon_transform = earth_transform
            * Matrix4::from_translation(Vector3::new(1.0, 0.0, 0.0))
            * Matrix4::from_angle_y(Rad(-self.spin_angle))
            * Matrix4::from_scale(1.5);

        self.quad.set_transform(
            Matrix4::from_angle_y(Rad(-self.spin_angle)) * Matrix4::from_scale(1.5),
        );
        self.sun.set_transform(sun_transform);
        self.earth.set_transform(earth_transform);
        self.moon.set_transform(moon_transform);

        self.spin_angle += ANGULAR_VELOCITY * dt;

        self.fps_cooldown -= dt;
        if self.fps_cooldown < 0.0 {
            if dt > 0.0 {
                log::debug!("fps {}", (1.0 / dt) as u32);
            }
            self.fps_cooldown = FPS_LOG_INTERVAL;
        }
    }

    /// Draws every renderable in a fixed order.
    ///
    /// The view and projection matrices are shared by all draws of the
    /// frame and computed once. Each object's triple is written into
    /// the single per-draw uniform slot immediately before its draw
    /// call; the slot has no double-buffering, so the sequence must
    /// stay strictly upload-then-draw per object.
    pub fn render(&self, device: &mut dyn GraphicsDevice) {
        let view = self.camera.world_to_view();
        let projection = OPENGL_TO_WGPU_MATRIX * self.camera.projection();

        for object in [&self.quad, &self.sun, &self.earth, &self.moon] {
            device.upload_uniform(&TransformUniform::new(object.transform(), view, projection));
            object.draw(device);
        }
    }

    /// Viewport resize: only the stored dimensions and the camera's
    /// aspect ratio change. Projection is rebuilt from parameters every
    /// frame, so no buffer needs reallocating.
    pub fn on_window_resized(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.camera.set_aspect(width as f32 / height.max(1) as f32);
    }

    pub fn camera(&self) -> &FirstPersonCamera {
        &self.camera
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::device::{IndexBufferId, VertexBufferId};
    use crate::gfx::scene::vertex::Vertex3D;
    use cgmath::SquareMatrix;
    use winit::keyboard::KeyCode;

    #[derive(Debug, PartialEq)]
    enum DeviceOp {
        Upload(TransformUniform),
        Draw {
            vertex_buffer: VertexBufferId,
            index_buffer: IndexBufferId,
            index_count: u32,
        },
    }

    /// Records every device call so tests can assert on the exact
    /// upload/draw sequence without a GPU.
    #[derive(Default)]
    struct RecordingDevice {
        vertex_buffer_sizes: Vec<usize>,
        index_buffer_sizes: Vec<usize>,
        ops: Vec<DeviceOp>,
    }

    impl GraphicsDevice for RecordingDevice {
        fn create_vertex_buffer(
            &mut self,
            vertices: &[Vertex3D],
        ) -> Result<VertexBufferId, DeviceError> {
            self.vertex_buffer_sizes.push(vertices.len());
            Ok(VertexBufferId(self.vertex_buffer_sizes.len() - 1))
        }

        fn create_index_buffer(&mut self, indices: &[u32]) -> Result<IndexBufferId, DeviceError> {
            self.index_buffer_sizes.push(indices.len());
            Ok(IndexBufferId(self.index_buffer_sizes.len() - 1))
        }

        fn upload_uniform(&mut self, uniform: &TransformUniform) {
            self.ops.push(DeviceOp::Upload(*uniform));
        }

        fn draw_indexed(
            &mut self,
            vertex_buffer: VertexBufferId,
            index_buffer: IndexBufferId,
            index_count: u32,
        ) {
            self.ops.push(DeviceOp::Draw {
                vertex_buffer,
                index_buffer,
                index_count,
            });
        }
    }

    fn test_scene(device: &mut RecordingDevice) -> Scene {
        Scene::new(device, 800, 600).expect("scene creation against mock device")
    }

    #[test]
    fn init_uploads_every_mesh() {
        let mut device = RecordingDevice::default();
        let scene = test_scene(&mut device);

        // quad + three cuboids
        assert_eq!(device.vertex_buffer_sizes, vec![4, 24, 24, 24]);
        assert_eq!(device.index_buffer_sizes, vec![6, 36, 36, 36]);
        assert_eq!(scene.camera().position(), Vector3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn zero_dt_re_derives_identical_transforms() {
        let mut device = RecordingDevice::default();
        let mut scene = test_scene(&mut device);
        let input = InputState::new();

        scene.update(0.5, &input);
        let sun = scene.sun.transform();
        let earth = scene.earth.transform();
        let moon = scene.moon.transform();
        let angle = scene.spin_angle;

        scene.update(0.0, &input);
        assert_eq!(scene.spin_angle, angle);
        assert_eq!(scene.sun.transform(), sun);
        assert_eq!(scene.earth.transform(), earth);
        assert_eq!(scene.moon.transform(), moon);
    }

    #[test]
    fn children_compose_against_the_parent_transform() {
        let mut device = RecordingDevice::default();
        let mut scene = test_scene(&mut device);
        let input = InputState::new();

        scene.update(2.0, &input);
        scene.update(0.0, &input); // transforms now reflect the accumulated angle

        let angle = scene.spin_angle;
        let sun = Matrix4::from_angle_y(Rad(-angle)) * Matrix4::from_scale(1.5);
        let earth = sun
            * Matrix4::from_translation(Vector3::new(5.0, 0.0, 0.0))
            * Matrix4::from_scale(1.5);
        let moon = earth
            * Matrix4::from_translation(Vector3::new(1.0, 0.0, 0.0))
            * Matrix4::from_angle_y(Rad(-angle))
            * Matrix4::from_scale(1.5);

        assert_eq!(scene.sun.transform(), sun);
        assert_eq!(scene.earth.transform(), earth);
        assert_eq!(scene.moon.transform(), moon);
    }

    #[test]
    fn render_interleaves_upload_and_draw_in_fixed_order() {
        let mut device = RecordingDevice::default();
        let mut scene = test_scene(&mut device);
        scene.update(0.016, &InputState::new());

        device.ops.clear();
        scene.render(&mut device);

        assert_eq!(device.ops.len(), 8);

        let objects = [&scene.quad, &scene.sun, &scene.earth, &scene.moon];
        let mut shared = None;
        for (i, object) in objects.iter().enumerate() {
            let DeviceOp::Upload(uniform) = &device.ops[i * 2] else {
                panic!("op {} is not an upload", i * 2);
            };
            let DeviceOp::Draw { index_count, .. } = &device.ops[i * 2 + 1] else {
                panic!("op {} is not a draw", i * 2 + 1);
            };

            // Every draw reads the uniform written immediately before it.
            assert_eq!(
                uniform.model,
                crate::gfx::device::matrix4_to_array(object.transform())
            );
            assert_eq!(*index_count, object.mesh().index_count());

            // View and projection are the frame-shared pair.
            let pair = (uniform.view, uniform.projection);
            assert_eq!(*shared.get_or_insert(pair), pair);
        }
    }

    #[test]
    fn held_movement_keys_drive_the_camera() {
        let mut device = RecordingDevice::default();
        let mut scene = test_scene(&mut device);

        let mut input = InputState::new();
        input.set_key(KeyCode::KeyW, true);

        scene.update(1.0, &input);
        // Forward at yaw 0 is world -z; speed 5 for one second.
        assert_eq!(scene.camera().position(), Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn pointer_delta_rotates_the_camera() {
        let mut device = RecordingDevice::default();
        let mut scene = test_scene(&mut device);

        let mut input = InputState::new();
        input.accumulate_pointer_delta(100.0, -40.0);

        scene.update(0.016, &input);
        assert!(scene.camera().yaw() < 0.0);
        assert!(scene.camera().pitch() > 0.0);
    }

    #[test]
    fn resize_touches_aspect_only() {
        let mut device = RecordingDevice::default();
        let mut scene = test_scene(&mut device);
        let before = scene.camera().projection();

        scene.on_window_resized(1024, 256);

        let after = scene.camera().projection();
        assert_eq!(scene.viewport(), (1024, 256));
        assert_ne!(before[0][0], after[0][0]);
        assert_eq!(before[1][1], after[1][1]);
        assert_eq!(before[2][2], after[2][2]);
        assert_eq!(before[3][2], after[3][2]);
    }

    #[test]
    fn transforms_survive_identity_check_at_startup() {
        let mut device = RecordingDevice::default();
        let scene = test_scene(&mut device);
        // Before the first update every transform is the identity.
        assert_eq!(scene.sun.transform(), Matrix4::identity());
    }
}
