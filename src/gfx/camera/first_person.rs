//! First-person fly camera: yaw/pitch orientation, no roll.

use cgmath::{perspective, InnerSpace, Matrix4, Rad, Vector3, Zero};

/// Radians of rotation per pointer device unit.
pub const MOUSE_SENSITIVITY: f32 = 0.001;

/// Pitch stays just under ±π/2 so the view never reaches the poles.
const PITCH_LIMIT: f32 = 1.5;

/// A first-person camera holding position, look angles, and fixed
/// projection parameters.
///
/// Orientation is two angles only: yaw about the world y axis and
/// pitch about the camera's local x axis. The world transform is
/// `T(position) * R_y(yaw) * R_x(pitch)`; the view transform is its
/// inverse.
#[derive(Debug, Clone, Copy)]
pub struct FirstPersonCamera {
    position: Vector3<f32>,
    yaw: f32,
    pitch: f32,
    fovy: Rad<f32>,
    aspect: f32,
    znear: f32,
    zfar: f32,
}

impl FirstPersonCamera {
    pub fn new(fovy: Rad<f32>, aspect: f32, znear: f32, zfar: f32) -> Self {
        Self {
            position: Vector3::zero(),
            yaw: 0.0,
            pitch: 0.0,
            fovy,
            aspect,
            znear,
            zfar,
        }
    }

    /// Sets the absolute position. No validation.
    pub fn move_to(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    /// Moves the camera along its own horizontal basis.
    ///
    /// `input` is the raw combination of held movement axes:
    /// x = strafe (-1 left / +1 right), y = vertical (-1 down / +1 up),
    /// z = forward/back (-1 forward / +1 back). The basis is built from
    /// yaw alone and flattened onto the horizontal plane, so looking up
    /// or down never tilts travel. Displacement scales with
    /// `speed * dt`, which keeps movement frame-rate independent.
    pub fn move_by(&mut self, input: Vector3<f32>, speed: f32, dt: f32) {
        let heading = Matrix4::from_angle_y(Rad(self.yaw));
        let forward = flatten(heading.z.truncate());
        let right = flatten(heading.x.truncate());
        let up = Vector3::unit_y();

        let direction = right * input.x + up * input.y + forward * input.z;
        self.position += direction * speed * dt;
    }

    /// Applies raw pointer motion to the look angles.
    ///
    /// Deltas are device units; both map through [`MOUSE_SENSITIVITY`]
    /// and subtract, so dragging right turns the view right under the
    /// rotation convention used here. Yaw is unbounded (trig handles
    /// wraparound); pitch is clamped.
    pub fn rotate(&mut self, delta_x: i32, delta_y: i32) {
        self.yaw -= delta_x as f32 * MOUSE_SENSITIVITY;

        self.pitch -= delta_y as f32 * MOUSE_SENSITIVITY;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Returns the world-to-view transform.
    ///
    /// The camera's world transform is `T(position) * R(yaw, pitch)`,
    /// so the view transform is `R^-1 * T^-1`. Both factors invert
    /// cheaply on their own (negated angles, negated translation), so
    /// the inverse is assembled directly rather than running a general
    /// 4x4 inversion.
    pub fn world_to_view(&self) -> Matrix4<f32> {
        let rotation_inv =
            Matrix4::from_angle_x(Rad(-self.pitch)) * Matrix4::from_angle_y(Rad(-self.yaw));
        let translation_inv = Matrix4::from_translation(-self.position);

        rotation_inv * translation_inv
    }

    /// Builds the perspective projection from the stored parameters.
    pub fn projection(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    /// Called on viewport resize. Only the aspect ratio changes;
    /// fov and clip planes are fixed at construction.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

/// Projects a basis vector onto the horizontal plane and renormalizes.
/// Guards the degenerate near-zero case so a basis collapsed by extreme
/// pitch can never divide by ~0.
fn flatten(mut v: Vector3<f32>) -> Vector3<f32> {
    v.y = 0.0;
    if v.magnitude2() > f32::EPSILON {
        v.normalize()
    } else {
        Vector3::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, SquareMatrix};
    use rand::Rng;

    fn test_camera() -> FirstPersonCamera {
        FirstPersonCamera::new(Deg(45.0).into(), 16.0 / 9.0, 1.0, 500.0)
    }

    fn assert_matrix_near(a: Matrix4<f32>, b: Matrix4<f32>, epsilon: f32) {
        for col in 0..4 {
            for row in 0..4 {
                assert!(
                    (a[col][row] - b[col][row]).abs() < epsilon,
                    "matrices differ at [{}][{}]: {} vs {}",
                    col,
                    row,
                    a[col][row],
                    b[col][row]
                );
            }
        }
    }

    #[test]
    fn rotate_scales_yaw_by_sensitivity() {
        let mut camera = test_camera();
        camera.rotate(250, 0);
        assert_eq!(camera.yaw(), -(250.0 * MOUSE_SENSITIVITY));

        camera.rotate(-250, 0);
        assert_eq!(camera.yaw(), 0.0);
    }

    #[test]
    fn pitch_clamps_regardless_of_input_magnitude() {
        let mut camera = test_camera();
        camera.rotate(0, 100_000);
        assert_eq!(camera.pitch(), -1.5);

        // Clamp is idempotent under further input in the same direction.
        camera.rotate(0, 100_000);
        assert_eq!(camera.pitch(), -1.5);

        camera.rotate(0, -1_000_000);
        assert_eq!(camera.pitch(), 1.5);
    }

    #[test]
    fn zero_input_never_moves() {
        let mut camera = test_camera();
        camera.move_to(Vector3::new(1.0, 2.0, 3.0));
        camera.move_by(Vector3::zero(), 100.0, 0.016);
        assert_eq!(camera.position(), Vector3::new(1.0, 2.0, 3.0));

        camera.move_by(Vector3::zero(), 0.0, 0.0);
        assert_eq!(camera.position(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn forward_input_at_zero_yaw_moves_along_negative_z() {
        let mut camera = test_camera();
        camera.move_by(Vector3::new(0.0, 0.0, -1.0), 1.0, 1.0);

        let position = camera.position();
        assert!((position.x - 0.0).abs() < 1e-6);
        assert!((position.y - 0.0).abs() < 1e-6);
        assert!((position.z - -1.0).abs() < 1e-6);
    }

    #[test]
    fn pitch_does_not_tilt_horizontal_movement() {
        let mut camera = test_camera();
        camera.rotate(0, 800); // look well below the horizon
        camera.move_by(Vector3::new(0.0, 0.0, -1.0), 1.0, 1.0);
        assert_eq!(camera.position().y, 0.0);
    }

    #[test]
    fn view_matrix_inverts_world_transform() {
        let mut rng = rand::rng();

        for _ in 0..5 {
            let mut camera = test_camera();
            let position = Vector3::new(
                rng.random_range(-50.0..50.0),
                rng.random_range(-50.0..50.0),
                rng.random_range(-50.0..50.0),
            );
            camera.move_to(position);
            camera.rotate(rng.random_range(-3000..3000), rng.random_range(-1400..1400));

            let world = Matrix4::from_translation(camera.position())
                * Matrix4::from_angle_y(Rad(camera.yaw()))
                * Matrix4::from_angle_x(Rad(camera.pitch()));

            assert_matrix_near(world * camera.world_to_view(), Matrix4::identity(), 1e-4);
        }
    }

    #[test]
    fn resize_changes_only_the_aspect_term() {
        let mut camera = test_camera();
        let before = camera.projection();

        camera.set_aspect(4.0 / 3.0);
        let after = camera.projection();

        assert_ne!(before[0][0], after[0][0]);
        assert_eq!(before[1][1], after[1][1]); // fov term
        assert_eq!(before[2][2], after[2][2]); // near/far terms
        assert_eq!(before[3][2], after[3][2]);
    }
}
