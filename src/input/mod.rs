//! Key-state tracking and the declarative movement bindings.
//!
//! The scene never sees raw window events. The host feeds key
//! transitions and pointer motion into an [`InputState`]; the scene
//! asks it boolean key questions and reads the accumulated pointer
//! delta once per frame.

use std::collections::HashSet;

use cgmath::{Vector3, Zero};
use winit::keyboard::KeyCode;

/// Movement bindings: each held key contributes its axis direction
/// additively. Several keys may drive the same axis; holding two of
/// them doubles the contribution, which is accepted rather than
/// special-cased.
const MOVEMENT_BINDINGS: &[(KeyCode, [f32; 3])] = &[
    (KeyCode::KeyW, [0.0, 0.0, -1.0]),
    (KeyCode::ArrowUp, [0.0, 0.0, -1.0]),
    (KeyCode::KeyS, [0.0, 0.0, 1.0]),
    (KeyCode::ArrowDown, [0.0, 0.0, 1.0]),
    (KeyCode::KeyD, [1.0, 0.0, 0.0]),
    (KeyCode::ArrowRight, [1.0, 0.0, 0.0]),
    (KeyCode::KeyA, [-1.0, 0.0, 0.0]),
    (KeyCode::ArrowLeft, [-1.0, 0.0, 0.0]),
    (KeyCode::Space, [0.0, 1.0, 0.0]),
    (KeyCode::ControlLeft, [0.0, -1.0, 0.0]),
];

/// Discrete input snapshot queried by the scene once per frame.
pub struct InputState {
    pressed_keys: HashSet<KeyCode>,
    pointer_delta: (f64, f64),
}

impl InputState {
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            pointer_delta: (0.0, 0.0),
        }
    }

    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.pressed_keys.insert(key);
        } else {
            self.pressed_keys.remove(&key);
        }
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Adds raw pointer motion. Several motion events may arrive
    /// between frames; they accumulate until [`InputState::end_frame`].
    pub fn accumulate_pointer_delta(&mut self, delta_x: f64, delta_y: f64) {
        self.pointer_delta.0 += delta_x;
        self.pointer_delta.1 += delta_y;
    }

    /// Pointer motion in device units since the last frame boundary.
    pub fn pointer_delta(&self) -> (i32, i32) {
        (
            self.pointer_delta.0.round() as i32,
            self.pointer_delta.1.round() as i32,
        )
    }

    /// Marks the frame boundary: pointer motion resets, key state
    /// persists until a release event arrives.
    pub fn end_frame(&mut self) {
        self.pointer_delta = (0.0, 0.0);
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Folds the held movement bindings into one raw input vector:
/// x = strafe, y = vertical, z = forward/back.
pub fn movement_axes(input: &InputState) -> Vector3<f32> {
    MOVEMENT_BINDINGS
        .iter()
        .filter(|(key, _)| input.is_key_down(*key))
        .fold(Vector3::zero(), |axes, (_, direction)| {
            axes + Vector3::from(*direction)
        })
}
