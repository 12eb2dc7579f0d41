/// 3D transformation matrices and the orbiting view state
use std::f32::consts::TAU;

use nalgebra::{Matrix4, Vector3};

/// Step applied by one rotate key press (radians)
pub const ROTATE_STEP: f32 = 0.1;
/// Distance from the camera to the scene origin after a reset
pub const DEFAULT_DISTANCE: f32 = 35.0;

/// Camera orbit around the scene origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Rotation around the Y axis (radians)
    pub yaw: f32,
    /// Rotation around the X axis (radians)
    pub pitch: f32,
    pub distance: f32,
}

impl ViewState {
    pub fn new(yaw: f32, pitch: f32, distance: f32) -> Self {
        Self {
            yaw,
            pitch,
            distance,
        }
    }

    pub fn rotate_yaw(&mut self, delta: f32) {
        self.yaw = wrap_angle(self.yaw + delta);
    }

    pub fn rotate_pitch(&mut self, delta: f32) {
        self.pitch = wrap_angle(self.pitch + delta);
    }

    pub fn zoom_in(&mut self) {
        self.distance *= 0.9;
    }

    pub fn zoom_out(&mut self) {
        self.distance *= 1.1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// World-to-eye matrix: pull back by `distance`, then pitch, then yaw
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Transform::translation_matrix(0.0, 0.0, -self.distance)
            * Transform::axis_rotation(Vector3::x(), self.pitch)
            * Transform::axis_rotation(Vector3::y(), self.yaw)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(0.0, 0.0, DEFAULT_DISTANCE)
    }
}

/// Keep an angle inside `[0, 2π]`
fn wrap_angle(angle: f32) -> f32 {
    if angle < 0.0 {
        angle + TAU
    } else if angle > TAU {
        angle - TAU
    } else {
        angle
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation of `angle` radians around a unit axis
    pub fn axis_rotation(axis: Vector3<f32>, angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(axis * angle)
    }

    /// Same as `axis_rotation`, with the angle in degrees
    pub fn rotation_degrees(axis: Vector3<f32>, degrees: f32) -> Matrix4<f32> {
        Self::axis_rotation(axis, degrees.to_radians())
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }
}
