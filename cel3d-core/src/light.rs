/// Point light orbiting the scene origin
use std::f32::consts::TAU;

use crate::vector::{Vector3f, Vector4f};

/// A light circling the Y axis at a fixed height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitingLight {
    /// Current angle around the Y axis (radians, in `[0, 2π]`)
    pub angle: f32,
    pub radius: f32,
    /// Angular speed in radians per second
    pub speed: f32,
    /// Homogeneous position, recomputed on every step
    pub position: Vector4f,
}

impl OrbitingLight {
    pub fn new(radius: f32, height: f32, speed: f32) -> Self {
        Self {
            angle: 0.0,
            radius,
            speed,
            position: Vector4f::new(&[radius, height, 0.0, 1.0]),
        }
    }

    /// Advance the orbit by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.angle += dt * self.speed;
        if self.angle > TAU {
            self.angle -= TAU;
        }

        self.position[0] = self.radius * self.angle.cos();
        self.position[2] = self.radius * self.angle.sin();
    }

    /// Light position in world space
    pub fn world_position(&self) -> Vector3f {
        self.position.xyz()
    }

    /// Unit vector from `point` towards the light, zero if they coincide
    pub fn direction_from(&self, point: &Vector3f) -> Vector3f {
        let mut dir = self.world_position() - *point;
        if dir.unitize().is_err() {
            return Vector3f::zero();
        }
        dir
    }
}

impl Default for OrbitingLight {
    fn default() -> Self {
        Self::new(10.0, 5.0, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_position() {
        let light = OrbitingLight::default();
        assert_eq!(light.position, Vector4f::new(&[10.0, 5.0, 0.0, 1.0]));
    }

    #[test]
    fn test_step_keeps_radius_and_height() {
        let mut light = OrbitingLight::default();
        for _ in 0..50 {
            light.step(0.37);
            let p = light.world_position();
            let planar = Vector3f::new(&[p.x(), 0.0, p.z()]);
            assert!((planar.length() - 10.0).abs() < 1e-4);
            assert_eq!(p.y(), 5.0);
            assert_eq!(light.position.w(), 1.0);
        }
    }

    #[test]
    fn test_angle_wraps() {
        let mut light = OrbitingLight::default();
        light.step(13.0); // 6.5 rad
        assert!(light.angle >= 0.0 && light.angle <= TAU);
        assert!((light.angle - (6.5 - TAU)).abs() < 1e-5);
    }

    #[test]
    fn test_direction_from() {
        let light = OrbitingLight::new(10.0, 0.0, 0.5);
        let dir = light.direction_from(&Vector3f::zero());
        assert!((dir.x() - 1.0).abs() < 1e-6);
        assert!(light.direction_from(&light.world_position()).is_zero());
    }
}
