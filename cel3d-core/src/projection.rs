/// Camera and projection utilities
use nalgebra::{Matrix4, Point3};

/// A point projected onto the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// Normalized device depth in `[-1, 1]`, smaller is closer
    pub depth: f32,
}

/// Perspective camera
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera for a viewport of `width` x `height` units.
    ///
    /// `cell_aspect` is the height/width ratio of one unit, roughly 2 for
    /// terminal character cells and 1 for square pixels.
    pub fn new(width: u32, height: u32, cell_aspect: f32) -> Self {
        Self {
            fov: std::f32::consts::FRAC_PI_4, // 45 degrees
            aspect: width as f32 / (height.max(1) as f32 * cell_aspect),
            near: 0.1,
            far: 100.0,
        }
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a point through a model-view matrix onto a `width` x `height` screen.
    ///
    /// Points behind the eye or outside the depth range yield `None`; points
    /// off the sides of the screen are still returned so triangles crossing
    /// the border can be clipped by the rasterizer.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_view: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<ScreenPoint> {
        let clip = self.projection_matrix() * model_view * point.to_homogeneous();

        // Prevent division by near-zero depth values
        if clip.w < 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if ndc.z < -1.0 || ndc.z > 1.0 {
            return None;
        }

        Some(ScreenPoint {
            x: (ndc.x + 1.0) * 0.5 * width as f32,
            y: (1.0 - ndc.y) * 0.5 * height as f32,
            depth: ndc.z,
        })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600, 1.0)
    }
}
