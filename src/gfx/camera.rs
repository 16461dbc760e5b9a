//! Fixed viewpoint and the model-view-projection uniform.

use cgmath::{perspective, Deg, Matrix4, Point3, SquareMatrix, Vector3};

/// Converts cgmath's OpenGL clip space (z in [-1, 1]) to wgpu's (z in [0, 1]).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// A camera that never moves.
///
/// Only the aspect ratio follows the window; everything else is fixed at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedCamera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in degrees
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for FixedCamera {
    fn default() -> Self {
        Self {
            eye: Point3::new(0.0, 3.0, -2.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::unit_y(),
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl FixedCamera {
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(Deg(self.fovy), aspect, self.znear, self.zfar)
    }

    /// Model-view-projection for a model sitting at the origin.
    pub fn build_mvp(&self, width: u32, height: u32) -> Matrix4<f32> {
        let aspect = width as f32 / height.max(1) as f32;
        let model = Matrix4::identity();
        self.projection_matrix(aspect) * self.view_matrix() * model
    }
}

/// Uniform block bound at group 0, binding 0 in the torus shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MvpUniform {
    pub mvp: [[f32; 4]; 4],
}

impl MvpUniform {
    pub fn new(matrix: Matrix4<f32>) -> Self {
        Self { mvp: matrix.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    fn to_ndc(mvp: Matrix4<f32>, point: [f32; 3]) -> Vector4<f32> {
        let clip = mvp * Vector4::new(point[0], point[1], point[2], 1.0);
        clip / clip.w
    }

    #[test]
    fn test_target_projects_to_screen_centre() {
        let mvp = FixedCamera::default().build_mvp(800, 600);
        let ndc = to_ndc(mvp, [0.0, 0.0, 0.0]);

        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_torus_fits_in_view() {
        let mvp = FixedCamera::default().build_mvp(800, 600);

        // Outermost points of the default torus (R + r = 1.5)
        for point in [[1.5, 0.0, 0.0], [-1.5, 0.0, 0.0], [0.0, 1.5, 0.0], [0.0, -1.5, 0.0]] {
            let ndc = to_ndc(mvp, point);
            assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0, "{:?} clipped", point);
            assert!((0.0..=1.0).contains(&ndc.z));
        }
    }

    #[test]
    fn test_aspect_follows_window() {
        let camera = FixedCamera::default();
        let wide = to_ndc(camera.build_mvp(1600, 600), [1.0, 0.0, 0.0]);
        let narrow = to_ndc(camera.build_mvp(800, 600), [1.0, 0.0, 0.0]);

        assert!(wide.x.abs() < narrow.x.abs());
    }

    #[test]
    fn test_zero_height_does_not_divide_by_zero() {
        let mvp = FixedCamera::default().build_mvp(800, 0);
        let uniform = MvpUniform::new(mvp);
        assert!(uniform.mvp.iter().flatten().all(|v| v.is_finite()));
    }
}
