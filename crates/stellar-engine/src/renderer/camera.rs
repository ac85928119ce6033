use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Perspective camera with a vertical field of view.
/// Projection follows GL clip conventions (NDC z in [-1, 1]).
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Width / height of the viewport.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Position in world space.
    pub position: Vec3,
    /// Orientation. Identity looks down -Z with +Y up.
    pub orientation: Quat,
    projection: Mat4,
    projection_inverse: Mat4,
}

/// GPU-side uniform data for the camera.
///
/// Wire format (20 floats / 80 bytes): column-major view-projection
/// followed by the camera position and a pad.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub _pad: f32,
}

impl CameraUniform {
    pub const FLOATS: usize = 20;
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            fov_deg,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            projection: Mat4::IDENTITY,
            projection_inverse: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Recompute the cached projection. Call after changing fov, aspect,
    /// near or far.
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh_gl(
            self.fov_deg.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
        self.projection_inverse = self.projection.inverse();
    }

    /// Set the aspect ratio and recompute the projection.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Camera-to-world transform.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    /// World-to-camera transform.
    pub fn view_matrix(&self) -> Mat4 {
        self.world_matrix().inverse()
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Map a point in normalized device coordinates back to world space.
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        let view = self.projection_inverse.project_point3(ndc);
        self.world_matrix().transform_point3(view)
    }

    /// Map a world-space point to normalized device coordinates.
    pub fn project(&self, world: Vec3) -> Vec3 {
        self.view_projection().project_point3(world)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_projection: self.view_projection().to_cols_array_2d(),
            position: self.position.to_array(),
            _pad: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(75.0, 16.0 / 9.0, 0.1, 100.0).with_position(Vec3::new(0.0, 0.0, 2.0))
    }

    #[test]
    fn center_of_near_plane_is_in_front_of_camera() {
        let cam = camera();
        let near = cam.unproject(Vec3::new(0.0, 0.0, -1.0));
        assert!((near - Vec3::new(0.0, 0.0, 1.9)).length() < 1e-4, "{:?}", near);
    }

    #[test]
    fn project_unproject_agree() {
        let cam = camera();
        let p = Vec3::new(0.5, -0.25, -3.0);
        let back = cam.unproject(cam.project(p));
        assert!((back - p).length() < 1e-3, "{:?}", back);
    }

    #[test]
    fn set_aspect_updates_projection() {
        let mut cam = camera();
        let before = cam.projection_matrix();
        cam.set_aspect(1.0);
        assert_eq!(cam.aspect, 1.0);
        assert_ne!(before, cam.projection_matrix());
    }

    #[test]
    fn moving_camera_moves_view() {
        let mut cam = camera();
        cam.position.y = -5.0;
        let ndc = cam.project(Vec3::new(0.0, -5.0, 0.0));
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    }

    #[test]
    fn uniform_is_20_floats() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), CameraUniform::FLOATS * 4);
    }
}
