use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::api::types::ObjectId;
use crate::components::mesh::MeshComponent;

/// Fat scene object: a single struct with optional components.
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Unique identifier.
    pub id: ObjectId,
    /// Name used for picking and overlay pairing. Empty for anonymous objects.
    pub name: String,
    /// Inactive objects are neither rendered nor picked.
    pub active: bool,
    /// Position in world space.
    pub position: Vec3,
    /// Euler rotation in radians, applied in XYZ order.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Mesh component (objects without one are invisible and never picked).
    pub mesh: Option<MeshComponent>,
}

impl SceneObject {
    pub fn new(id: ObjectId) -> Self {
        Self {
            id,
            name: String::new(),
            active: true,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            mesh: None,
        }
    }

    // -- Builder pattern --

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn is_mesh(&self) -> bool {
        self.mesh.is_some()
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Local-to-world matrix (scale, then rotate, then translate).
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation(), self.position)
    }
}
