use crate::api::types::TextureId;

/// Geometry primitive a mesh is built from.
/// Segment counts are tessellation hints for the host renderer; picking
/// always uses the exact analytic shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// UV sphere centred on the object origin.
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Flat quad in the local XY plane, facing +Z.
    Plane { width: f32, height: f32 },
}

impl Geometry {
    pub fn sphere(radius: f32) -> Self {
        Geometry::Sphere {
            radius,
            width_segments: 32,
            height_segments: 32,
        }
    }

    pub fn plane(width: f32, height: f32) -> Self {
        Geometry::Plane { width, height }
    }

    /// Wire tag for the render buffer: 0 = sphere, 1 = plane.
    pub fn kind(&self) -> f32 {
        match self {
            Geometry::Sphere { .. } => 0.0,
            Geometry::Plane { .. } => 1.0,
        }
    }
}

/// Standard lit material. Textures are optional: until a texture finishes
/// loading on the host, the mesh renders with the base colour only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub map: Option<TextureId>,
    pub normal_map: Option<TextureId>,
    pub transparent: bool,
    pub color: [f32; 3],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            map: None,
            normal_map: None,
            transparent: false,
            color: [1.0, 1.0, 1.0],
        }
    }
}

impl Material {
    pub fn textured(map: TextureId) -> Self {
        Self {
            map: Some(map),
            ..Default::default()
        }
    }

    pub fn with_normal_map(mut self, normal_map: TextureId) -> Self {
        self.normal_map = Some(normal_map);
        self
    }

    pub fn transparent(mut self) -> Self {
        self.transparent = true;
        self
    }
}

/// Renderable surface of an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub geometry: Geometry,
    pub material: Material,
}

impl MeshComponent {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self { geometry, material }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_defaults_to_32_segments() {
        match Geometry::sphere(1.0) {
            Geometry::Sphere { radius, width_segments, height_segments } => {
                assert_eq!(radius, 1.0);
                assert_eq!(width_segments, 32);
                assert_eq!(height_segments, 32);
            }
            _ => panic!("Expected sphere"),
        }
    }

    #[test]
    fn material_builders() {
        let mat = Material::textured(TextureId(3))
            .with_normal_map(TextureId(4))
            .transparent();
        assert_eq!(mat.map, Some(TextureId(3)));
        assert_eq!(mat.normal_map, Some(TextureId(4)));
        assert!(mat.transparent);
    }
}
