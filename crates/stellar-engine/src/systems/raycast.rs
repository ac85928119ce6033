//! Pointer picking: pick-ray construction and ray/mesh intersection.
//!
//! Meshes are intersected against their exact analytic shapes in object
//! local space, so rotation and non-uniform scale come for free from the
//! inverse world matrix. Only front faces are hit: a ray starting inside a
//! sphere, or reaching a plane from behind, reports nothing.

use glam::{Mat4, Vec2, Vec3};
use crate::api::types::ObjectId;
use crate::components::mesh::Geometry;
use crate::components::object::SceneObject;
use crate::renderer::camera::PerspectiveCamera;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length for world-space rays. Local-space copies keep the
    /// scaled direction so `t` stays comparable.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    pub fn transformed(&self, m: &Mat4) -> Ray {
        Ray {
            origin: m.transform_point3(self.origin),
            direction: m.transform_vector3(self.direction),
        }
    }
}

/// One ray hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub object: ObjectId,
    /// World-space distance from the ray origin.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

#[derive(Debug, Clone)]
pub struct Raycaster {
    pub ray: Ray,
    /// Hits closer than this are ignored.
    pub near: f32,
    /// Hits farther than this are ignored.
    pub far: f32,
}

impl Default for Raycaster {
    fn default() -> Self {
        Self {
            ray: Ray::new(Vec3::ZERO, Vec3::NEG_Z),
            near: 0.0,
            far: f32::INFINITY,
        }
    }
}

impl Raycaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aim the ray through a pointer position given in NDC ([-1, 1] on both
    /// axes, +Y up): unproject the near and far plane points and shoot from
    /// the near point toward the far one.
    pub fn set_from_camera(&mut self, pointer: Vec2, camera: &PerspectiveCamera) {
        let near = camera.unproject(pointer.extend(-1.0));
        let far = camera.unproject(pointer.extend(1.0));
        self.ray = Ray::new(near, (far - near).normalize_or_zero());
    }

    /// Intersect a single object. Inactive and mesh-less objects never hit.
    pub fn intersect_object(&self, object: &SceneObject) -> Option<Intersection> {
        if !object.active {
            return None;
        }
        let mesh = object.mesh.as_ref()?;
        let world = object.world_matrix();
        if world.determinant().abs() < f32::EPSILON {
            return None;
        }
        let local = self.ray.transformed(&world.inverse());

        let t = match mesh.geometry {
            Geometry::Sphere { radius, .. } => ray_sphere_front(&local, radius)?,
            Geometry::Plane { width, height } => ray_plane_front(&local, width, height)?,
        };

        let point = world.transform_point3(local.at(t));
        let distance = point.distance(self.ray.origin);
        if distance < self.near || distance > self.far {
            return None;
        }
        Some(Intersection {
            object: object.id,
            distance,
            point,
        })
    }

    /// Intersect many objects. Results are sorted nearest first.
    pub fn intersect_objects<'a>(
        &self,
        objects: impl IntoIterator<Item = &'a SceneObject>,
    ) -> Vec<Intersection> {
        let mut hits: Vec<Intersection> = objects
            .into_iter()
            .filter_map(|o| self.intersect_object(o))
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

/// Entry parameter of a ray against a centred sphere, if the ray starts
/// outside it and the entry point lies ahead.
fn ray_sphere_front(ray: &Ray, radius: f32) -> Option<f32> {
    let a = ray.direction.length_squared();
    if a == 0.0 {
        return None;
    }
    let b = 2.0 * ray.origin.dot(ray.direction);
    let c = ray.origin.length_squared() - radius * radius;
    if c < 0.0 {
        return None;
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let t = (-b - disc.sqrt()) / (2.0 * a);
    (t >= 0.0).then_some(t)
}

/// Hit parameter of a ray against a centred quad in local XY facing +Z.
fn ray_plane_front(ray: &Ray, width: f32, height: f32) -> Option<f32> {
    if ray.direction.z >= 0.0 {
        return None;
    }
    let t = -ray.origin.z / ray.direction.z;
    if t < 0.0 {
        return None;
    }
    let p = ray.at(t);
    (p.x.abs() <= width * 0.5 && p.y.abs() <= height * 0.5).then_some(t)
}
