use crate::api::types::TextureId;
use crate::assets::registry::TextureRegistry;
use crate::components::mesh::Geometry;
use crate::components::object::SceneObject;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from a set of objects.
/// Opaque meshes come first, then transparent ones; `transparent_split`
/// marks the boundary. Textures the host has not finished loading are
/// written as -1 so the mesh draws untextured meanwhile.
pub fn build_render_buffer<'a>(
    objects: impl Iterator<Item = &'a SceneObject>,
    textures: &TextureRegistry,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();

    let mut transparent: Vec<RenderInstance> = Vec::new();

    for object in objects {
        if !object.active {
            continue;
        }
        let mesh = match &object.mesh {
            Some(m) => m,
            None => continue,
        };

        let loaded = |id: Option<TextureId>| id.filter(|t| textures.is_loaded(*t));
        let (geometry, size) = match mesh.geometry {
            Geometry::Sphere { radius, .. } => (mesh.geometry.kind(), [radius, 0.0]),
            Geometry::Plane { width, height } => (mesh.geometry.kind(), [width, height]),
        };

        let instance = RenderInstance {
            model: object.world_matrix().to_cols_array_2d(),
            map: TextureId::wire(loaded(mesh.material.map)),
            normal_map: TextureId::wire(loaded(mesh.material.normal_map)),
            geometry,
            transparent: if mesh.material.transparent { 1.0 } else { 0.0 },
            size,
            _pad: [0.0; 2],
        };

        if mesh.material.transparent {
            transparent.push(instance);
        } else {
            buffer.push(instance);
        }
    }

    buffer.set_transparent_split(buffer.instance_count());
    for inst in transparent {
        buffer.push(inst);
    }
}
