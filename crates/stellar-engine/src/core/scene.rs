use std::collections::HashMap;
use crate::api::types::{ObjectId, TextureId};
use crate::components::object::SceneObject;
use crate::error::{EngineError, Result};

/// Flat object storage with an id index.
/// Designed for small-to-medium object counts (hundreds, not millions).
/// Object ids must not change after spawn.
pub struct Scene {
    objects: Vec<SceneObject>,
    /// ID -> slot in `objects`; the first object spawned with an id owns it.
    index: HashMap<ObjectId, usize>,
    /// Texture drawn behind everything, if any.
    pub background: Option<TextureId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            background: None,
        }
    }

    /// Add an object to the scene. Non-empty names must be unique.
    pub fn spawn(&mut self, object: SceneObject) -> Result<ObjectId> {
        if object.is_named() && self.find_by_name(&object.name).is_some() {
            return Err(EngineError::DuplicateName(object.name));
        }
        let id = object.id;
        self.index.entry(id).or_insert(self.objects.len());
        self.objects.push(object);
        Ok(id)
    }

    /// Remove an object by ID. Returns the removed object if found.
    pub fn despawn(&mut self, id: ObjectId) -> Option<SceneObject> {
        let idx = *self.index.get(&id)?;
        let removed = self.objects.remove(idx);
        self.reindex();
        Some(removed)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.index.get(&id).map(|&idx| &self.objects[idx])
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        let idx = *self.index.get(&id)?;
        self.objects.get_mut(idx)
    }

    /// Iterate over all objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.iter_mut()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.name == name)
    }

    /// Objects eligible for hit testing: active meshes with a non-empty name.
    pub fn pickable(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects
            .iter()
            .filter(|o| o.active && o.is_mesh() && o.is_named())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.index.clear();
        self.background = None;
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (idx, o) in self.objects.iter().enumerate() {
            self.index.entry(o.id).or_insert(idx);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{Geometry, Material, MeshComponent};
    use glam::Vec3;

    fn sphere() -> MeshComponent {
        MeshComponent::new(Geometry::sphere(1.0), Material::default())
    }

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = ObjectId(1);
        scene
            .spawn(SceneObject::new(id).with_position(Vec3::new(0.0, -3.0, 0.0)))
            .unwrap();
        assert_eq!(scene.get(id).unwrap().position.y, -3.0);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut scene = Scene::new();
        scene.spawn(SceneObject::new(ObjectId(1)).with_name("sun")).unwrap();
        let err = scene.spawn(SceneObject::new(ObjectId(2)).with_name("sun"));
        assert!(matches!(err, Err(EngineError::DuplicateName(n)) if n == "sun"));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn anonymous_objects_may_share_the_empty_name() {
        let mut scene = Scene::new();
        scene.spawn(SceneObject::new(ObjectId(1))).unwrap();
        scene.spawn(SceneObject::new(ObjectId(2))).unwrap();
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn pickable_filters_unnamed_and_meshless() {
        let mut scene = Scene::new();
        scene.spawn(SceneObject::new(ObjectId(1)).with_name("sun").with_mesh(sphere())).unwrap();
        scene.spawn(SceneObject::new(ObjectId(2)).with_mesh(sphere())).unwrap();
        scene.spawn(SceneObject::new(ObjectId(3)).with_name("empty")).unwrap();
        let picked: Vec<_> = scene.pickable().map(|o| o.id).collect();
        assert_eq!(picked, vec![ObjectId(1)]);
    }

    #[test]
    fn despawn_preserves_order() {
        let mut scene = Scene::new();
        for i in 1..=3 {
            scene.spawn(SceneObject::new(ObjectId(i))).unwrap();
        }
        scene.despawn(ObjectId(2));
        let ids: Vec<_> = scene.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![ObjectId(1), ObjectId(3)]);
    }

    #[test]
    fn lookup_follows_shifted_objects_after_despawn() {
        let mut scene = Scene::new();
        for i in 1..=4 {
            scene
                .spawn(SceneObject::new(ObjectId(i)).with_position(Vec3::new(i as f32, 0.0, 0.0)))
                .unwrap();
        }
        assert!(scene.despawn(ObjectId(2)).is_some());
        assert!(scene.despawn(ObjectId(2)).is_none());
        assert!(scene.get(ObjectId(2)).is_none());
        assert_eq!(scene.get(ObjectId(3)).unwrap().position.x, 3.0);
        scene.get_mut(ObjectId(4)).unwrap().position.x = 40.0;
        assert_eq!(scene.iter().last().unwrap().position.x, 40.0);
    }

    #[test]
    fn clear_empties_the_index() {
        let mut scene = Scene::new();
        scene.spawn(SceneObject::new(ObjectId(1))).unwrap();
        scene.clear();
        assert!(scene.get(ObjectId(1)).is_none());
        scene.spawn(SceneObject::new(ObjectId(1)).with_name("again")).unwrap();
        assert_eq!(scene.get(ObjectId(1)).unwrap().name, "again");
    }
}
