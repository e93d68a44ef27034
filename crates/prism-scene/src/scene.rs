//! Ordered scene graph with id lookup and selection

use crate::object::{MaterialValue, SceneObject};
use prism_core::{ObjectId, Vec3};

/// The editor's scene: an ordered list of objects.
///
/// Order is visible state (layer panels list objects in insertion order,
/// and undoing a removal restores the object at its original index), so
/// a plain `Vec` is the storage, with linear id lookup. Scenes here are
/// editor-scale (tens of objects), not game-scale.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    selected: Option<ObjectId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object to the scene, returning its id.
    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let id = object.id;
        log::debug!("scene: add {} ({:?})", object.name, id);
        self.objects.push(object);
        id
    }

    /// Insert an object at a specific index (clamped), for undo restores.
    pub fn insert_object_at(&mut self, object: SceneObject, index: usize) -> ObjectId {
        let id = object.id;
        let index = index.min(self.objects.len());
        self.objects.insert(index, object);
        id
    }

    /// Remove an object by id, returning it with its former index.
    /// Unknown ids are a no-op returning `None`.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<(SceneObject, usize)> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        let object = self.objects.remove(index);
        log::debug!("scene: remove {} ({:?})", object.name, id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some((object, index))
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.iter().any(|o| o.id == id)
    }

    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Select an object. Selecting an id not in the scene clears the
    /// selection instead of dangling — async completions may race a
    /// removal, and a stale id must never crash a later lookup.
    pub fn select(&mut self, id: Option<ObjectId>) {
        self.selected = id.filter(|id| self.contains(*id));
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    pub fn selected_object(&self) -> Option<&SceneObject> {
        self.selected.and_then(|id| self.object(id))
    }

    // Field mutation helpers. All are no-ops on unknown ids.

    pub fn set_position(&mut self, id: ObjectId, position: Vec3) {
        if let Some(object) = self.object_mut(id) {
            object.transform.position = position;
        }
    }

    pub fn set_rotation(&mut self, id: ObjectId, rotation: Vec3) {
        if let Some(object) = self.object_mut(id) {
            object.transform.rotation = rotation;
        }
    }

    pub fn set_scale(&mut self, id: ObjectId, scale: Vec3) {
        if let Some(object) = self.object_mut(id) {
            object.transform.scale = scale;
        }
    }

    pub fn set_material_value(&mut self, id: ObjectId, value: MaterialValue) {
        if let Some(object) = self.object_mut(id) {
            value.write_to(&mut object.material);
        }
    }

    /// Drop every object and the selection (scene reset).
    pub fn clear(&mut self) {
        self.objects.clear();
        self.selected = None;
    }
}
