//! Scene object commands: creation, removal, transform and material edits

use crate::command::Command;
use crate::context::EditorContext;
use prism_core::{ObjectId, Vec3};
use prism_physics::BodySpec;
use prism_scene::{Material, MaterialValue, Scene, SceneObject};

/// Add an object to the scene and select it.
///
/// The object is stored by value; redo re-inserts the same object (same
/// id) at the same list index it first landed at.
pub struct AddObjectCommand {
    name: String,
    object: SceneObject,
    index: Option<usize>,
}

impl AddObjectCommand {
    pub fn new(object: SceneObject) -> Self {
        Self {
            name: format!("Add {}", object.kind.label()),
            object,
            index: None,
        }
    }

    pub fn object_id(&self) -> ObjectId {
        self.object.id
    }
}

impl Command for AddObjectCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&mut self, ctx: &mut EditorContext<'_>) {
        let id = match self.index {
            Some(index) => ctx.scene.insert_object_at(self.object.clone(), index),
            None => {
                let id = ctx.scene.add_object(self.object.clone());
                self.index = Some(ctx.scene.len() - 1);
                id
            }
        };
        ctx.scene.select(Some(id));
    }

    fn revert(&mut self, ctx: &mut EditorContext<'_>) {
        if let Some((object, index)) = ctx.scene.remove_object(self.object.id) {
            // Keep the latest state so redo restores edits made before undo
            self.object = object;
            self.index = Some(index);
        }
    }
}

/// Remove an object, its physics body included; revert restores both at
/// the object's original list position.
pub struct RemoveObjectCommand {
    id: ObjectId,
    removed: Option<(SceneObject, usize)>,
    body: Option<BodySpec>,
}

impl RemoveObjectCommand {
    pub fn new(id: ObjectId) -> Self {
        Self {
            id,
            removed: None,
            body: None,
        }
    }
}

impl Command for RemoveObjectCommand {
    fn name(&self) -> &str {
        "Delete Object"
    }

    fn apply(&mut self, ctx: &mut EditorContext<'_>) {
        self.body = ctx.physics.remove_body(self.id);
        self.removed = ctx.scene.remove_object(self.id);
    }

    fn revert(&mut self, ctx: &mut EditorContext<'_>) {
        let Some((object, index)) = self.removed.take() else {
            return;
        };
        let id = ctx.scene.insert_object_at(object, index);
        if let (Some(spec), Some(object)) = (self.body, ctx.scene.object(id)) {
            ctx.physics.add_body(object, spec);
        }
        ctx.scene.select(Some(id));
    }
}

/// Move an object.
///
/// The previous position is captured at construction, or on the first
/// apply when the target does not exist yet (a [`MultiCommand`] may
/// create it with an earlier sub-command).
///
/// [`MultiCommand`]: crate::command::MultiCommand
pub struct SetPositionCommand {
    id: ObjectId,
    old: Option<Vec3>,
    new: Vec3,
}

impl SetPositionCommand {
    pub fn new(scene: &Scene, id: ObjectId, new: Vec3) -> Self {
        let old = scene.object(id).map(|o| o.transform.position);
        Self { id, old, new }
    }
}

impl Command for SetPositionCommand {
    fn name(&self) -> &str {
        "Move Object"
    }

    fn apply(&mut self, ctx: &mut EditorContext<'_>) {
        if self.old.is_none() {
            self.old = ctx.scene.object(self.id).map(|o| o.transform.position);
        }
        ctx.scene.set_position(self.id, self.new);
    }

    fn revert(&mut self, ctx: &mut EditorContext<'_>) {
        if let Some(old) = self.old {
            ctx.scene.set_position(self.id, old);
        }
    }
}

/// Rotate an object (Euler degrees)
pub struct SetRotationCommand {
    id: ObjectId,
    old: Vec3,
    new: Vec3,
}

impl SetRotationCommand {
    pub fn new(scene: &Scene, id: ObjectId, new: Vec3) -> Self {
        let old = scene
            .object(id)
            .map(|o| o.transform.rotation)
            .unwrap_or_default();
        Self { id, old, new }
    }
}

impl Command for SetRotationCommand {
    fn name(&self) -> &str {
        "Rotate Object"
    }

    fn apply(&mut self, ctx: &mut EditorContext<'_>) {
        ctx.scene.set_rotation(self.id, self.new);
    }

    fn revert(&mut self, ctx: &mut EditorContext<'_>) {
        ctx.scene.set_rotation(self.id, self.old);
    }
}

/// Scale an object
pub struct SetScaleCommand {
    id: ObjectId,
    old: Vec3,
    new: Vec3,
}

impl SetScaleCommand {
    pub fn new(scene: &Scene, id: ObjectId, new: Vec3) -> Self {
        let old = scene
            .object(id)
            .map(|o| o.transform.scale)
            .unwrap_or_else(|| Vec3::ONE);
        Self { id, old, new }
    }
}

impl Command for SetScaleCommand {
    fn name(&self) -> &str {
        "Scale Object"
    }

    fn apply(&mut self, ctx: &mut EditorContext<'_>) {
        ctx.scene.set_scale(self.id, self.new);
    }

    fn revert(&mut self, ctx: &mut EditorContext<'_>) {
        ctx.scene.set_scale(self.id, self.old);
    }
}

/// Replace an object's whole material
pub struct SetMaterialCommand {
    id: ObjectId,
    old: Material,
    new: Material,
}

impl SetMaterialCommand {
    pub fn new(scene: &Scene, id: ObjectId, new: Material) -> Self {
        let old = scene.object(id).map(|o| o.material).unwrap_or_default();
        Self { id, old, new }
    }
}

impl Command for SetMaterialCommand {
    fn name(&self) -> &str {
        "Change Material"
    }

    fn apply(&mut self, ctx: &mut EditorContext<'_>) {
        if let Some(object) = ctx.scene.object_mut(self.id) {
            object.material = self.new;
        }
    }

    fn revert(&mut self, ctx: &mut EditorContext<'_>) {
        if let Some(object) = ctx.scene.object_mut(self.id) {
            object.material = self.old;
        }
    }
}

/// Edit a single material field (color, roughness, ...)
pub struct SetMaterialValueCommand {
    id: ObjectId,
    old: MaterialValue,
    new: MaterialValue,
}

impl SetMaterialValueCommand {
    pub fn new(scene: &Scene, id: ObjectId, new: MaterialValue) -> Self {
        let old = scene
            .object(id)
            .map(|o| new.read_from(&o.material))
            .unwrap_or(new);
        Self { id, old, new }
    }
}

impl Command for SetMaterialValueCommand {
    fn name(&self) -> &str {
        "Change Material"
    }

    fn apply(&mut self, ctx: &mut EditorContext<'_>) {
        ctx.scene.set_material_value(self.id, self.new);
    }

    fn revert(&mut self, ctx: &mut EditorContext<'_>) {
        ctx.scene.set_material_value(self.id, self.old);
    }
}
