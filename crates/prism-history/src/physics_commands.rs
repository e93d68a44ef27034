//! Physics body commands

use crate::command::Command;
use crate::context::EditorContext;
use prism_core::ObjectId;
use prism_physics::BodySpec;

/// Attach a physics body to an object. If the object already had a body,
/// the replaced spec is kept and restored on revert.
pub struct AddPhysicsCommand {
    id: ObjectId,
    spec: BodySpec,
    replaced: Option<BodySpec>,
}

impl AddPhysicsCommand {
    pub fn new(id: ObjectId, spec: BodySpec) -> Self {
        Self {
            id,
            spec,
            replaced: None,
        }
    }
}

impl Command for AddPhysicsCommand {
    fn name(&self) -> &str {
        "Add Physics"
    }

    fn apply(&mut self, ctx: &mut EditorContext<'_>) {
        if let Some(object) = ctx.scene.object(self.id) {
            self.replaced = ctx.physics.add_body(object, self.spec);
        }
    }

    fn revert(&mut self, ctx: &mut EditorContext<'_>) {
        match (self.replaced.take(), ctx.scene.object(self.id)) {
            (Some(previous), Some(object)) => {
                ctx.physics.add_body(object, previous);
            }
            _ => {
                ctx.physics.remove_body(self.id);
            }
        }
    }
}

/// Detach an object's physics body; revert re-attaches the same spec.
pub struct RemovePhysicsCommand {
    id: ObjectId,
    removed: Option<BodySpec>,
}

impl RemovePhysicsCommand {
    pub fn new(id: ObjectId) -> Self {
        Self { id, removed: None }
    }
}

impl Command for RemovePhysicsCommand {
    fn name(&self) -> &str {
        "Remove Physics"
    }

    fn apply(&mut self, ctx: &mut EditorContext<'_>) {
        self.removed = ctx.physics.remove_body(self.id);
    }

    fn revert(&mut self, ctx: &mut EditorContext<'_>) {
        if let Some(spec) = self.removed.take() {
            if let Some(object) = ctx.scene.object(self.id) {
                ctx.physics.add_body(object, spec);
            }
        }
    }
}
