//! The reversible command interface

use crate::context::EditorContext;

/// A reversible unit of mutation.
///
/// `apply` followed by `revert` restores every field the command touched,
/// exactly: the "before" state is captured (at construction or on the
/// first apply), never recomputed. If a command's target has been
/// destroyed independently by the time `revert` runs, the revert is a
/// defensive no-op rather than a crash.
pub trait Command {
    /// Human-readable label for history panels ("Move Object", ...)
    fn name(&self) -> &str;

    fn apply(&mut self, ctx: &mut EditorContext<'_>);

    fn revert(&mut self, ctx: &mut EditorContext<'_>);
}

/// An ordered group of commands forming one undoable operation.
///
/// Applies forward in list order and reverts in reverse order; the
/// ordering matters when sub-commands depend on each other (add an
/// object, then position it).
pub struct MultiCommand {
    name: String,
    commands: Vec<Box<dyn Command>>,
}

impl MultiCommand {
    pub fn new(name: impl Into<String>, commands: Vec<Box<dyn Command>>) -> Self {
        Self {
            name: name.into(),
            commands,
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Command for MultiCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&mut self, ctx: &mut EditorContext<'_>) {
        for command in &mut self.commands {
            command.apply(ctx);
        }
    }

    fn revert(&mut self, ctx: &mut EditorContext<'_>) {
        for command in self.commands.iter_mut().rev() {
            command.revert(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object_commands::{AddObjectCommand, SetPositionCommand};
    use prism_core::Vec3;
    use prism_physics::NullPhysics;
    use prism_scene::{CameraRig, ObjectKind, Scene, SceneObject};
    use prism_timeline::TimelineEngine;

    struct Fixture {
        scene: Scene,
        camera: CameraRig,
        timeline: TimelineEngine,
        physics: NullPhysics,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                scene: Scene::new(),
                camera: CameraRig::default(),
                timeline: TimelineEngine::new(),
                physics: NullPhysics,
            }
        }

        fn ctx(&mut self) -> EditorContext<'_> {
            EditorContext {
                scene: &mut self.scene,
                camera: &mut self.camera,
                timeline: &mut self.timeline,
                physics: &mut self.physics,
            }
        }
    }

    // Add-then-position: the second sub-command targets an object that
    // only exists once the first has applied, so apply must run in list
    // order and revert in reverse order.
    fn add_and_place(fx: &Fixture) -> (MultiCommand, prism_core::ObjectId) {
        let add = AddObjectCommand::new(SceneObject::new(ObjectKind::Box, "Box"));
        let id = add.object_id();
        let place = SetPositionCommand::new(&fx.scene, id, Vec3::new(4.0, 0.0, 0.0));
        let group = MultiCommand::new(
            "Place Box",
            vec![Box::new(add) as Box<dyn Command>, Box::new(place)],
        );
        (group, id)
    }

    #[test]
    fn test_group_applies_in_list_order() {
        let mut fx = Fixture::new();
        let (mut group, id) = add_and_place(&fx);
        assert_eq!(group.len(), 2);

        group.apply(&mut fx.ctx());
        assert_eq!(
            fx.scene.object(id).unwrap().transform.position,
            Vec3::new(4.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_group_reverts_in_reverse_order() {
        let mut fx = Fixture::new();
        let (mut group, id) = add_and_place(&fx);

        group.apply(&mut fx.ctx());
        group.revert(&mut fx.ctx());
        assert!(!fx.scene.contains(id));
        assert!(fx.scene.is_empty());
    }

    #[test]
    fn test_group_redo_reproduces_state() {
        let mut fx = Fixture::new();
        let (mut group, id) = add_and_place(&fx);

        group.apply(&mut fx.ctx());
        group.revert(&mut fx.ctx());
        group.apply(&mut fx.ctx());
        assert_eq!(
            fx.scene.object(id).unwrap().transform.position,
            Vec3::new(4.0, 0.0, 0.0)
        );
    }
}
