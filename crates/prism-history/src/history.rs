//! Bounded undo/redo stacks

use crate::command::Command;
use crate::context::EditorContext;

const DEFAULT_CAPACITY: usize = 50;

/// Command history with bounded depth.
///
/// Two ordered stacks: `applied` (bottom oldest) and `undone` (top most
/// recently undone). Every new execution clears `undone` — the history is
/// linear, no branching. When `applied` outgrows its capacity the oldest
/// entry is evicted and that action becomes permanently non-undoable.
pub struct CommandHistory {
    applied: Vec<Box<dyn Command>>,
    undone: Vec<Box<dyn Command>>,
    capacity: usize,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            applied: Vec::new(),
            undone: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Apply a command and push it onto the applied stack. Never fails;
    /// preconditions are the command's responsibility before execution.
    pub fn execute(&mut self, mut command: Box<dyn Command>, ctx: &mut EditorContext<'_>) {
        log::debug!("history: execute {}", command.name());
        command.apply(ctx);
        self.push_applied(command);
    }

    /// Record a command the caller has already applied, with the same
    /// stack bookkeeping as `execute` (redo cleared, oldest evicted).
    pub fn push_applied(&mut self, command: Box<dyn Command>) {
        self.applied.push(command);
        self.undone.clear();
        if self.applied.len() > self.capacity {
            self.applied.remove(0);
        }
    }

    /// Revert the most recent command. No-op on an empty applied stack;
    /// returns whether anything happened.
    pub fn undo(&mut self, ctx: &mut EditorContext<'_>) -> bool {
        let Some(mut command) = self.applied.pop() else {
            return false;
        };
        log::debug!("history: undo {}", command.name());
        command.revert(ctx);
        self.undone.push(command);
        true
    }

    /// Re-apply the most recently undone command. No-op when nothing has
    /// been undone.
    pub fn redo(&mut self, ctx: &mut EditorContext<'_>) -> bool {
        let Some(mut command) = self.undone.pop() else {
            return false;
        };
        log::debug!("history: redo {}", command.name());
        command.apply(ctx);
        self.applied.push(command);
        true
    }

    /// Drop both stacks without reverting anything (scene reset).
    pub fn clear(&mut self) {
        self.applied.clear();
        self.undone.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.applied.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.applied.last().map(|c| c.name())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.undone.last().map(|c| c.name())
    }

    pub fn applied_len(&self) -> usize {
        self.applied.len()
    }

    pub fn undone_len(&self) -> usize {
        self.undone.len()
    }

    /// Applied command labels, oldest first (history panel listing)
    pub fn applied_names(&self) -> Vec<&str> {
        self.applied.iter().map(|c| c.name()).collect()
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
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

    fn add_cube(history: &mut CommandHistory, fx: &mut Fixture) -> prism_core::ObjectId {
        let command = AddObjectCommand::new(SceneObject::new(ObjectKind::Box, "Box"));
        let id = command.object_id();
        history.execute(Box::new(command), &mut fx.ctx());
        id
    }

    #[test]
    fn test_execute_undo_redo_roundtrip() {
        let mut fx = Fixture::new();
        let mut history = CommandHistory::new();

        let id = add_cube(&mut history, &mut fx);
        assert_eq!(fx.scene.len(), 1);
        assert!(history.can_undo());

        assert!(history.undo(&mut fx.ctx()));
        assert_eq!(fx.scene.len(), 0);
        assert!(history.can_redo());

        assert!(history.redo(&mut fx.ctx()));
        assert_eq!(fx.scene.len(), 1);
        assert!(fx.scene.contains(id));
    }

    #[test]
    fn test_undo_redo_empty_are_noops() {
        let mut fx = Fixture::new();
        let mut history = CommandHistory::new();
        assert!(!history.undo(&mut fx.ctx()));
        assert!(!history.redo(&mut fx.ctx()));
    }

    #[test]
    fn test_new_execute_clears_redo() {
        let mut fx = Fixture::new();
        let mut history = CommandHistory::new();

        add_cube(&mut history, &mut fx);
        add_cube(&mut history, &mut fx);
        history.undo(&mut fx.ctx());
        assert!(history.can_redo());

        add_cube(&mut history, &mut fx);
        assert!(!history.can_redo());
        assert!(!history.redo(&mut fx.ctx()));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut fx = Fixture::new();
        let mut history = CommandHistory::with_capacity(3);

        for _ in 0..5 {
            add_cube(&mut history, &mut fx);
        }
        assert_eq!(history.applied_len(), 3);
        assert_eq!(fx.scene.len(), 5);

        // Only the three newest actions can be unwound
        while history.undo(&mut fx.ctx()) {}
        assert_eq!(fx.scene.len(), 2);
    }

    #[test]
    fn test_full_roundtrip_restores_initial_state() {
        let mut fx = Fixture::new();
        let mut history = CommandHistory::new();

        let id = add_cube(&mut history, &mut fx);
        let move1 = SetPositionCommand::new(&fx.scene, id, Vec3::new(1.0, 0.0, 0.0));
        history.execute(Box::new(move1), &mut fx.ctx());
        let move2 = SetPositionCommand::new(&fx.scene, id, Vec3::new(5.0, 2.0, 0.0));
        history.execute(Box::new(move2), &mut fx.ctx());

        while history.undo(&mut fx.ctx()) {}
        assert!(fx.scene.is_empty());
    }

    #[test]
    fn test_partial_undo_then_redo_matches() {
        let mut fx = Fixture::new();
        let mut history = CommandHistory::new();

        let id = add_cube(&mut history, &mut fx);
        for step in 1..=4 {
            let cmd = SetPositionCommand::new(&fx.scene, id, Vec3::new(step as f32, 0.0, 0.0));
            history.execute(Box::new(cmd), &mut fx.ctx());
        }
        let final_pos = fx.scene.object(id).unwrap().transform.position;

        for _ in 0..3 {
            history.undo(&mut fx.ctx());
        }
        for _ in 0..3 {
            history.redo(&mut fx.ctx());
        }
        assert_eq!(fx.scene.object(id).unwrap().transform.position, final_pos);
    }

    #[test]
    fn test_descriptions() {
        let mut fx = Fixture::new();
        let mut history = CommandHistory::new();

        add_cube(&mut history, &mut fx);
        assert_eq!(history.undo_description(), Some("Add Box"));
        history.undo(&mut fx.ctx());
        assert_eq!(history.redo_description(), Some("Add Box"));
        assert_eq!(history.undo_description(), None);
    }

    #[test]
    fn test_clear_keeps_state() {
        let mut fx = Fixture::new();
        let mut history = CommandHistory::new();

        add_cube(&mut history, &mut fx);
        history.clear();
        // Clearing drops the stacks without reverting the scene
        assert_eq!(fx.scene.len(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
