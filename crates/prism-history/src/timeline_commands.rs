//! Keyframe commands
//!
//! Keyframes are owned by the timeline engine; commands hold them by
//! value (or by id plus captured poses) so every operation reverses
//! exactly, including ids.

use crate::command::Command;
use crate::context::EditorContext;
use prism_core::{CameraPose, KeyframeId};
use prism_timeline::{Keyframe, TimelineEngine};

/// Capture the camera pose as a new keyframe.
///
/// The pose and default time are resolved on the first apply; redo
/// re-inserts the identical keyframe, id included.
pub struct AddKeyframeCommand {
    time: Option<f64>,
    keyframe: Option<Keyframe>,
}

impl AddKeyframeCommand {
    pub fn new(time: Option<f64>) -> Self {
        Self {
            time,
            keyframe: None,
        }
    }

    /// Id of the created keyframe, once applied
    pub fn keyframe_id(&self) -> Option<KeyframeId> {
        self.keyframe.as_ref().map(|k| k.id)
    }
}

impl Command for AddKeyframeCommand {
    fn name(&self) -> &str {
        "Add Keyframe"
    }

    fn apply(&mut self, ctx: &mut EditorContext<'_>) {
        match &self.keyframe {
            Some(keyframe) => ctx.timeline.insert_keyframe(keyframe.clone()),
            None => {
                self.keyframe = Some(ctx.timeline.add_keyframe(ctx.camera, self.time));
            }
        }
    }

    fn revert(&mut self, ctx: &mut EditorContext<'_>) {
        if let Some(keyframe) = &self.keyframe {
            ctx.timeline.remove_keyframe(keyframe.id);
        }
    }
}

/// Remove a keyframe by id; revert re-inserts the removed value.
pub struct RemoveKeyframeCommand {
    id: KeyframeId,
    removed: Option<Keyframe>,
}

impl RemoveKeyframeCommand {
    pub fn new(id: KeyframeId) -> Self {
        Self { id, removed: None }
    }
}

impl Command for RemoveKeyframeCommand {
    fn name(&self) -> &str {
        "Remove Keyframe"
    }

    fn apply(&mut self, ctx: &mut EditorContext<'_>) {
        self.removed = ctx.timeline.take_keyframe(self.id);
    }

    fn revert(&mut self, ctx: &mut EditorContext<'_>) {
        if let Some(keyframe) = self.removed.take() {
            ctx.timeline.insert_keyframe(keyframe);
        }
    }
}

/// Overwrite a keyframe's pose from the current camera. Time and id are
/// untouched; the old pose is captured at construction and the new pose
/// on the first apply, so redo replays the same pose.
pub struct UpdateKeyframeCommand {
    id: KeyframeId,
    old: Option<CameraPose>,
    new: Option<CameraPose>,
}

impl UpdateKeyframeCommand {
    pub fn new(timeline: &TimelineEngine, id: KeyframeId) -> Self {
        Self {
            id,
            old: timeline.keyframe(id).map(Keyframe::pose),
            new: None,
        }
    }
}

impl Command for UpdateKeyframeCommand {
    fn name(&self) -> &str {
        "Update Keyframe"
    }

    fn apply(&mut self, ctx: &mut EditorContext<'_>) {
        let pose = match self.new {
            Some(pose) => pose,
            None => {
                let pose = ctx.camera.pose();
                self.new = Some(pose);
                pose
            }
        };
        let _ = ctx.timeline.set_keyframe_pose(self.id, pose);
    }

    fn revert(&mut self, ctx: &mut EditorContext<'_>) {
        if let Some(old) = self.old {
            let _ = ctx.timeline.set_keyframe_pose(self.id, old);
        }
    }
}
