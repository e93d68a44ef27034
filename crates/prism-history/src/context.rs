//! Mutation context threaded into commands
//!
//! Commands never hold references to live state; they receive this
//! context at apply/revert time. The editor constructs it fresh from its
//! own disjoint fields for every history call.

use prism_physics::PhysicsService;
use prism_scene::{CameraRig, Scene};
use prism_timeline::TimelineEngine;

/// Borrowed handles to everything a command may mutate
pub struct EditorContext<'a> {
    pub scene: &'a mut Scene,
    pub camera: &'a mut CameraRig,
    pub timeline: &'a mut TimelineEngine,
    pub physics: &'a mut dyn PhysicsService,
}
