//! Keyframe data type

use prism_core::{CameraPose, KeyframeId, Vec3};
use serde::{Deserialize, Serialize};

/// A timestamped camera pose used as an interpolation anchor.
///
/// The containing list is always kept sorted ascending by `time`.
/// Duplicate times are permitted; the resulting zero-duration pair is
/// skipped by the timeline builder rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub id: KeyframeId,
    /// Time in seconds from timeline start (non-negative)
    pub time: f64,
    pub position: Vec3,
    pub target: Vec3,
}

impl Keyframe {
    /// Create a keyframe from a captured camera pose. Negative times are
    /// clamped to zero.
    pub fn new(time: f64, pose: CameraPose) -> Self {
        Self {
            id: KeyframeId::new(),
            time: time.max(0.0),
            position: pose.position,
            target: pose.target,
        }
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.target)
    }

    pub fn set_pose(&mut self, pose: CameraPose) {
        self.position = pose.position;
        self.target = pose.target;
    }
}

/// Sort keyframes ascending by time. Ordering of equal times is
/// unspecified and callers must not rely on it.
pub fn sort_by_time(keyframes: &mut [Keyframe]) {
    keyframes.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(std::cmp::Ordering::Equal));
}
