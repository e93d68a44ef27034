//! Camera rig: position + orbit look target with a derived view matrix

use prism_core::{CameraPose, Vec3};

/// The editor camera and its orbit-controls target.
///
/// Writes mark the rig dirty; `update()` re-derives the cached view
/// matrix, mirroring how orbit controls re-derive after a target change.
#[derive(Debug, Clone)]
pub struct CameraRig {
    position: Vec3,
    target: Vec3,
    view_matrix: [[f32; 4]; 4],
    dirty: bool,
}

impl Default for CameraRig {
    fn default() -> Self {
        let pose = CameraPose::default();
        let mut rig = Self {
            position: pose.position,
            target: pose.target,
            view_matrix: [[0.0; 4]; 4],
            dirty: true,
        };
        rig.update();
        rig
    }
}

impl CameraRig {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        let mut rig = Self {
            position,
            target,
            view_matrix: [[0.0; 4]; 4],
            dirty: true,
        };
        rig.update();
        rig
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.dirty = true;
    }

    /// Capture the current pose (used when adding/updating keyframes).
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.target)
    }

    /// Restore a stored pose and re-derive the view matrix immediately.
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.position = pose.position;
        self.target = pose.target;
        self.dirty = true;
        self.update();
    }

    /// Re-derive the view matrix if position or target changed.
    pub fn update(&mut self) {
        if !self.dirty {
            return;
        }
        self.view_matrix = look_at(self.position, self.target, Vec3::UP);
        self.dirty = false;
    }

    /// The cached view matrix (column-major). Valid after `update()`.
    pub fn view_matrix(&self) -> &[[f32; 4]; 4] {
        &self.view_matrix
    }
}

/// Build a right-handed look-at view matrix (column-major).
fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> [[f32; 4]; 4] {
    let forward = (target - eye).normalized();
    let right = forward.cross(&up).normalized();
    let true_up = right.cross(&forward);

    [
        [right.x, true_up.x, -forward.x, 0.0],
        [right.y, true_up.y, -forward.y, 0.0],
        [right.z, true_up.z, -forward.z, 0.0],
        [
            -right.dot(&eye),
            -true_up.dot(&eye),
            forward.dot(&eye),
            1.0,
        ],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_roundtrip() {
        let mut rig = CameraRig::default();
        let pose = CameraPose::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 1.0, 0.0));
        rig.set_pose(pose);
        assert_eq!(rig.pose(), pose);
    }

    #[test]
    fn test_update_rederives_matrix() {
        let mut rig = CameraRig::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let before = *rig.view_matrix();

        rig.set_target(Vec3::new(3.0, 0.0, 0.0));
        rig.update();
        assert_ne!(before, *rig.view_matrix());
    }

    #[test]
    fn test_view_matrix_translation() {
        let rig = CameraRig::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let m = rig.view_matrix();
        // Looking down -Z from (0,0,5): eye maps to the origin depth -5
        assert!((m[3][2] - (-5.0)).abs() < 1e-5);
    }
}
