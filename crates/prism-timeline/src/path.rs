//! Camera path preview sampling

use crate::easing::Easing;
use crate::keyframe::Keyframe;
use prism_core::Vec3;

/// Sub-steps sampled per segment for the preview curve
const STEPS_PER_SEGMENT: usize = 10;

/// Sample camera positions along the whole timeline for visualization.
///
/// Each non-degenerate segment contributes its start position plus nine
/// eased intermediate samples; the final keyframe position closes the
/// path. Returns an empty path below 2 keyframes. Read-only derived
/// data, suitable for feeding a smooth-curve renderer.
pub fn preview_points(keyframes: &[Keyframe], easing: Easing) -> Vec<Vec3> {
    if keyframes.len() < 2 {
        return Vec::new();
    }

    let mut points = Vec::new();
    for pair in keyframes.windows(2) {
        let (start, end) = (&pair[0], &pair[1]);
        if end.time <= start.time {
            continue;
        }

        points.push(start.position);
        for step in 1..STEPS_PER_SEGMENT {
            let t = step as f32 / STEPS_PER_SEGMENT as f32;
            points.push(start.position.lerp(&end.position, easing.apply(t)));
        }
    }
    points.push(keyframes[keyframes.len() - 1].position);
    points
}
