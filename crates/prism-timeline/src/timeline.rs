//! Derived timeline: eased interpolation segments between keyframe pairs

use crate::easing::Easing;
use crate::keyframe::Keyframe;
use prism_core::CameraPose;

/// One interpolated span between two consecutive keyframes
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start_time: f64,
    pub end_time: f64,
    pub from: CameraPose,
    pub to: CameraPose,
}

impl Segment {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Evaluate the segment at local progress `t ∈ [0, 1]` through an easing.
    pub fn sample(&self, easing: Easing, t: f32) -> CameraPose {
        self.from.lerp(&self.to, easing.apply(t))
    }
}

/// Rebuildable interpolation timeline.
///
/// Purely derived from the keyframe list plus the current easing; never
/// persisted, always regenerable.
#[derive(Debug, Clone)]
pub struct Timeline {
    segments: Vec<Segment>,
    easing: Easing,
    first: CameraPose,
    last: CameraPose,
    start_time: f64,
    end_time: f64,
}

impl Timeline {
    /// Build a timeline from sorted keyframes.
    ///
    /// Returns `None` below 2 keyframes (timeline torn down). Pairs with
    /// `end.time <= start.time` are degenerate and produce no segment;
    /// playback holds across them.
    pub fn build(keyframes: &[Keyframe], easing: Easing) -> Option<Timeline> {
        if keyframes.len() < 2 {
            return None;
        }

        let mut segments = Vec::with_capacity(keyframes.len() - 1);
        for pair in keyframes.windows(2) {
            let (start, end) = (&pair[0], &pair[1]);
            if end.time <= start.time {
                continue;
            }
            segments.push(Segment {
                start_time: start.time,
                end_time: end.time,
                from: start.pose(),
                to: end.pose(),
            });
        }

        let first = keyframes[0].pose();
        let last = keyframes[keyframes.len() - 1].pose();
        Some(Timeline {
            segments,
            easing,
            first,
            last,
            start_time: keyframes[0].time,
            end_time: keyframes[keyframes.len() - 1].time,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Time of the first keyframe
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Time of the last keyframe
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Evaluate the camera pose at an absolute timeline time.
    ///
    /// Clamps to the first pose before the first segment and the last
    /// pose after the final one. Inside a degenerate gap (duplicate
    /// keyframe times) the preceding segment's end pose holds.
    pub fn evaluate(&self, time: f64) -> CameraPose {
        if time <= self.start_time {
            return self.first;
        }
        if time >= self.end_time {
            return self.last;
        }

        // Last segment starting at or before `time`; between segments
        // (a hole left by a skipped pair) holds the previous end pose.
        let mut result = self.first;
        for segment in &self.segments {
            if time < segment.start_time {
                break;
            }
            if time < segment.end_time {
                let t = ((time - segment.start_time) / segment.duration()) as f32;
                return segment.sample(self.easing, t);
            }
            result = segment.to;
        }
        result
    }
}
