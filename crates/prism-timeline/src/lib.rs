//! Keyframe camera animation for the Prism editor.
//!
//! A [`TimelineEngine`] owns a time-sorted keyframe list and a derived
//! interpolation [`Timeline`], drives the camera either from the frame
//! clock or from a scroll-linked progress source, and can serialize the
//! whole animation to a standalone script via [`TimelineEngine::export_code`].

pub mod easing;
pub mod engine;
pub mod export;
pub mod keyframe;
pub mod path;
pub mod playback;
pub mod timeline;

pub use easing::Easing;
pub use engine::TimelineEngine;
pub use export::ExportSettings;
pub use keyframe::Keyframe;
pub use path::preview_points;
pub use playback::{DriveMode, PlayState, ScrollSettings};
pub use timeline::{Segment, Timeline};
