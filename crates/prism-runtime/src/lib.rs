//! Prism Runtime - Per-frame infrastructure
//!
//! Provides the building blocks that drive the editor once per rendered frame:
//! - `FrameClock` — wall-clock delta with a clamp for backgrounded-tab resumes
//! - `EditorEvent` / `EventBus` — typed notification queue a presentation
//!   layer drains after each mutating call

mod clock;
mod event;
mod event_bus;

pub use clock::{ClockConfig, FrameClock};
pub use event::{EditorEvent, NoticeLevel, PlaybackChange};
pub use event_bus::EventBus;
