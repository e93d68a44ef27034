//! Editor events broadcast to the presentation layer

use prism_core::{KeyframeId, ObjectId};

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Playback state transitions worth surfacing in a transport UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackChange {
    Started,
    Paused,
    Stopped,
}

/// An event emitted by the editor core after a mutating call.
///
/// The presentation layer drains these instead of being called back
/// directly; the core carries no knowledge of any UI toolkit.
#[derive(Debug, Clone)]
pub enum EditorEvent {
    /// Scene contents changed (object added/removed/edited)
    SceneChanged,
    /// A specific object changed or was (de)selected
    SelectionChanged(Option<ObjectId>),
    /// The undo/redo stacks changed
    HistoryChanged,
    /// Keyframes or timeline settings changed; panels should refresh
    TimelineChanged,
    /// A keyframe was added (handy for scroll-to-row behavior)
    KeyframeAdded(KeyframeId),
    /// Playback started/paused/stopped
    Playback(PlaybackChange),
    /// A user-visible status message
    Notice {
        level: NoticeLevel,
        message: String,
    },
}

impl EditorEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self::Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
