//! Prism Editor - the assembled editing session
//!
//! Ties the scene, camera, timeline, command history and physics into a
//! single [`Editor`] facade. A host drives it with user actions and one
//! [`Editor::tick`] per rendered frame, then drains
//! [`prism_runtime::EditorEvent`]s to refresh its panels.

mod editor;

pub use editor::Editor;
