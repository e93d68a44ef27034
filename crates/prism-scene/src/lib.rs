//! Prism Scene - Scene graph and camera services
//!
//! This crate owns the mutable editor state the command history and the
//! timeline both act on:
//! - `Scene` — ordered list of `SceneObject`s with id lookup and selection
//! - `CameraRig` — camera position + orbit look target with a derived view matrix
//! - `SceneSnapshot` — JSON save/load round-trip of the scene contents

mod camera;
mod object;
mod scene;
mod snapshot;

pub use camera::CameraRig;
pub use object::{Material, MaterialValue, ObjectKind, SceneObject};
pub use scene::Scene;
pub use snapshot::{load_snapshot_string, save_snapshot_string, SceneSnapshot};
