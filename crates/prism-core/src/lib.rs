//! Prism Core - Foundational types for the Prism scene editor
//!
//! This crate provides the core types that all other Prism crates depend on:
//! - `ObjectId` / `KeyframeId` - Stable identifiers
//! - `Vec3`, `Transform`, `Color`, `CameraPose` - Spatial types
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{PrismError, Result};
pub use id::{KeyframeId, ObjectId};
pub use types::{CameraPose, Color, Transform, Vec3};
