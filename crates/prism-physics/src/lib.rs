//! Prism Physics - Rapier 3D integration
//!
//! Physics simulation for the Prism editor:
//! - `PhysicsWorld` — wraps Rapier pipeline, body/collider sets
//! - `BodySpec`/`CollisionShape` — value-level body descriptions
//! - `PhysicsService` — backend-independent surface the editor talks to
//! - `RapierPhysics` — the real backend, with a fixed ground plane
//! - `NullPhysics` — not-ready stand-in so callers can gate on readiness

pub mod body;
pub mod service;
pub mod world;

pub use body::{BodyKind, BodySpec, CollisionShape};
pub use service::{NullPhysics, PhysicsService, RapierPhysics};
pub use world::PhysicsWorld;
