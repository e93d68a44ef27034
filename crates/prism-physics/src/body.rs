//! Physics body descriptions
//!
//! A `BodySpec` is the value-level description of an object's physics
//! participation. Commands keep specs by value so attaching and
//! detaching bodies is fully reversible.

use prism_core::Vec3;
use prism_scene::ObjectKind;
use serde::{Deserialize, Serialize};

/// How the body participates in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    /// Immovable; collides but never moves
    #[default]
    Static,
    /// Simulated; gravity and collisions move it
    Dynamic,
    /// Moved by the editor; pushes dynamic bodies
    Kinematic,
}

/// Collision shape, in world-space dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionShape {
    Cuboid { half_extents: Vec3 },
    Ball { radius: f32 },
    Cylinder { half_height: f32, radius: f32 },
}

impl CollisionShape {
    /// Derive a collision shape from an object's geometry and scale.
    ///
    /// Geometry base dimensions are unit-sized, so the scale carries the
    /// world dimensions. Shapes without an exact collider analogue get
    /// the closest primitive: a torus becomes its bounding ball, lights
    /// and planes become thin cuboids.
    pub fn for_object(kind: ObjectKind, scale: Vec3) -> CollisionShape {
        match kind {
            ObjectKind::Sphere => CollisionShape::Ball {
                radius: 0.5 * scale.x.max(scale.y).max(scale.z),
            },
            ObjectKind::Cylinder | ObjectKind::Cone => CollisionShape::Cylinder {
                half_height: 0.5 * scale.y,
                radius: 0.5 * scale.x.max(scale.z),
            },
            ObjectKind::Torus => CollisionShape::Ball {
                radius: 0.5 * scale.x.max(scale.y).max(scale.z),
            },
            ObjectKind::Plane => CollisionShape::Cuboid {
                half_extents: Vec3::new(scale.x * 0.5, 0.01, scale.z * 0.5),
            },
            // Box geometry and light gizmos
            _ => CollisionShape::Cuboid {
                half_extents: Vec3::new(scale.x * 0.5, scale.y * 0.5, scale.z * 0.5),
            },
        }
    }
}

/// Full physics description attached to a scene object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub kind: BodyKind,
    /// Ignored for static and kinematic bodies
    pub mass: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for BodySpec {
    fn default() -> Self {
        Self {
            kind: BodyKind::Static,
            mass: 1.0,
            friction: 0.5,
            restitution: 0.3,
        }
    }
}

impl BodySpec {
    pub fn dynamic(mass: f32) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            mass,
            ..Self::default()
        }
    }

    pub fn kinematic() -> Self {
        Self {
            kind: BodyKind::Kinematic,
            ..Self::default()
        }
    }
}
