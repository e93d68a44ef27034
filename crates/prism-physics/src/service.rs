//! Physics service: per-object bodies bridged to the scene
//!
//! The editor talks to physics through the `PhysicsService` trait so the
//! command layer stays independent of the backend. `RapierPhysics` is the
//! real implementation; `NullPhysics` stands in while no backend is
//! available and reports not-ready so callers can gate on it.

use crate::body::{BodyKind, BodySpec, CollisionShape};
use crate::world::PhysicsWorld;
use prism_core::{ObjectId, Vec3};
use prism_scene::{Scene, SceneObject};
use rapier3d::na;
use rapier3d::prelude::*;
use std::collections::HashMap;

/// Backend-independent physics surface used by commands and the editor
pub trait PhysicsService {
    /// Whether the backend is loaded and accepting bodies
    fn is_ready(&self) -> bool;

    /// Attach a body to an object, replacing any existing one. Returns
    /// the replaced spec so the operation can be reversed exactly.
    fn add_body(&mut self, object: &SceneObject, spec: BodySpec) -> Option<BodySpec>;

    /// Detach an object's body, returning its spec. Absent bodies are a
    /// no-op returning `None`.
    fn remove_body(&mut self, id: ObjectId) -> Option<BodySpec>;

    fn body_spec(&self, id: ObjectId) -> Option<BodySpec>;

    fn has_body(&self, id: ObjectId) -> bool;

    /// Advance the simulation and write dynamic body positions back to
    /// the scene. Kinematic bodies read their scene transform first.
    fn step(&mut self, dt: f64, scene: &mut Scene);

    /// Remove all bodies (scene cleared or snapshot restored)
    fn clear(&mut self);
}

struct BodyEntry {
    handle: RigidBodyHandle,
    spec: BodySpec,
}

/// Rapier-backed physics service with a fixed ground plane
pub struct RapierPhysics {
    world: PhysicsWorld,
    bodies: HashMap<ObjectId, BodyEntry>,
}

impl RapierPhysics {
    pub fn new() -> Self {
        let mut world = PhysicsWorld::new();

        // Ground plane at y = 0 so dynamic bodies have a floor
        let ground = RigidBodyBuilder::fixed().build();
        let handle = world.insert_rigid_body(ground);
        let collider = ColliderBuilder::cuboid(100.0, 0.1, 100.0)
            .translation(vector![0.0, -0.1, 0.0])
            .build();
        world.insert_collider_with_parent(collider, handle);

        Self {
            world,
            bodies: HashMap::new(),
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// World-space y of an object's body, for tests and inspection
    pub fn body_height(&self, id: ObjectId) -> Option<f32> {
        let entry = self.bodies.get(&id)?;
        Some(self.world.get_rigid_body(entry.handle)?.translation().y)
    }

    fn build_collider(object: &SceneObject, spec: &BodySpec) -> Collider {
        let shape = match CollisionShape::for_object(object.kind, object.transform.scale) {
            CollisionShape::Ball { radius } => SharedShape::ball(radius),
            CollisionShape::Cylinder {
                half_height,
                radius,
            } => SharedShape::cylinder(half_height, radius),
            CollisionShape::Cuboid { half_extents } => {
                SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
        };
        ColliderBuilder::new(shape)
            .friction(spec.friction)
            .restitution(spec.restitution)
            .build()
    }
}

impl Default for RapierPhysics {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsService for RapierPhysics {
    fn is_ready(&self) -> bool {
        true
    }

    fn add_body(&mut self, object: &SceneObject, spec: BodySpec) -> Option<BodySpec> {
        let replaced = self.remove_body(object.id);

        let builder = match spec.kind {
            BodyKind::Dynamic => RigidBodyBuilder::dynamic().additional_mass(spec.mass),
            BodyKind::Kinematic => RigidBodyBuilder::kinematic_position_based(),
            BodyKind::Static => RigidBodyBuilder::fixed(),
        };

        let position = object.transform.position;
        let rotation = euler_to_quat(
            object.transform.rotation.x,
            object.transform.rotation.y,
            object.transform.rotation.z,
        );
        let body = builder
            .position(Isometry::from_parts(
                na::Translation3::new(position.x, position.y, position.z),
                rotation,
            ))
            .build();

        let handle = self.world.insert_rigid_body(body);
        self.world
            .insert_collider_with_parent(Self::build_collider(object, &spec), handle);

        log::debug!(
            "physics: attach {:?} body to object {:?}",
            spec.kind,
            object.id
        );
        self.bodies.insert(object.id, BodyEntry { handle, spec });
        replaced
    }

    fn remove_body(&mut self, id: ObjectId) -> Option<BodySpec> {
        let entry = self.bodies.remove(&id)?;
        self.world.remove_rigid_body(entry.handle);
        log::debug!("physics: detach body from object {id:?}");
        Some(entry.spec)
    }

    fn body_spec(&self, id: ObjectId) -> Option<BodySpec> {
        self.bodies.get(&id).map(|entry| entry.spec)
    }

    fn has_body(&self, id: ObjectId) -> bool {
        self.bodies.contains_key(&id)
    }

    fn step(&mut self, dt: f64, scene: &mut Scene) {
        // Kinematic bodies follow the scene before the solver runs
        for (id, entry) in &self.bodies {
            if entry.spec.kind != BodyKind::Kinematic {
                continue;
            }
            let Some(object) = scene.object(*id) else {
                continue;
            };
            let position = object.transform.position;
            let rotation = euler_to_quat(
                object.transform.rotation.x,
                object.transform.rotation.y,
                object.transform.rotation.z,
            );
            if let Some(body) = self.world.get_rigid_body_mut(entry.handle) {
                body.set_next_kinematic_position(Isometry::from_parts(
                    na::Translation3::new(position.x, position.y, position.z),
                    rotation,
                ));
            }
        }

        self.world.step(dt as f32);

        // Only dynamic bodies write back; static and kinematic transforms
        // belong to the editor
        for (id, entry) in &self.bodies {
            if entry.spec.kind != BodyKind::Dynamic {
                continue;
            }
            if let Some(body) = self.world.get_rigid_body(entry.handle) {
                let pos = body.translation();
                scene.set_position(*id, Vec3::new(pos.x, pos.y, pos.z));
            }
        }
    }

    fn clear(&mut self) {
        let ids: Vec<ObjectId> = self.bodies.keys().copied().collect();
        for id in ids {
            self.remove_body(id);
        }
    }
}

/// Stand-in backend used before a real one is installed. Every mutation
/// is a no-op; `is_ready` reports false so callers surface a notice
/// instead of silently dropping work.
#[derive(Debug, Default)]
pub struct NullPhysics;

impl PhysicsService for NullPhysics {
    fn is_ready(&self) -> bool {
        false
    }

    fn add_body(&mut self, _object: &SceneObject, _spec: BodySpec) -> Option<BodySpec> {
        None
    }

    fn remove_body(&mut self, _id: ObjectId) -> Option<BodySpec> {
        None
    }

    fn body_spec(&self, _id: ObjectId) -> Option<BodySpec> {
        None
    }

    fn has_body(&self, _id: ObjectId) -> bool {
        false
    }

    fn step(&mut self, _dt: f64, _scene: &mut Scene) {}

    fn clear(&mut self) {}
}

/// Convert Euler angles (degrees, applied x then y then z) to a unit quaternion
fn euler_to_quat(rx_deg: f32, ry_deg: f32, rz_deg: f32) -> na::UnitQuaternion<f32> {
    let qx = na::UnitQuaternion::from_axis_angle(&na::Vector3::x_axis(), rx_deg.to_radians());
    let qy = na::UnitQuaternion::from_axis_angle(&na::Vector3::y_axis(), ry_deg.to_radians());
    let qz = na::UnitQuaternion::from_axis_angle(&na::Vector3::z_axis(), rz_deg.to_radians());
    qx * qy * qz
}
