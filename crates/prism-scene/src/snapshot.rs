//! JSON snapshot save/load for the scene

use crate::object::SceneObject;
use crate::scene::Scene;
use prism_core::{ObjectId, Result};
use serde::{Deserialize, Serialize};

/// Serializable image of the scene contents.
///
/// This is the save/load round-trip format; derived editor state
/// (history stacks, built timelines) is intentionally not part of it.
#[derive(Debug, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub objects: Vec<SceneObject>,
    #[serde(default)]
    pub selected: Option<ObjectId>,
}

impl SceneSnapshot {
    /// Capture the current scene.
    pub fn capture(scene: &Scene) -> Self {
        Self {
            objects: scene.objects().cloned().collect(),
            selected: scene.selected(),
        }
    }

    /// Replace the scene contents with this snapshot's.
    ///
    /// Advances the id counter past every loaded id so freshly created
    /// objects can never collide with restored ones.
    pub fn restore(self, scene: &mut Scene) {
        scene.clear();
        for object in self.objects {
            ObjectId::ensure_counter_above(object.id.raw());
            scene.add_object(object);
        }
        scene.select(self.selected);
    }
}

/// Serialize a scene to a JSON string.
pub fn save_snapshot_string(scene: &Scene) -> Result<String> {
    let snapshot = SceneSnapshot::capture(scene);
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Load a scene from a JSON string, replacing its current contents.
pub fn load_snapshot_string(scene: &mut Scene, json: &str) -> Result<()> {
    let snapshot: SceneSnapshot = serde_json::from_str(json)?;
    log::info!("loading scene snapshot ({} objects)", snapshot.objects.len());
    snapshot.restore(scene);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ObjectKind, SceneObject};
    use prism_core::{Transform, Vec3};

    #[test]
    fn test_snapshot_roundtrip() {
        let mut scene = Scene::new();
        let id = scene.add_object(
            SceneObject::new(ObjectKind::Sphere, "ball")
                .with_transform(Transform::from_position(Vec3::new(1.0, 2.0, 3.0))),
        );
        scene.add_object(SceneObject::new(ObjectKind::PointLight, "key light"));
        scene.select(Some(id));

        let json = save_snapshot_string(&scene).unwrap();

        let mut restored = Scene::new();
        load_snapshot_string(&mut restored, &json).unwrap();

        assert_eq!(restored.len(), 2);
        assert_eq!(restored.selected(), Some(id));
        let ball = restored.object(id).unwrap();
        assert_eq!(ball.name, "ball");
        assert_eq!(ball.transform.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_load_bad_json_is_error() {
        let mut scene = Scene::new();
        assert!(load_snapshot_string(&mut scene, "not json").is_err());
    }

    #[test]
    fn test_restore_advances_id_counter() {
        let mut scene = Scene::new();
        let mut object = SceneObject::new(ObjectKind::Box, "far");
        object.id = ObjectId::from_raw(ObjectId::new().raw() + 1000);
        let far = object.id;
        SceneSnapshot {
            objects: vec![object],
            selected: None,
        }
        .restore(&mut scene);

        let fresh = scene.add_object(SceneObject::new(ObjectKind::Box, "fresh"));
        assert!(fresh.raw() > far.raw());
    }
}
