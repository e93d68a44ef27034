//! Scene object data types

use prism_core::{Color, ObjectId, Transform};
use serde::{Deserialize, Serialize};

/// What kind of thing a scene object is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Box,
    Sphere,
    Cylinder,
    Cone,
    Torus,
    Plane,
    PointLight,
    SpotLight,
    DirectionalLight,
}

impl ObjectKind {
    pub fn is_light(&self) -> bool {
        matches!(
            self,
            ObjectKind::PointLight | ObjectKind::SpotLight | ObjectKind::DirectionalLight
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            ObjectKind::Box => "Box",
            ObjectKind::Sphere => "Sphere",
            ObjectKind::Cylinder => "Cylinder",
            ObjectKind::Cone => "Cone",
            ObjectKind::Torus => "Torus",
            ObjectKind::Plane => "Plane",
            ObjectKind::PointLight => "Point Light",
            ObjectKind::SpotLight => "Spot Light",
            ObjectKind::DirectionalLight => "Directional Light",
        }
    }
}

/// PBR-ish material properties for mesh objects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
    pub metalness: f32,
    pub roughness: f32,
    pub opacity: f32,
    pub wireframe: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            metalness: 0.0,
            roughness: 0.5,
            opacity: 1.0,
            wireframe: false,
        }
    }
}

/// A single material field paired with its value, for field-level edits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MaterialValue {
    Color(Color),
    Metalness(f32),
    Roughness(f32),
    Opacity(f32),
    Wireframe(bool),
}

impl MaterialValue {
    /// Read the current value of the same field from a material
    pub fn read_from(&self, material: &Material) -> MaterialValue {
        match self {
            MaterialValue::Color(_) => MaterialValue::Color(material.color),
            MaterialValue::Metalness(_) => MaterialValue::Metalness(material.metalness),
            MaterialValue::Roughness(_) => MaterialValue::Roughness(material.roughness),
            MaterialValue::Opacity(_) => MaterialValue::Opacity(material.opacity),
            MaterialValue::Wireframe(_) => MaterialValue::Wireframe(material.wireframe),
        }
    }

    /// Write this value into the matching field of a material
    pub fn write_to(&self, material: &mut Material) {
        match *self {
            MaterialValue::Color(c) => material.color = c,
            MaterialValue::Metalness(v) => material.metalness = v,
            MaterialValue::Roughness(v) => material.roughness = v,
            MaterialValue::Opacity(v) => material.opacity = v,
            MaterialValue::Wireframe(v) => material.wireframe = v,
        }
    }
}

/// An object in the scene: a mesh primitive or a light
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub kind: ObjectKind,
    pub transform: Transform,
    pub material: Material,
    pub visible: bool,
}

impl SceneObject {
    pub fn new(kind: ObjectKind, name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
            kind,
            transform: Transform::default(),
            material: Material::default(),
            visible: true,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_value_roundtrip() {
        let mut material = Material::default();
        let new = MaterialValue::Roughness(0.9);
        let old = new.read_from(&material);

        new.write_to(&mut material);
        assert_eq!(material.roughness, 0.9);

        old.write_to(&mut material);
        assert_eq!(material.roughness, 0.5);
    }

    #[test]
    fn test_kind_is_light() {
        assert!(ObjectKind::PointLight.is_light());
        assert!(!ObjectKind::Torus.is_light());
    }
}
