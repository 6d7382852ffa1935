//! Phong materials shared between drawable objects

use crate::foundation::collections::{MaterialKey, SlotMap};
use crate::foundation::math::Vec3;
use crate::render::shader::{names, ShaderBinding};

/// Phong reflection coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Ambient reflectance
    pub ambient: Vec3,
    /// Diffuse reflectance
    pub diffuse: Vec3,
    /// Specular reflectance
    pub specular: Vec3,
    /// Specular exponent
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec3::repeat(1.0),
            diffuse: Vec3::repeat(1.0),
            specular: Vec3::repeat(1.0),
            shininess: 32.0,
        }
    }
}

impl Material {
    /// Material with a single diffuse tint and default specular response
    pub fn diffuse(color: Vec3) -> Self {
        Self {
            ambient: color,
            diffuse: color,
            ..Self::default()
        }
    }

    /// Builder-style shininess override
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    /// Builder-style specular override
    pub fn with_specular(mut self, specular: Vec3) -> Self {
        self.specular = specular;
        self
    }

    /// Write the `u_Material` struct
    pub fn upload(&self, shader: &mut dyn ShaderBinding) {
        shader.set_vec3(&format!("{}.ambient", names::MATERIAL), &self.ambient);
        shader.set_vec3(&format!("{}.diffuse", names::MATERIAL), &self.diffuse);
        shader.set_vec3(&format!("{}.specular", names::MATERIAL), &self.specular);
        shader.set_float(&format!("{}.shininess", names::MATERIAL), self.shininess);
    }
}

/// Materials owned by a scene, addressed by key
///
/// Always contains a default material so objects whose material was removed still draw.
#[derive(Debug, Clone)]
pub struct MaterialLibrary {
    materials: SlotMap<MaterialKey, Material>,
    default_key: MaterialKey,
    fallback: Material,
}

impl MaterialLibrary {
    /// Create a library holding only the default material
    pub fn new() -> Self {
        let mut materials = SlotMap::with_key();
        let default_key = materials.insert(Material::default());
        Self {
            materials,
            default_key,
            fallback: Material::default(),
        }
    }

    /// Add a material
    pub fn add(&mut self, material: Material) -> MaterialKey {
        self.materials.insert(material)
    }

    /// Remove a material; the default material cannot be removed
    pub fn remove(&mut self, key: MaterialKey) -> Option<Material> {
        if key == self.default_key {
            return None;
        }
        self.materials.remove(key)
    }

    /// Key of the default material
    pub fn default_key(&self) -> MaterialKey {
        self.default_key
    }

    /// Look up a material
    pub fn get(&self, key: MaterialKey) -> Option<&Material> {
        self.materials.get(key)
    }

    /// Look up a material mutably
    pub fn get_mut(&mut self, key: MaterialKey) -> Option<&mut Material> {
        self.materials.get_mut(key)
    }

    /// Look up a material, falling back to the default for stale keys
    pub fn resolve(&self, key: MaterialKey) -> &Material {
        self.materials
            .get(key)
            .or_else(|| self.materials.get(self.default_key))
            .unwrap_or(&self.fallback)
    }

    /// Drop every material except the default
    pub fn clear(&mut self) {
        let default_key = self.default_key;
        self.materials.retain(|key, _| key == default_key);
    }

    /// Number of materials including the default
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Always false; the default material is permanent
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::new()
    }
}
