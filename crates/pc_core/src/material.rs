//! Material realization.
//!
//! The importer only decides *what* a material's base color comes from: a
//! texture path, a flat color, or nothing. Turning that into something a
//! renderer can use is the job of a [`MaterialBackend`]. The bundled
//! [`StandardMaterials`] backend produces a plain [`Material`] description.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pc_math::{Vec3, Vec4};

use crate::playcanvas::MaterialDef;

/// Where a material's base color comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum MaterialSource {
    /// Diffuse texture at this path (not checked for existence)
    Texture(PathBuf),

    /// Flat linear RGB, 0..1
    Color(Vec3),

    /// Neither a map nor a usable color
    Default,
}

impl MaterialSource {
    /// Pick the authoritative color source for a definition.
    ///
    /// The diffuse map wins. Relative map paths are joined onto `base_dir`
    /// when one is given.
    pub fn from_def(def: &MaterialDef, base_dir: Option<&Path>) -> Self {
        if let Some(map) = &def.diffuse_map {
            let path = match base_dir {
                Some(dir) => dir.join(map),
                None => PathBuf::from(map),
            };
            return MaterialSource::Texture(path);
        }
        match def.diffuse_color {
            Some([r, g, b]) => MaterialSource::Color(Vec3::new(r as f32, g as f32, b as f32) / 255.0),
            None => MaterialSource::Default,
        }
    }
}

/// Turns material definitions into host material handles.
///
/// The assembler calls `realize` once per material definition per scene and
/// clones the returned handle for every binding.
pub trait MaterialBackend {
    type Handle: Clone;

    fn realize(&mut self, name: &str, source: &MaterialSource) -> Self::Handle;
}

/// A resolved base-color material.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Material name from the source document
    pub name: String,

    /// Base color (RGBA, 0-1). Grey when the source had no color.
    pub base_color: Vec4,

    /// Path to diffuse/albedo texture
    pub diffuse_texture: Option<PathBuf>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_color: Vec4::new(0.5, 0.5, 0.5, 1.0), // Grey default
            diffuse_texture: None,
        }
    }
}

impl Material {
    /// Check if this material samples a texture.
    pub fn has_texture(&self) -> bool {
        self.diffuse_texture.is_some()
    }
}

/// Default backend producing shared [`Material`] values.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardMaterials;

impl MaterialBackend for StandardMaterials {
    type Handle = Arc<Material>;

    fn realize(&mut self, name: &str, source: &MaterialSource) -> Self::Handle {
        let mut material = Material {
            name: name.to_owned(),
            ..Default::default()
        };
        match source {
            MaterialSource::Texture(path) => material.diffuse_texture = Some(path.clone()),
            MaterialSource::Color(rgb) => material.base_color = rgb.extend(1.0),
            MaterialSource::Default => {}
        }
        Arc::new(material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(map: Option<&str>, color: Option<[u8; 3]>) -> MaterialDef {
        MaterialDef {
            index: 0,
            name: "mat".into(),
            diffuse_map: map.map(str::to_owned),
            diffuse_color: color,
        }
    }

    #[test]
    fn test_map_wins_over_color() {
        let source = MaterialSource::from_def(&def(Some("wood.png"), Some([255, 0, 0])), None);
        assert_eq!(source, MaterialSource::Texture(PathBuf::from("wood.png")));
    }

    #[test]
    fn test_map_joined_onto_base_dir() {
        let source = MaterialSource::from_def(&def(Some("tex/wood.png"), None), Some(Path::new("/assets")));
        assert_eq!(
            source,
            MaterialSource::Texture(PathBuf::from("/assets").join("tex/wood.png"))
        );
    }

    #[test]
    fn test_color_scaled_to_unit_range() {
        let source = MaterialSource::from_def(&def(None, Some([255, 0, 51])), None);
        let MaterialSource::Color(rgb) = source else {
            panic!("Expected a color source");
        };
        assert!((rgb - Vec3::new(1.0, 0.0, 0.2)).length() < 0.001);
    }

    #[test]
    fn test_standard_backend() {
        let mut backend = StandardMaterials;

        let textured = backend.realize("a", &MaterialSource::Texture("x.png".into()));
        assert!(textured.has_texture());

        let colored = backend.realize("b", &MaterialSource::Color(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(colored.base_color, Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert!(!colored.has_texture());

        let plain = backend.realize("c", &MaterialSource::Default);
        assert_eq!(plain.base_color, Material::default().base_color);
        assert_eq!(plain.name, "c");
    }
}
