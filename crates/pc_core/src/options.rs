//! Import configuration.
//!
//! Options are plain serde data so a host can keep them next to its own
//! settings. Every field has a default, and a partial JSON object only
//! overrides the keys it names.

use std::path::Path;

use pc_math::{euler_degrees_xyz, Mat4, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while reading an options file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Corrective rotation applied to every placed entity's world matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisConversion {
    /// Keep the source coordinates untouched.
    None,

    /// -90 degrees about X: source +Z lands on +Y and +Y on -Z.
    #[default]
    MinusNinetyX,

    /// Arbitrary intrinsic XYZ Euler rotation in degrees.
    Custom { rotation_deg: [f32; 3] },
}

impl AxisConversion {
    /// The conversion as a matrix, applied as `conversion * world`.
    pub fn matrix(&self) -> Mat4 {
        match self {
            AxisConversion::None => Mat4::IDENTITY,
            AxisConversion::MinusNinetyX => Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2),
            AxisConversion::Custom { rotation_deg } => {
                euler_degrees_xyz(Vec3::from_array(*rotation_deg))
            }
        }
    }
}

/// How the V texture coordinate is written out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UvFlip {
    /// `v' = 1 - v`
    #[default]
    Flip,

    /// Keep V as stored.
    Keep,
}

impl UvFlip {
    pub fn apply(&self, v: f32) -> f32 {
        match self {
            UvFlip::Flip => 1.0 - v,
            UvFlip::Keep => v,
        }
    }
}

/// Options for one import run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Rotation applied once to every placed node and mesh instance
    pub axis_conversion: AxisConversion,

    /// V coordinate policy for both UV channels
    pub uv_v_flip: UvFlip,

    /// Display size recorded on node markers
    pub marker_size: f32,

    /// Join diffuse map paths onto the source file's directory
    pub resolve_textures_relative: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            axis_conversion: AxisConversion::MinusNinetyX,
            uv_v_flip: UvFlip::Flip,
            marker_size: 0.1,
            resolve_textures_relative: true,
        }
    }
}

impl ImportOptions {
    /// Parse options from a JSON string. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read options from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn with_axis_conversion(mut self, axis_conversion: AxisConversion) -> Self {
        self.axis_conversion = axis_conversion;
        self
    }

    pub fn with_uv_flip(mut self, uv_v_flip: UvFlip) -> Self {
        self.uv_v_flip = uv_v_flip;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_conversion_is_minus_ninety_about_x() {
        let m = AxisConversion::default().matrix();

        assert!((m.transform_point3(Vec3::Z) - Vec3::Y).length() < 0.001);
        assert!((m.transform_point3(Vec3::Y) + Vec3::Z).length() < 0.001);
        assert!((m.transform_point3(Vec3::X) - Vec3::X).length() < 0.001);
    }

    #[test]
    fn test_custom_conversion() {
        let m = AxisConversion::Custom {
            rotation_deg: [0.0, 0.0, 90.0],
        }
        .matrix();
        let p = m.transform_point3(Vec3::X);

        assert!((p - Vec3::Y).length() < 0.001);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = ImportOptions::from_json_str(r#"{ "uv_v_flip": "keep" }"#).unwrap();

        assert_eq!(options.uv_v_flip, UvFlip::Keep);
        assert_eq!(options.axis_conversion, AxisConversion::MinusNinetyX);
        assert!((options.marker_size - 0.1).abs() < 1e-6);
        assert!(options.resolve_textures_relative);
    }

    #[test]
    fn test_axis_conversion_json_forms() {
        let none = ImportOptions::from_json_str(r#"{ "axis_conversion": "none" }"#).unwrap();
        assert_eq!(none.axis_conversion, AxisConversion::None);

        let custom = ImportOptions::from_json_str(
            r#"{ "axis_conversion": { "custom": { "rotation_deg": [90, 0, 0] } } }"#,
        )
        .unwrap();
        assert_eq!(
            custom.axis_conversion,
            AxisConversion::Custom {
                rotation_deg: [90.0, 0.0, 0.0]
            }
        );
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = ImportOptions::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_uv_flip() {
        assert_eq!(UvFlip::Flip.apply(0.25), 0.75);
        assert_eq!(UvFlip::Keep.apply(0.25), 0.25);
    }
}
