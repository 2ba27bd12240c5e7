// Transform utilities for Mat4
//
// Local transform composition for scene-graph nodes, plus extension
// methods used when placing geometry in world space.

use crate::Aabb;
use glam::{Mat4, Vec3, Vec4};

/// Rotation matrix from intrinsic X-then-Y-then-Z Euler angles in degrees.
pub fn euler_degrees_xyz(degrees: Vec3) -> Mat4 {
    Mat4::from_rotation_x(degrees.x.to_radians())
        * Mat4::from_rotation_y(degrees.y.to_radians())
        * Mat4::from_rotation_z(degrees.z.to_radians())
}

/// Compose `Translation * Rotation * Scale`.
///
/// Missing components fall back to identity: zero translation,
/// zero rotation and unit scale.
pub fn trs_matrix(
    translation: Option<Vec3>,
    rotation_deg: Option<Vec3>,
    scale: Option<Vec3>,
) -> Mat4 {
    let t = Mat4::from_translation(translation.unwrap_or(Vec3::ZERO));
    let r = euler_degrees_xyz(rotation_deg.unwrap_or(Vec3::ZERO));
    let s = Mat4::from_scale(scale.unwrap_or(Vec3::ONE));
    t * r * s
}

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform a surface normal by the inverse transpose of the upper 3x3,
    /// renormalized. Translation has no effect.
    fn transform_normal3(&self, normal: Vec3) -> Vec3;

    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl Mat4Ext for Mat4 {
    fn transform_normal3(&self, normal: Vec3) -> Vec3 {
        let normal_matrix = self.inverse().transpose();
        let transformed = normal_matrix * Vec4::new(normal.x, normal.y, normal.z, 0.0);
        Vec3::new(transformed.x, transformed.y, transformed.z).normalize_or_zero()
    }

    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        if aabb.is_empty() {
            return Aabb::empty();
        }

        aabb.corners()
            .iter()
            .fold(Aabb::empty(), |acc, &corner| {
                acc.include_point(self.transform_point3(corner))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trs_defaults_to_identity() {
        let m = trs_matrix(None, None, None);
        assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_trs_order_scale_then_rotate_then_translate() {
        let m = trs_matrix(
            Some(Vec3::new(10.0, 0.0, 0.0)),
            Some(Vec3::new(0.0, 0.0, 90.0)),
            Some(Vec3::splat(2.0)),
        );

        // (1,0,0) -> scale (2,0,0) -> rotZ 90 (0,2,0) -> translate (10,2,0)
        let p = m.transform_point3(Vec3::X);
        assert!((p - Vec3::new(10.0, 2.0, 0.0)).length() < 0.001);
    }

    #[test]
    fn test_euler_is_intrinsic_xyz() {
        let angles = Vec3::new(30.0, 45.0, 60.0);
        let expected = Mat4::from_rotation_x(30f32.to_radians())
            * Mat4::from_rotation_y(45f32.to_radians())
            * Mat4::from_rotation_z(60f32.to_radians());

        assert!(euler_degrees_xyz(angles).abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_euler_is_not_extrinsic_xyz() {
        let angles = Vec3::new(90.0, 90.0, 0.0);
        let extrinsic = Mat4::from_rotation_y(90f32.to_radians()) * Mat4::from_rotation_x(90f32.to_radians());

        // Rx * Ry sends +Z to +X; Ry * Rx sends it to -Y
        let p = euler_degrees_xyz(angles).transform_point3(Vec3::Z);
        assert!((p - Vec3::X).length() < 0.001);
        assert!((extrinsic.transform_point3(Vec3::Z) + Vec3::Y).length() < 0.001);
        assert!(!euler_degrees_xyz(angles).abs_diff_eq(extrinsic, 1e-3));
    }

    #[test]
    fn test_transform_normal3_ignores_translation() {
        let mat = Mat4::from_translation(Vec3::new(10.0, 20.0, 30.0));
        let n = mat.transform_normal3(Vec3::Z);

        assert!((n - Vec3::Z).length() < 0.001);
    }

    #[test]
    fn test_transform_normal3_non_uniform_scale() {
        // Plane x = y stretched along X: the normal leans toward Y
        let mat = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let n = mat.transform_normal3(Vec3::new(1.0, -1.0, 0.0).normalize());

        assert!((n.length() - 1.0).abs() < 0.001);
        assert!(n.y.abs() > n.x.abs());
    }

    #[test]
    fn test_transform_aabb_rotation() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0));
        let mat = Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2);
        let transformed = mat.transform_aabb(&aabb);

        // X extent becomes Y extent
        assert!((transformed.y.max - 2.0).abs() < 0.001);
        assert!((transformed.x.min + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_transform_empty_aabb_stays_empty() {
        let transformed = Mat4::IDENTITY.transform_aabb(&Aabb::empty());
        assert!(transformed.is_empty());
    }
}
