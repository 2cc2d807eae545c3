use crate::{deg_to_rad, DMat4, DQuat, EulerRot, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Local transform of a scene node.
///
/// Components are applied scale first, then rotation, then translation, so
/// the composed matrix is `T * R * S`. Rotation is an XYZ Euler triple in
/// radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vector3,
    pub rotation: Vector3,
    pub scale: Vector3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vector3::ZERO,
        rotation: Vector3::ZERO,
        scale: Vector3::ONE,
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn from_translation(t: Vector3) -> Self {
        Self {
            position: t,
            ..Self::IDENTITY
        }
    }

    pub fn with_position(mut self, position: Vector3) -> Self {
        self.position = position;
        self
    }

    /// Set the Euler rotation from degrees.
    pub fn with_rotation_degrees(mut self, x: f64, y: f64, z: f64) -> Self {
        self.rotation = Vector3::new(deg_to_rad(x), deg_to_rad(y), deg_to_rad(z));
        self
    }

    pub fn with_scale(mut self, scale: Vector3) -> Self {
        self.scale = scale;
        self
    }

    pub fn quaternion(&self) -> DQuat {
        DQuat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scale, self.quaternion(), self.position)
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.to_mat4().transform_point3(p)
    }

    /// Decompose an affine matrix back into scale, rotation and translation.
    /// Returns `None` for singular matrices.
    pub fn from_mat4(m: DMat4) -> Option<Self> {
        if m.determinant().abs() < 1e-15 {
            return None;
        }
        let (scale, rotation, position) = m.to_scale_rotation_translation();
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        Some(Self {
            position,
            rotation: Vector3::new(x, y, z),
            scale,
        })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::dvec3;

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        let p = dvec3(1.0, 2.0, 3.0);
        assert_abs_diff_eq!(t.transform_point(p), p, epsilon = 1e-12);
    }

    #[test]
    fn test_translation() {
        let t = Transform::from_translation(dvec3(10.0, 20.0, 30.0));
        let result = t.transform_point(dvec3(1.0, 2.0, 3.0));
        assert_abs_diff_eq!(result, dvec3(11.0, 22.0, 33.0), epsilon = 1e-12);
    }

    #[test]
    fn test_scale_then_rotate_then_translate() {
        let t = Transform::identity()
            .with_position(dvec3(0.0, 2.0, 0.0))
            .with_rotation_degrees(45.0, 0.0, 0.0)
            .with_scale(Vector3::splat(0.5));

        let s = DMat4::from_scale(Vector3::splat(0.5));
        let r = DMat4::from_rotation_x(deg_to_rad(45.0));
        let tr = DMat4::from_translation(dvec3(0.0, 2.0, 0.0));
        let manual = tr * r * s;

        assert!(t.to_mat4().abs_diff_eq(manual, 1e-12));

        // (0, 1, 0) -> scaled to 0.5 -> rotated about X by 45 degrees -> lifted by 2
        let p = t.transform_point(dvec3(0.0, 1.0, 0.0));
        let h = 0.5 * deg_to_rad(45.0).cos();
        assert_abs_diff_eq!(p, dvec3(0.0, 2.0 + h, h), epsilon = 1e-12);
    }

    #[test]
    fn test_order_matters() {
        let s = DMat4::from_scale(Vector3::splat(0.5));
        let tr = DMat4::from_translation(dvec3(0.0, 2.0, 0.0));
        let p = dvec3(0.0, 0.0, 0.0);
        // translating before scaling halves the offset
        assert_abs_diff_eq!((tr * s).transform_point3(p), dvec3(0.0, 2.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!((s * tr).transform_point3(p), dvec3(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_decompose_round_trip() {
        let t = Transform::identity()
            .with_position(dvec3(1.0, -2.0, 3.0))
            .with_rotation_degrees(30.0, 20.0, 10.0)
            .with_scale(dvec3(2.0, 2.0, 2.0));
        let back = Transform::from_mat4(t.to_mat4()).unwrap();
        assert_abs_diff_eq!(back.position, t.position, epsilon = 1e-9);
        assert_abs_diff_eq!(back.rotation, t.rotation, epsilon = 1e-9);
        assert_abs_diff_eq!(back.scale, t.scale, epsilon = 1e-9);
    }

    #[test]
    fn test_singular_matrix() {
        assert!(Transform::from_mat4(DMat4::from_scale(Vector3::ZERO)).is_none());
    }
}
