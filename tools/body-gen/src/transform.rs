//! Rigid transforms between part frames
//!
//! Euler angles follow the URDF `rpy` convention: fixed-axis roll about X,
//! then pitch about Y, then yaw about Z, giving `R = Rz(yaw) * Ry(pitch) * Rx(roll)`.
//! The same triple is written verbatim into `<origin rpy="..."/>`, so the
//! rotation applied to a point and the one recorded in the URDF always agree.

use glam::{DMat3, DVec3};

/// Rotation (Euler angles) followed by a translation
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    /// (roll, pitch, yaw) in radians
    pub rotation: DVec3,
    /// Offset applied after rotation
    pub translation: DVec3,
}

impl Pose {
    /// Create a pose from Euler angles and a translation
    pub const fn new(rotation: DVec3, translation: DVec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Apply this pose to a point
    pub fn apply(&self, point: DVec3) -> DVec3 {
        transform_point(point, self.rotation, self.translation)
    }
}

/// Rotation matrix for (roll, pitch, yaw)
pub fn rotation_matrix(rotation: DVec3) -> DMat3 {
    let (roll, pitch, yaw) = (rotation.x, rotation.y, rotation.z);
    DMat3::from_rotation_z(yaw) * DMat3::from_rotation_y(pitch) * DMat3::from_rotation_x(roll)
}

/// Rigid transformation of a point: `R(roll, pitch, yaw) * point + translation`
pub fn transform_point(point: DVec3, rotation: DVec3, translation: DVec3) -> DVec3 {
    rotation_matrix(rotation) * point + translation
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-12;

    fn assert_close(actual: DVec3, expected: DVec3) {
        assert!(
            actual.abs_diff_eq(expected, EPSILON),
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_origin_maps_to_translation() {
        let t = DVec3::new(0.3, -1.2, 4.0);
        let r = DVec3::new(0.4, 1.1, -2.5);
        assert_close(transform_point(DVec3::ZERO, r, t), t);
    }

    #[test]
    fn test_identity_is_noop() {
        let p = DVec3::new(1.5, -0.25, 8.0);
        assert_close(transform_point(p, DVec3::ZERO, DVec3::ZERO), p);
        assert_close(Pose::default().apply(p), p);
    }

    #[test]
    fn test_roll_quarter_turn() {
        // Roll about X maps +Y to +Z and +Z to -Y
        let r = DVec3::new(FRAC_PI_2, 0.0, 0.0);
        assert_close(transform_point(DVec3::Y, r, DVec3::ZERO), DVec3::Z);
        assert_close(transform_point(DVec3::Z, r, DVec3::ZERO), -DVec3::Y);
    }

    #[test]
    fn test_roll_applied_before_yaw() {
        // Rx first sends +Y to +Z; Rz then leaves +Z untouched
        let r = DVec3::new(FRAC_PI_2, 0.0, FRAC_PI_2);
        assert_close(transform_point(DVec3::Y, r, DVec3::ZERO), DVec3::Z);
        // +X is untouched by Rx, then Rz sends it to +Y
        assert_close(transform_point(DVec3::X, r, DVec3::ZERO), DVec3::Y);
    }

    #[test]
    fn test_affine_consistency() {
        let r = DVec3::new(0.3, -0.7, 1.9);
        let t = DVec3::new(2.0, 0.5, -1.0);
        let p1 = DVec3::new(1.0, 2.0, 3.0);
        let p2 = DVec3::new(-0.5, 0.25, 4.0);

        // T(p1 + p2) = T(p1) + T(p2) - T(0)
        let lhs = transform_point(p1 + p2, r, t);
        let rhs = transform_point(p1, r, t) + transform_point(p2, r, t) - t;
        assert_close(lhs, rhs);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let r = DVec3::new(1.1, 0.2, -0.9);
        let p = DVec3::new(3.0, -4.0, 12.0);
        let rotated = transform_point(p, r, DVec3::ZERO);
        assert!((rotated.length() - 13.0).abs() < EPSILON);
    }
}
