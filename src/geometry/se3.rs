use nalgebra::{Quaternion, UnitQuaternion, Vector3};

/// Rigid-body transform: rotation as a unit quaternion plus translation.
#[derive(Debug, Clone, PartialEq)]
pub struct SE3 {
    pub rotation: UnitQuaternion<f64>,
    pub translation: Vector3<f64>,
}

impl SE3 {
    pub fn identity() -> Self {
        Self {
            rotation: UnitQuaternion::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Build from a w-first quaternion and a translation. The quaternion is
    /// normalized on the way in.
    pub fn from_quaternion(qw: f64, qx: f64, qy: f64, qz: f64, translation: Vector3<f64>) -> Self {
        let rotation = UnitQuaternion::from_quaternion(Quaternion::new(qw, qx, qy, qz));
        Self {
            rotation,
            translation,
        }
    }

    /// Composition `self * other`: apply `other` first, then `self`.
    pub fn compose(&self, other: &SE3) -> SE3 {
        SE3 {
            rotation: self.rotation * other.rotation,
            translation: self.rotation * other.translation + self.translation,
        }
    }

    pub fn inverse(&self) -> SE3 {
        let rotation = self.rotation.inverse();
        SE3 {
            translation: -(rotation * self.translation),
            rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compose_with_inverse_is_identity() {
        let pose = SE3::from_quaternion(0.9, 0.1, 0.2, 0.3, Vector3::new(1.0, -2.0, 0.5));
        let composed = pose.compose(&pose.inverse());

        assert_relative_eq!(composed.rotation.angle(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(composed.translation, Vector3::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn test_from_quaternion_normalizes() {
        let pose = SE3::from_quaternion(2.0, 0.0, 0.0, 0.0, Vector3::zeros());

        assert_relative_eq!(pose.rotation.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(pose.rotation.angle(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_undoes_translation() {
        let pose = SE3::from_quaternion(1.0, 0.0, 0.0, 0.0, Vector3::new(3.0, 0.0, -1.0));
        let inv = pose.inverse();

        assert_relative_eq!(inv.translation, Vector3::new(-3.0, 0.0, 1.0), epsilon = 1e-12);
    }
}
