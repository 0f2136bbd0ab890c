//! Affine transforms and the per-object orientation log
use nalgebra::{Matrix4, Rotation3, Unit, Vector3};

/// Axis a slice turns around
///
/// Names follow the puzzle's front face: roll turns around Z, pitch around Y
/// and yaw around X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum RotationAxis {
    #[strum(serialize = "roll")]
    Roll,
    #[strum(serialize = "pitch")]
    Pitch,
    #[strum(serialize = "yaw")]
    Yaw,
}

impl RotationAxis {
    /// World-space unit vector of this axis
    pub fn unit_vector(self) -> Vector3<f32> {
        match self {
            RotationAxis::Roll => Vector3::z(),
            RotationAxis::Pitch => Vector3::y(),
            RotationAxis::Yaw => Vector3::x(),
        }
    }
}

/// Reference axes of an object, expressed in the object's own frame.
///
/// Starts out as the world axes and follows every logged rotation, so the
/// n-th entry of a log is applied around the axis as it stood after the
/// first n-1 entries.
#[derive(Debug, Clone, Copy)]
struct LocalAxes {
    x: Vector3<f32>,
    y: Vector3<f32>,
    z: Vector3<f32>,
}

impl LocalAxes {
    fn world() -> Self {
        Self {
            x: Vector3::x(),
            y: Vector3::y(),
            z: Vector3::z(),
        }
    }

    fn get(&self, axis: RotationAxis) -> Vector3<f32> {
        match axis {
            RotationAxis::Roll => self.z,
            RotationAxis::Pitch => self.y,
            RotationAxis::Yaw => self.x,
        }
    }

    fn rotate(&mut self, angle: f32, about: &Vector3<f32>) {
        let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(*about), angle);
        self.x = rotation * self.x;
        self.y = rotation * self.y;
        self.z = rotation * self.z;
    }
}

/// Rotation matrix for a rotation of `angle` radians around `axis`
pub fn rotation_matrix(angle: f32, axis: &Vector3<f32>) -> Matrix4<f32> {
    Matrix4::from_axis_angle(&Unit::new_normalize(*axis), angle)
}

/// Replays an orientation log and returns the resulting rotation.
///
/// Entries are applied in order, each around the local axis re-derived from
/// all entries before it. The result is the same as composing the entries
/// around fixed world axes in reverse order (`R_n * ... * R_1`).
pub fn orientation_matrix(log: &[(RotationAxis, f32)]) -> Matrix4<f32> {
    let mut matrix = Matrix4::identity();
    let mut axes = LocalAxes::world();
    for &(axis, angle) in log {
        let local = axes.get(axis);
        matrix *= rotation_matrix(angle, &local);
        axes.rotate(-angle, &local);
    }
    matrix
}

/// Model transform of one object
///
/// Operations post-multiply onto the current matrix, so within one frame the
/// first operation applied is the outermost. The orientation log is separate:
/// it survives [`Transform::load_identity`] and only ever grows.
#[derive(Debug, Clone)]
pub struct Transform {
    matrix: Matrix4<f32>,
    orientation_log: Vec<(RotationAxis, f32)>,
}

impl Transform {
    pub fn new() -> Self {
        Self {
            matrix: Matrix4::identity(),
            orientation_log: Vec::new(),
        }
    }

    /// Reset the matrix to identity, keeping the orientation log
    pub fn load_identity(&mut self) {
        self.matrix = Matrix4::identity();
    }

    pub fn translate(&mut self, offset: &Vector3<f32>) {
        self.matrix *= Matrix4::new_translation(offset);
    }

    pub fn rotate(&mut self, angle: f32, axis: &Vector3<f32>) {
        self.matrix *= rotation_matrix(angle, axis);
    }

    pub fn scale(&mut self, factors: &Vector3<f32>) {
        self.matrix *= Matrix4::new_nonuniform_scaling(factors);
    }

    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }

    /// Append a committed reorientation to the log
    pub fn record_permanent_rotation(&mut self, axis: RotationAxis, angle: f32) {
        self.orientation_log.push((axis, angle));
    }

    pub fn orientation_log(&self) -> &[(RotationAxis, f32)] {
        &self.orientation_log
    }

    /// Apply every logged reorientation, in recorded order
    pub fn replay_permanent_rotations(&mut self) {
        self.matrix *= orientation_matrix(&self.orientation_log);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_new_transform_is_identity() {
        let transform = Transform::new();
        assert!((transform.matrix() - Matrix4::identity()).norm() < 1e-6);
        assert!(transform.orientation_log().is_empty());
    }

    #[test]
    fn test_post_multiplication_order() {
        // Rotate first, then translate: the translation happens in the rotated frame.
        let mut transform = Transform::new();
        transform.rotate(FRAC_PI_2, &Vector3::z());
        transform.translate(&Vector3::new(1.0, 0.0, 0.0));

        let origin = transform.matrix().transform_point(&nalgebra::Point3::origin());
        assert!((origin.coords - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_scale() {
        let mut transform = Transform::new();
        transform.scale(&Vector3::new(2.0, 3.0, 4.0));
        let v = transform.matrix().transform_vector(&Vector3::new(1.0, 1.0, 1.0));
        assert!((v - Vector3::new(2.0, 3.0, 4.0)).norm() < 1e-6);
    }

    #[test]
    fn test_load_identity_keeps_log() {
        let mut transform = Transform::new();
        transform.record_permanent_rotation(RotationAxis::Yaw, FRAC_PI_2);
        transform.translate(&Vector3::new(1.0, 2.0, 3.0));
        transform.load_identity();

        assert!((transform.matrix() - Matrix4::identity()).norm() < 1e-6);
        assert_eq!(transform.orientation_log(), &[(RotationAxis::Yaw, FRAC_PI_2)]);
    }

    #[test]
    fn test_replay_order_matters() {
        let yaw_then_pitch = orientation_matrix(&[
            (RotationAxis::Yaw, FRAC_PI_2),
            (RotationAxis::Pitch, FRAC_PI_2),
        ]);
        let pitch_then_yaw = orientation_matrix(&[
            (RotationAxis::Pitch, FRAC_PI_2),
            (RotationAxis::Yaw, FRAC_PI_2),
        ]);
        assert!((yaw_then_pitch - pitch_then_yaw).norm() > 0.5);
    }

    #[test]
    fn test_replay_matches_world_axis_composition() {
        let log = [
            (RotationAxis::Yaw, FRAC_PI_2),
            (RotationAxis::Pitch, -FRAC_PI_2),
            (RotationAxis::Roll, FRAC_PI_2),
            (RotationAxis::Pitch, FRAC_PI_2),
        ];
        let mut expected = Matrix4::identity();
        for &(axis, angle) in &log {
            expected = rotation_matrix(angle, &axis.unit_vector()) * expected;
        }
        assert!((orientation_matrix(&log) - expected).norm() < 1e-5);
    }

    #[test]
    fn test_replay_differs_from_fixed_local_axes() {
        let log = [
            (RotationAxis::Yaw, FRAC_PI_2),
            (RotationAxis::Pitch, FRAC_PI_2),
        ];
        let naive = rotation_matrix(FRAC_PI_2, &Vector3::x())
            * rotation_matrix(FRAC_PI_2, &Vector3::y());
        assert!((orientation_matrix(&log) - naive).norm() > 0.5);
    }

    #[test]
    fn test_replay_on_transform() {
        let mut transform = Transform::new();
        transform.record_permanent_rotation(RotationAxis::Roll, FRAC_PI_2);
        transform.replay_permanent_rotations();
        let v = transform.matrix().transform_vector(&Vector3::x());
        assert!((v - Vector3::y()).norm() < 1e-6);
    }
}
