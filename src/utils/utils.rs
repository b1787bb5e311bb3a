//! Helper functions

use nalgebra::{Isometry3, Point3, Rotation3, Translation3, Unit, UnitQuaternion, Vector3};
use crate::kinematic_traits::Pose;

/// Rigid rotation by the given angle (degrees) about the axis passing through the origin point.
pub fn rotation_about(axis: &Unit<Vector3<f64>>, origin: &Point3<f64>, degrees: f64) -> Pose {
    let rotation = UnitQuaternion::from_axis_angle(axis, degrees.to_radians());
    Isometry3::rotation_wrt_point(rotation, *origin)
}

/// Rigid translation by the given distance (mm) along the axis.
pub fn translation_along(axis: &Unit<Vector3<f64>>, distance: f64) -> Pose {
    Isometry3::from_parts(
        Translation3::from(axis.into_inner() * distance),
        UnitQuaternion::identity(),
    )
}

/// Builds the plane from the origin, the x axis direction and the direction that lies in the
/// plane (y axis, does not need to be exactly perpendicular). Returns None if the axes are
/// degenerate (zero length or parallel).
pub fn plane_from_axes(origin: Point3<f64>, x_axis: Vector3<f64>, y_axis: Vector3<f64>) -> Option<Pose> {
    let z_axis = x_axis.cross(&y_axis);
    if x_axis.norm() == 0.0 || z_axis.norm() == 0.0 {
        return None;
    }
    let x = x_axis.normalize();
    let z = z_axis.normalize();
    let y = z.cross(&x);
    let rotation = Rotation3::from_basis_unchecked(&[x, y, z]);
    Some(Isometry3::from_parts(
        Translation3::from(origin.coords),
        UnitQuaternion::from_rotation_matrix(&rotation),
    ))
}

/// Plane at the given origin, parallel to the world XY plane.
pub fn plane_at(x: f64, y: f64, z: f64) -> Pose {
    Isometry3::translation(x, y, z)
}

/// Distance between plane origins (mm) and the angle between their orientations (degrees)
pub fn plane_deviation(a: &Pose, b: &Pose) -> (f64, f64) {
    let translation = (a.translation.vector - b.translation.vector).norm();
    let angle = a.rotation.angle_to(&b.rotation).to_degrees();
    (translation, angle)
}

/// Checks if all values are finite
pub fn is_valid(values: &[f64]) -> bool {
    values.iter().all(|q| q.is_finite())
}

/// Pads with zeros or truncates the values to the required length.
pub fn fit_to_length(values: &[f64], length: usize) -> Vec<f64> {
    let mut fitted: Vec<f64> = values.iter().take(length).copied().collect();
    fitted.resize(length, 0.0);
    fitted
}

/// Format axis values for output (degrees or mm are shown as they are)
pub fn format_axis_values(values: &[f64]) -> String {
    let row: Vec<String> = values.iter().map(|v| format!("{:8.2}", v)).collect();
    format!("[{}]", row.join(" ").trim_start())
}

/// Format the plane origin and rotation quaternion for output
pub fn format_plane(plane: &Pose) -> String {
    let t = plane.translation.vector;
    let q = plane.rotation;
    format!(
        "[{:.3}, {:.3}, {:.3}], quat {{ w: {:.4}, i: {:.4}, j: {:.4}, k: {:.4} }}",
        t.x, t.y, t.z, q.w, q.i, q.j, q.k
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_with_all_finite() {
        assert!(is_valid(&[0.0, 1.0, -1.0, 0.5, -0.5, 180.0]));
    }

    #[test]
    fn test_is_valid_with_nan() {
        assert!(!is_valid(&[0.0, f64::NAN, 1.0]));
    }

    #[test]
    fn test_is_valid_with_infinity() {
        assert!(!is_valid(&[0.0, f64::INFINITY]));
    }

    #[test]
    fn test_fit_to_length() {
        assert_eq!(fit_to_length(&[1.0, 2.0], 4), vec![1.0, 2.0, 0.0, 0.0]);
        assert_eq!(fit_to_length(&[1.0, 2.0, 3.0], 2), vec![1.0, 2.0]);
        assert!(fit_to_length(&[1.0], 0).is_empty());
    }

    #[test]
    fn test_rotation_about_offset_axis() {
        // Rotating the point (200, 0, 0) around vertical axis through (100, 0, 0) by 90 degrees
        let rotation = rotation_about(&Vector3::z_axis(), &Point3::new(100.0, 0.0, 0.0), 90.0);
        let moved = rotation.transform_point(&Point3::new(200.0, 0.0, 0.0));
        assert!((moved - Point3::new(100.0, 100.0, 0.0)).norm() < 1E-9);
    }

    #[test]
    fn test_translation_along() {
        let translation = translation_along(&Vector3::y_axis(), 250.0);
        let moved = translation.transform_point(&Point3::origin());
        assert!((moved - Point3::new(0.0, 250.0, 0.0)).norm() < 1E-12);
    }

    #[test]
    fn test_plane_from_axes() {
        let plane = plane_from_axes(
            Point3::new(1.0, 2.0, 3.0),
            Vector3::new(0.0, 2.0, 0.0),
            Vector3::new(-1.0, 0.5, 0.0),
        ).expect("Plane must be valid");
        let x = plane.rotation * Vector3::x();
        let y = plane.rotation * Vector3::y();
        let z = plane.rotation * Vector3::z();
        assert!((x - Vector3::y()).norm() < 1E-9);
        assert!((y + Vector3::x()).norm() < 1E-9);
        assert!((z - Vector3::z()).norm() < 1E-9);
        assert_eq!(plane.translation.vector, Vector3::new(1.0, 2.0, 3.0));

        assert!(plane_from_axes(Point3::origin(), Vector3::x(), Vector3::x() * 2.0).is_none());
    }

    #[test]
    fn test_plane_deviation() {
        let a = plane_at(0.0, 0.0, 0.0);
        let b = rotation_about(&Vector3::z_axis(), &Point3::new(0.0, 0.0, 0.0), 30.0)
            * plane_at(3.0, 4.0, 0.0);
        let (distance, angle) = plane_deviation(&a, &b);
        assert!((distance - 5.0).abs() < 1E-9);
        assert!((angle - 30.0).abs() < 1E-9);
    }
}
