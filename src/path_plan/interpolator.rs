use nalgebra::Translation3;
use crate::kinematic_traits::{AxisValues, Pose};
use crate::kinematics_error::KinematicsError;

/// Interpolate axis values between the start and the end. `t` is clamped into [0, 1].
/// The values are interpolated linearly in the stored axis value domain, without
/// taking the shortest path around the circle for rotational axes.
pub fn interpolate_joints(start: &[f64], end: &[f64], t: f64) -> AxisValues {
    if t <= 0.0 {
        return start.to_vec();
    } else if t >= 1.0 {
        return end.to_vec();
    }

    start.iter()
        .zip(end)
        .map(|(from, to)| from + t * (to - from))
        .collect()
}

/// Produces `count` evenly spaced axis value vectors from `from` (exclusive) to `to` (inclusive).
/// Sample `k` (1-based) is taken at `t = k / count`; the last sample is `to` itself, so there is no
/// floating point drift at the target. `count == 1` returns just `[to]`, `count == 0` returns
/// nothing.
///
/// ```
/// use rs_robot_actions::interpolator::interpolate;
/// let samples = interpolate(&[0.0], &[90.0], 4).unwrap();
/// assert_eq!(samples, vec![vec![22.5], vec![45.0], vec![67.5], vec![90.0]]);
/// ```
pub fn interpolate(from: &[f64], to: &[f64], count: usize) -> Result<Vec<AxisValues>, KinematicsError> {
    if from.len() != to.len() {
        return Err(KinematicsError::dimension_mismatch("interpolation input", from.len(), to.len()));
    }

    Ok((1..=count)
        .map(|k| {
            if k == count {
                to.to_vec()
            } else {
                interpolate_joints(from, to, k as f64 / count as f64)
            }
        })
        .collect())
}

/// Interpolates the plane: translation linearly, rotation by spherical linear interpolation.
pub fn interpolate_plane(from: &Pose, to: &Pose, t: f64) -> Pose {
    let t = t.clamp(0.0, 1.0);
    let translation = from.translation.vector.lerp(&to.translation.vector, t);
    // Opposite orientations have no unique slerp, keep the start rotation then
    let rotation = from.rotation.try_slerp(&to.rotation, t, 1E-9).unwrap_or(from.rotation);
    Pose::from_parts(Translation3::from(translation), rotation)
}
