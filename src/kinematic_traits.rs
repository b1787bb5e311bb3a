//! Common type aliases and the trait implemented by external axes

extern crate nalgebra as na;

use na::Isometry3;
use crate::constraints::AxisLimit;
use crate::external_axis::AxisBody;
use crate::link::AxisKind;

/// Pose is used for any plane (frame) in the robotic cell: robot base, joint frames,
/// tool center point, work objects and targets. It contains both Cartesian position (mm)
/// and rotation quaternion.
/// ```
/// extern crate nalgebra as na;
/// use na::{Isometry3, Translation3, UnitQuaternion, Vector3};
///
/// type Pose = Isometry3<f64>;
///
/// let translation = Translation3::new(100.0, 0.0, 0.0);
/// let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 90_f64.to_radians());
/// let plane = Pose::from_parts(translation, rotation);
/// ```
pub type Pose = Isometry3<f64>;

/// Axis values of the robot or of the external axes. Rotational axes are in degrees,
/// prismatic axes in millimeters. Unlike the fixed size arrays of 6 axis robots,
/// the length follows the model.
pub type AxisValues = Vec<f64>;

/// Auxiliary linear or rotational stage (track, positioner) that contributes one more
/// degree of freedom. The implementations differ only in how the scalar axis value
/// maps to a rigid transform.
pub trait ExternalAxis: Send + Sync {
    /// Name of the axis, used to couple work objects with it.
    fn name(&self) -> &str;

    fn kind(&self) -> AxisKind;

    fn limits(&self) -> AxisLimit;

    /// Plane where the axis is attached, in world coordinates at axis value zero.
    fn attachment(&self) -> &Pose;

    /// True if the robot is mounted on this axis so that the robot base moves with it.
    fn carries_robot(&self) -> bool;

    /// Meshes of the axis (static base and moving links).
    fn body(&self) -> &AxisBody;

    /// World space motion produced by the given axis value.
    fn transform(&self, value: f64) -> Pose;

    fn in_limits(&self, value: f64) -> bool {
        self.limits().contains(value)
    }
}
