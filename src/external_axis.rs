//! External axes: linear tracks and rotational positioners.
//!
//! Same as robot axis values, the external axis values are not stored in these structures.
//! The axis maps its scalar value into the rigid motion that is applied to its moving meshes
//! and, if the axis carries the robot, to the robot base.
//! ```
//! use std::sync::Arc;
//! use nalgebra::Vector3;
//! use rs_robot_actions::constraints::AxisLimit;
//! use rs_robot_actions::external_axis::LinearAxis;
//! use rs_robot_actions::kinematic_traits::ExternalAxis;
//! use rs_robot_actions::utils::plane_at;
//!
//! let track = LinearAxis::new("track", plane_at(0.0, 0.0, 0.0), Vector3::x(),
//!                             AxisLimit::new(0.0, 4000.0)).carrying_robot();
//! let moved = track.transform(1500.0);
//! assert_eq!(moved.translation.vector.x, 1500.0);
//! let axes: Vec<Arc<dyn ExternalAxis>> = vec![Arc::new(track)];
//! ```

use nalgebra::{Point3, Unit, Vector3};
use parry3d::shape::TriMesh;
use crate::constraints::AxisLimit;
use crate::kinematic_traits::{ExternalAxis, Pose};
use crate::link::AxisKind;
use crate::utils::{rotation_about, translation_along};

/// Meshes of the external axis, given in world coordinates at axis value zero.
#[derive(Default)]
pub struct AxisBody {
    /// Static part that does not move with the axis value
    pub base: Option<TriMesh>,
    /// Moving parts
    pub links: Vec<TriMesh>,
}

/// Linear axis (track) that moves along the given direction.
pub struct LinearAxis {
    name: String,
    attachment: Pose,
    axis: Unit<Vector3<f64>>,
    limits: AxisLimit,
    carries_robot: bool,
    body: AxisBody,
}

/// Rotational axis (positioner, turntable) rotating about the given direction that passes
/// through the origin of the attachment plane.
pub struct RotationalAxis {
    name: String,
    attachment: Pose,
    axis: Unit<Vector3<f64>>,
    limits: AxisLimit,
    carries_robot: bool,
    body: AxisBody,
}

impl LinearAxis {
    pub fn new(name: &str, attachment: Pose, axis: Vector3<f64>, limits: AxisLimit) -> Self {
        LinearAxis {
            name: name.to_string(),
            attachment,
            axis: Unit::new_normalize(axis),
            limits,
            carries_robot: false,
            body: AxisBody::default(),
        }
    }

    /// The robot is mounted on the carriage of this track.
    pub fn carrying_robot(mut self) -> Self {
        self.carries_robot = true;
        self
    }

    pub fn with_body(mut self, body: AxisBody) -> Self {
        self.body = body;
        self
    }
}

impl RotationalAxis {
    pub fn new(name: &str, attachment: Pose, axis: Vector3<f64>, limits: AxisLimit) -> Self {
        RotationalAxis {
            name: name.to_string(),
            attachment,
            axis: Unit::new_normalize(axis),
            limits,
            carries_robot: false,
            body: AxisBody::default(),
        }
    }

    /// The robot is mounted on this axis and rotates together with it.
    pub fn carrying_robot(mut self) -> Self {
        self.carries_robot = true;
        self
    }

    pub fn with_body(mut self, body: AxisBody) -> Self {
        self.body = body;
        self
    }
}

impl ExternalAxis for LinearAxis {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> AxisKind {
        AxisKind::Prismatic
    }

    fn limits(&self) -> AxisLimit {
        self.limits
    }

    fn attachment(&self) -> &Pose {
        &self.attachment
    }

    fn carries_robot(&self) -> bool {
        self.carries_robot
    }

    fn body(&self) -> &AxisBody {
        &self.body
    }

    fn transform(&self, value: f64) -> Pose {
        translation_along(&self.axis, value)
    }
}

impl ExternalAxis for RotationalAxis {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> AxisKind {
        AxisKind::Rotational
    }

    fn limits(&self) -> AxisLimit {
        self.limits
    }

    fn attachment(&self) -> &Pose {
        &self.attachment
    }

    fn carries_robot(&self) -> bool {
        self.carries_robot
    }

    fn body(&self) -> &AxisBody {
        &self.body
    }

    fn transform(&self, value: f64) -> Pose {
        let origin = Point3::from(self.attachment.translation.vector);
        rotation_about(&self.axis, &origin, value)
    }
}
