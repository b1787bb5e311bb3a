//! Robot link: one axis of the kinematic chain together with its mesh

use nalgebra::{Point3, Unit, Vector3};
use parry3d::shape::TriMesh;
use crate::constraints::AxisLimit;
use crate::kinematic_traits::Pose;
use crate::utils::{rotation_about, translation_along};

/// How the axis value moves the link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisKind {
    /// Axis value is the rotation angle in degrees
    Rotational,
    /// Axis value is the displacement in millimeters
    Prismatic,
}

/// Link of the robot chain. The axis direction and the attachment plane are given in the
/// robot base coordinate system with the robot in its home (all axes at zero) configuration,
/// the mesh is given in the same coordinate system.
pub struct Link {
    pub name: String,
    pub kind: AxisKind,

    /// Direction of rotation (right hand rule) or translation.
    pub axis: Unit<Vector3<f64>>,

    /// Plane of the axis. The rotation axis passes through its origin.
    pub attachment: Pose,

    /// Allowed axis values
    pub limits: AxisLimit,

    pub mesh: Option<TriMesh>,
}

impl Link {
    /// Rotational link with the axis passing through the origin of the attachment plane.
    pub fn rotational(name: &str, axis: Vector3<f64>, attachment: Pose, limits: AxisLimit) -> Self {
        Link {
            name: name.to_string(),
            kind: AxisKind::Rotational,
            axis: Unit::new_normalize(axis),
            attachment,
            limits,
            mesh: None,
        }
    }

    /// Prismatic link moving along the axis.
    pub fn prismatic(name: &str, axis: Vector3<f64>, attachment: Pose, limits: AxisLimit) -> Self {
        Link {
            name: name.to_string(),
            kind: AxisKind::Prismatic,
            axis: Unit::new_normalize(axis),
            attachment,
            limits,
            mesh: None,
        }
    }

    pub fn with_mesh(mut self, mesh: TriMesh) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Motion of this link, relative to its parent, for the given axis value.
    pub fn local_transform(&self, value: f64) -> Pose {
        match self.kind {
            AxisKind::Rotational => {
                let origin = Point3::from(self.attachment.translation.vector);
                rotation_about(&self.axis, &origin, value)
            }
            AxisKind::Prismatic => translation_along(&self.axis, value),
        }
    }
}
