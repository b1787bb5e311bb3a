//! Provides tool and work object frames.
//! The tool moves with the robot flange, the tool center point (TCP) is where the
//! path targets are reached. The work object defines the coordinate system in which the
//! Cartesian targets are given. Both can be overridden in the middle of the program:
//! ```
//! use nalgebra::{Isometry3, Translation3, UnitQuaternion};
//! use rs_robot_actions::tool::{Tool, WorkObject};
//!
//! // Tool extends 200 mm in the Z direction of the flange, envisioning something like a torch
//! let torch = Tool::new("torch", Isometry3::from_parts(
//!   Translation3::new(0.0, 0.0, 200.0), UnitQuaternion::identity()));
//!
//! // Table at 800 mm height, one meter in front of the robot
//! let table = WorkObject::new("table", Isometry3::from_parts(
//!   Translation3::new(1000.0, 0.0, 800.0), UnitQuaternion::identity()));
//!
//! let target = Isometry3::translation(50.0, 0.0, 0.0);
//! let world = table.frame() * target;
//! assert_eq!(world.translation.vector.x, 1050.0);
//! let flange = world * torch.tcp.inverse();
//! assert_eq!(flange.translation.vector.z, 600.0);
//! ```

extern crate nalgebra as na;

use std::fmt;
use std::sync::Arc;
use na::Isometry3;
use parry3d::shape::TriMesh;
use crate::kinematic_traits::Pose;

/// Defines the fixed tool that is attached to the robot flange (mounting frame of the last link).
#[derive(Clone)]
pub struct Tool {
    pub name: String,

    /// Transformation from the robot's flange to the tool's TCP.
    pub tcp: Pose,

    /// Tool mesh, given in the flange coordinate system. Shared between the copies of the tool
    /// that the actions carry.
    pub mesh: Option<Arc<TriMesh>>,
}

impl Tool {
    pub fn new(name: &str, tcp: Pose) -> Self {
        Tool { name: name.to_string(), tcp, mesh: None }
    }

    pub fn with_mesh(mut self, mesh: TriMesh) -> Self {
        self.mesh = Some(Arc::new(mesh));
        self
    }
}

impl Default for Tool {
    /// The predefined `tool0`: TCP at the flange, no mesh.
    fn default() -> Self {
        Tool::new("tool0", Isometry3::identity())
    }
}

impl PartialEq for Tool {
    fn eq(&self, other: &Self) -> bool {
        let same_mesh = match (&self.mesh, &other.mesh) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        self.name == other.name && self.tcp == other.tcp && same_mesh
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("tcp", &self.tcp)
            .field("mesh", &self.mesh.is_some())
            .finish()
    }
}

/// Defines the work object the Cartesian targets are given in. The work object may be
/// coordinated with (moved by) an external axis, typically a positioner holding the part.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkObject {
    pub name: String,

    /// User frame in world coordinates
    pub user_frame: Pose,

    /// Object frame relative to the user frame
    pub object_frame: Pose,

    /// Name of the external axis moving this work object, if any.
    pub coordinated_axis: Option<String>,
}

impl WorkObject {
    pub fn new(name: &str, user_frame: Pose) -> Self {
        WorkObject {
            name: name.to_string(),
            user_frame,
            object_frame: Isometry3::identity(),
            coordinated_axis: None,
        }
    }

    /// The predefined `wobj0` that coincides with the world coordinate system.
    pub fn world() -> Self {
        WorkObject::new("wobj0", Isometry3::identity())
    }

    pub fn with_object_frame(mut self, object_frame: Pose) -> Self {
        self.object_frame = object_frame;
        self
    }

    pub fn coordinated_with(mut self, axis_name: &str) -> Self {
        self.coordinated_axis = Some(axis_name.to_string());
        self
    }

    /// Frame of the work object when not moved by an external axis.
    pub fn frame(&self) -> Pose {
        self.user_frame * self.object_frame
    }

    /// Frame of the work object with the motion of the coordinated external axis applied.
    pub fn frame_moved_by(&self, axis_motion: &Pose) -> Pose {
        axis_motion * self.frame()
    }
}

impl Default for WorkObject {
    fn default() -> Self {
        WorkObject::world()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Translation3, UnitQuaternion, Vector3};
    use crate::utils::rotation_about;

    /// Asserts that two `Translation3<f64>` instances are approximately equal within a given tolerance.
    pub(crate) fn assert_diff(a: &Translation3<f64>, b: &Translation3<f64>, expected_diff: [f64; 3], epsilon: f64) {
        let actual_diff = a.vector - b.vector;

        assert!(
            (actual_diff.x - expected_diff[0]).abs() <= epsilon,
            "X difference is not as expected: actual difference = {}, expected difference = {}",
            actual_diff.x, expected_diff[0]
        );
        assert!(
            (actual_diff.y - expected_diff[1]).abs() <= epsilon,
            "Y difference is not as expected: actual difference = {}, expected difference = {}",
            actual_diff.y, expected_diff[1]
        );
        assert!(
            (actual_diff.z - expected_diff[2]).abs() <= epsilon,
            "Z difference is not as expected: actual difference = {}, expected difference = {}",
            actual_diff.z, expected_diff[2]
        );
    }

    #[test]
    fn test_tool_offsets_tcp() {
        let flange = Isometry3::from_parts(
            Translation3::new(500.0, 0.0, 800.0),
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 90_f64.to_radians()),
        );
        let tool = Tool::new("sword", Isometry3::translation(0.0, 0.0, 1000.0));
        let tcp = flange * tool.tcp;
        // Flange z axis now points along world x
        assert_diff(&tcp.translation, &flange.translation, [1000.0, 0.0, 0.0], 1E-9);
    }

    #[test]
    fn test_default_tool_and_work_object() {
        let tool = Tool::default();
        assert_eq!(tool.name, "tool0");
        assert_eq!(tool.tcp, Isometry3::identity());
        let wobj = WorkObject::default();
        assert_eq!(wobj.name, "wobj0");
        assert_eq!(wobj.frame(), Isometry3::identity());
    }

    #[test]
    fn test_work_object_frames_compose() {
        let wobj = WorkObject::new("fixture", Isometry3::translation(1000.0, 0.0, 0.0))
            .with_object_frame(Isometry3::translation(0.0, 200.0, 0.0));
        assert_diff(&wobj.frame().translation, &Translation3::new(0.0, 0.0, 0.0),
                    [1000.0, 200.0, 0.0], 1E-12);
    }

    #[test]
    fn test_coordinated_work_object_follows_axis() {
        let wobj = WorkObject::new("part", Isometry3::translation(1100.0, 0.0, 800.0))
            .coordinated_with("turntable");
        assert_eq!(wobj.coordinated_axis.as_deref(), Some("turntable"));
        let turn = rotation_about(&Vector3::z_axis(), &Point3::new(1000.0, 0.0, 0.0), 90.0);
        let moved = wobj.frame_moved_by(&turn);
        assert_diff(&moved.translation, &Translation3::new(0.0, 0.0, 0.0),
                    [1000.0, 100.0, 800.0], 1E-9);
    }

    #[test]
    fn test_tool_equality_by_mesh_identity() {
        let a = Tool::new("gripper", Isometry3::translation(0.0, 0.0, 150.0));
        let b = a.clone();
        assert_eq!(a, b);
        let c = Tool::new("gripper", Isometry3::translation(0.0, 0.0, 151.0));
        assert_ne!(a, c);
    }
}
