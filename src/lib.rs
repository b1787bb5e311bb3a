//! Forward kinematics and path preview for industrial robot programs.
//!
//! The robot is described as a chain of rotational or prismatic links whose axes are given in
//! the robot base coordinate system at home. The robot may stand on external axes (tracks,
//! lifts) and work with parts held by positioners. The program is a list of actions: joint and
//! Cartesian movements, relative joint movements, tool and work object overrides and the
//! actions that do not move the robot (digital outputs, waits, comments).
//!
//! # Features
//!
//! - Forward kinematics of any number of links, with external axes carrying the robot and
//!   the posed meshes of links, tool and external axes.
//! - Path generation: every movement is interpolated in the axis value space, the TCP plane
//!   of every sample is computed with the tool active for that movement.
//! - Axis limits, unresolved Cartesian targets and targets that the supplied axis values do
//!   not reach are reported as warnings, the path is still produced.
//! - Preview of a single sample for the slider-driven display.
//! - Robot cell and program can be read from YAML, meshes from STL (feature `allow_filesystem`).
//!
//! Units are millimeters and degrees everywhere.
//!
//! ## Example
//!
//! ```
//! use nalgebra::Vector3;
//! use rs_robot_actions::actions::{Action, Movement};
//! use rs_robot_actions::constraints::AxisLimit;
//! use rs_robot_actions::kinematic_model::KinematicModel;
//! use rs_robot_actions::link::Link;
//! use rs_robot_actions::path_generator::PathGenerator;
//! use rs_robot_actions::utils::plane_at;
//!
//! let robot = KinematicModel::at_origin("turntable arm", plane_at(100.0, 0.0, 0.0), vec![
//!     Link::rotational("J1", Vector3::z(), plane_at(0.0, 0.0, 0.0), AxisLimit::new(-180.0, 180.0)),
//! ]);
//! let program = vec![Action::Movement(Movement::absolute_joint(vec![90.0], None))];
//! let path = PathGenerator::new(&robot).calculate(&program, 3).unwrap();
//! assert_eq!(path.robot_axis_values, vec![vec![22.5], vec![45.0], vec![67.5], vec![90.0]]);
//! assert!(path.warnings.is_empty());
//! ```

#[path = "utils/utils.rs"]
pub mod utils;
pub mod kinematic_traits;
pub mod kinematics_error;

pub mod constraints;

pub mod link;
pub mod external_axis;
pub mod tool;
pub mod kinematic_model;

pub mod forward_kinematics;

pub mod actions;
pub mod annotations;

#[path = "path_plan/interpolator.rs"]
pub mod interpolator;

#[path = "path_plan/polyline.rs"]
pub mod polyline;

#[path = "path_plan/path_generator.rs"]
pub mod path_generator;

pub mod preview;

#[cfg(feature = "allow_filesystem")]
pub mod parameter_error;

#[cfg(feature = "allow_filesystem")]
pub mod read_trimesh;

#[cfg(feature = "allow_filesystem")]
pub mod model_from_file;

#[cfg(feature = "allow_filesystem")]
pub mod program_from_file;

#[cfg(test)]
mod tests;
