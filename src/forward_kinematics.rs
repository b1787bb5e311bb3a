//! Forward kinematics of the robot on its external axes.
//!
//! The solver is a pure function of the model and the axis values: nothing is retained between
//! calls. Each link moves by the rotation (or translation) of its axis, composed with the motions
//! of all links before it. The robot base follows the external axes that carry it.

use nalgebra::Isometry3;
use parry3d::shape::TriMesh;
use tracing::trace;
use crate::kinematic_model::KinematicModel;
use crate::kinematic_traits::{AxisValues, Pose};
use crate::kinematics_error::KinematicsError;
use crate::tool::Tool;
use crate::utils::fit_to_length;

/// Geometry of one evaluation of forward kinematics, without meshes.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainFrames {
    /// Effective robot base plane (the model base plane moved by the carrying external axes)
    pub base: Pose,

    /// Absolute motion of each link (transform of the link mesh), parallel to links.
    pub link_motions: Vec<Pose>,

    /// Absolute frame of each link axis (moved attachment plane), parallel to links.
    pub joint_frames: Vec<Pose>,

    /// Mounting frame of the last link
    pub flange: Pose,

    /// Tool center point
    pub tcp: Pose,

    /// Motion of every external axis, parallel to external axes.
    pub external_motions: Vec<Pose>,

    pub robot_axis_values: AxisValues,

    /// External axis values fitted to the number of external axes of the model.
    pub external_axis_values: AxisValues,

    /// True if every robot axis value and every supplied external axis value is within limits.
    pub in_limits: bool,
}

/// Mesh together with its global transform. The mesh itself is borrowed from the model
/// or the tool.
pub struct PositionedMesh<'a> {
    pub mesh: &'a TriMesh,
    pub transform: Isometry3<f32>,
}

impl PositionedMesh<'_> {
    /// Creates a copy of the mesh with the transform applied to every vertex. Returns None
    /// if the mesh cannot be rebuilt.
    pub fn world_mesh(&self) -> Option<TriMesh> {
        TriMesh::new(
            self.mesh
                .vertices()
                .iter()
                .map(|v| self.transform.transform_point(v))
                .collect(),
            self.mesh.indices().to_vec(),
        ).ok()
    }
}

/// Robot posed for the given axis values: all frames and the posed meshes.
pub struct PositionedRobot<'a> {
    /// Posed link meshes, parallel to links (None if the link has no mesh)
    pub joints: Vec<Option<PositionedMesh<'a>>>,

    pub base: Option<PositionedMesh<'a>>,

    pub tool: Option<PositionedMesh<'a>>,

    /// Posed meshes of every external axis (static base first, if any, then moving links)
    pub external: Vec<Vec<PositionedMesh<'a>>>,

    pub chain: ChainFrames,
}

impl PositionedRobot<'_> {
    pub fn tcp(&self) -> &Pose {
        &self.chain.tcp
    }

    pub fn in_limits(&self) -> bool {
        self.chain.in_limits
    }

    pub fn robot_axis_values(&self) -> &[f64] {
        &self.chain.robot_axis_values
    }

    pub fn external_axis_values(&self) -> &[f64] {
        &self.chain.external_axis_values
    }
}

/// Forward kinematics solver bound to the kinematic model.
#[derive(Clone, Copy)]
pub struct ForwardKinematics<'a> {
    pub model: &'a KinematicModel,
}

impl<'a> ForwardKinematics<'a> {
    pub fn new(model: &'a KinematicModel) -> Self {
        ForwardKinematics { model }
    }

    /// Computes frames for the given axis values and tool.
    ///
    /// # Arguments
    ///
    /// * `robot_axis_values` - values of the robot axes, must have one value per link.
    /// * `external_axis_values` - values of the external axes. Shorter input is padded with
    ///   zeros, longer is truncated. Only the supplied values are checked against the limits.
    /// * `tool` - the tool whose TCP is computed.
    ///
    /// # Returns
    ///
    /// `KinematicsError::DimensionMismatch` if the number of robot axis values does not match
    /// the number of links. Out of limits values are not an error, they only clear `in_limits`.
    pub fn chain(&self, robot_axis_values: &[f64], external_axis_values: &[f64], tool: &Tool)
                 -> Result<ChainFrames, KinematicsError> {
        let model = self.model;
        if robot_axis_values.len() != model.axis_count() {
            return Err(KinematicsError::dimension_mismatch(
                "robot axis values", model.axis_count(), robot_axis_values.len()));
        }

        let external_count = model.external_axis_count();
        let external_values = fit_to_length(external_axis_values, external_count);
        let checked_external = external_axis_values.len().min(external_count);

        let external_motions: Vec<Pose> = model.external_axes
            .iter()
            .zip(&external_values)
            .map(|(axis, &value)| axis.transform(value))
            .collect();

        let base = model.external_axes
            .iter()
            .zip(&external_motions)
            .filter(|(axis, _)| axis.carries_robot())
            .fold(model.base_plane, |base, (_, motion)| motion * base);

        let mut accumulated = Isometry3::identity();
        let mut link_motions = Vec::with_capacity(model.axis_count());
        let mut joint_frames = Vec::with_capacity(model.axis_count());
        for (link, &value) in model.links.iter().zip(robot_axis_values) {
            accumulated *= link.local_transform(value);
            let motion = base * accumulated;
            joint_frames.push(motion * link.attachment);
            link_motions.push(motion);
        }

        let flange = base * accumulated * model.mounting_frame;
        let tcp = flange * tool.tcp;

        let in_limits = model.constraints().compliant(robot_axis_values)
            && model.external_constraints().compliant(&external_values[..checked_external]);
        if !in_limits {
            trace!("Out of limits: robot {:?}, external {:?}", robot_axis_values, external_axis_values);
        }

        Ok(ChainFrames {
            base,
            link_motions,
            joint_frames,
            flange,
            tcp,
            external_motions,
            robot_axis_values: robot_axis_values.to_vec(),
            external_axis_values: external_values,
            in_limits,
        })
    }

    /// Poses the robot with the default tool of the model.
    pub fn calculate(&self, robot_axis_values: &[f64], external_axis_values: &[f64])
                     -> Result<PositionedRobot<'a>, KinematicsError> {
        self.calculate_with_tool(robot_axis_values, external_axis_values, &self.model.tool)
    }

    /// Poses the robot with the given tool. The tool mesh is attached to the flange.
    pub fn calculate_with_tool<'b>(&self, robot_axis_values: &[f64], external_axis_values: &[f64],
                                   tool: &'b Tool) -> Result<PositionedRobot<'b>, KinematicsError>
    where
        'a: 'b,
    {
        let chain = self.chain(robot_axis_values, external_axis_values, tool)?;
        let model: &'b KinematicModel = self.model;

        let joints = model.links
            .iter()
            .zip(&chain.link_motions)
            .map(|(link, motion)| link.mesh.as_ref().map(|mesh| PositionedMesh {
                mesh,
                transform: motion.cast::<f32>(),
            }))
            .collect();

        let base = model.base_mesh.as_ref().map(|mesh| PositionedMesh {
            mesh,
            transform: chain.base.cast::<f32>(),
        });

        let tool_mesh = tool.mesh.as_ref().map(|mesh| PositionedMesh {
            mesh: mesh.as_ref(),
            transform: chain.flange.cast::<f32>(),
        });

        let external = model.external_axes
            .iter()
            .zip(&chain.external_motions)
            .map(|(axis, motion)| {
                let body = axis.body();
                let moving = motion.cast::<f32>();
                body.base
                    .iter()
                    .map(|mesh| PositionedMesh { mesh, transform: Isometry3::identity() })
                    .chain(body.links.iter().map(|mesh| PositionedMesh { mesh, transform: moving }))
                    .collect()
            })
            .collect();

        Ok(PositionedRobot {
            joints,
            base,
            tool: tool_mesh,
            external,
            chain,
        })
    }
}
