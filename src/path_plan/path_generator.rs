//! Path generation over the robot program.
//!
//! The generator walks the actions in order, carrying the interpreter state (current axis
//! values, active tool and work object). Every movement is split into evenly spaced samples
//! in the axis value space, forward kinematics gives the TCP plane of each sample. Problems
//! that do not prevent the path from being built (axis limits, targets without axis values)
//! are collected as warnings; only structural problems (wrong number of axis values) abort.

use std::fmt;
use std::iter::once;
use std::ops::Range;
use nalgebra::Point3;
use tracing::{debug, trace};
use crate::actions::{Action, Movement, MovementType, RelativeJointMovement, SpeedData, Target, ZoneData};
use crate::annotations::SampleFlags;
use crate::constraints::{Constraints, LimitViolation};
use crate::forward_kinematics::{ChainFrames, ForwardKinematics};
use crate::interpolator::{interpolate, interpolate_plane};
use crate::kinematic_model::KinematicModel;
use crate::kinematic_traits::{AxisValues, Pose};
use crate::kinematics_error::KinematicsError;
use crate::polyline::Polyline;
use crate::tool::{Tool, WorkObject};
use crate::utils::{fit_to_length, plane_deviation};

/// Default allowed distance between the target and the TCP computed from the supplied axis values, mm
pub const DEFAULT_POSITION_TOLERANCE: f64 = 1.0;

/// Default allowed angle between the target and the TCP computed from the supplied axis values, degrees
pub const DEFAULT_ORIENTATION_TOLERANCE: f64 = 0.5;

/// Larger numbers of intermediate samples per movement are reduced to this value
pub const MAX_INTERPOLATIONS: usize = 10_000;

/// Axis referenced by a warning
#[derive(Clone, Debug, PartialEq)]
pub enum AxisRef {
    /// Robot axis, 0-based index
    Robot(usize),
    /// External axis, 0-based index and name
    External(usize, String),
}

/// Non-fatal problem found while generating the path.
#[derive(Clone, Debug, PartialEq)]
pub enum PathWarning {
    /// Cartesian target without axis values, the robot holds its position.
    UnresolvedTarget { action: usize, target: String },

    /// Some sample of the movement has the axis value outside the limits. Reported once per
    /// axis and movement, for the first offending sample.
    AxisLimitExceeded { action: usize, axis: AxisRef, violation: LimitViolation },

    /// Axis values supplied with the Cartesian target do not bring the TCP to the target.
    TargetMismatch { action: usize, target: String, distance: f64, angle: f64 },

    /// Work object is coordinated with the external axis that the robot does not have.
    UnknownExternalAxis { action: usize, work_object: String, axis: String },
}

/// One motion of the program: the samples it produced and the curve of the TCP.
#[derive(Clone, Debug, PartialEq)]
pub struct PathSegment {
    /// Index of the action in the program
    pub action: usize,

    /// Short description like "MoveL p10"
    pub description: String,

    /// Range of the samples of this segment in the PathResult sequences
    pub samples: Range<usize>,

    /// TCP curve from the previous state to the target
    pub curve: Polyline,

    /// Tool used by this movement
    pub tool: Tool,

    pub speed: Option<SpeedData>,
    pub zone: Option<ZoneData>,
}

/// Result of the path generation. All sequences except segments and warnings are parallel,
/// one entry per sample.
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    /// TCP plane of every sample
    pub planes: Vec<Pose>,
    pub robot_axis_values: Vec<AxisValues>,
    pub external_axis_values: Vec<AxisValues>,
    pub flags: Vec<SampleFlags>,

    pub segments: Vec<PathSegment>,
    pub warnings: Vec<PathWarning>,

    /// True if no sample has axis values outside the limits
    pub in_limits: bool,
}

/// Generates the path through the robot program
pub struct PathGenerator<'a> {
    pub fk: ForwardKinematics<'a>,

    /// Allowed distance between the target and the TCP from the supplied axis values, mm
    pub position_tolerance: f64,

    /// Allowed angle between the target and the TCP from the supplied axis values, degrees
    pub orientation_tolerance: f64,
}

/// Interpreter state carried from action to action
struct State {
    robot: AxisValues,
    external: AxisValues,
    tool: Tool,
    work_object: WorkObject,
}

/// Target axis values of the movement
struct Resolved {
    robot: AxisValues,
    external: AxisValues,
    unresolved: bool,
}

/// Limits of the model, computed once per run
struct Limits {
    robot: Constraints,
    external: Constraints,
}

impl<'a> PathGenerator<'a> {
    pub fn new(model: &'a KinematicModel) -> Self {
        PathGenerator {
            fk: ForwardKinematics::new(model),
            position_tolerance: DEFAULT_POSITION_TOLERANCE,
            orientation_tolerance: DEFAULT_ORIENTATION_TOLERANCE,
        }
    }

    /// Walks the actions and builds the path.
    ///
    /// # Arguments
    ///
    /// * `actions` - the robot program
    /// * `interpolations` - number of intermediate samples per movement; each movement produces
    ///   `interpolations + 1` samples, the last one is exactly the target. Values above
    ///   [`MAX_INTERPOLATIONS`] are reduced to it.
    ///
    /// # Returns
    ///
    /// The path, or `KinematicsError::DimensionMismatch` if some action supplies the wrong
    /// number of robot axis values. No partial result is returned.
    pub fn calculate(&self, actions: &[Action], interpolations: usize) -> Result<PathResult, KinematicsError> {
        let interpolations = interpolations.min(MAX_INTERPOLATIONS);
        let model = self.fk.model;
        let limits = Limits {
            robot: model.constraints(),
            external: model.external_constraints(),
        };
        let mut state = State {
            robot: model.home_axis_values(),
            external: model.home_external_axis_values(),
            tool: model.tool.clone(),
            work_object: WorkObject::world(),
        };
        let initial = self.fk.chain(&state.robot, &state.external, &state.tool)?;
        let mut result = PathResult::empty();

        for (index, action) in actions.iter().enumerate() {
            match action {
                Action::Movement(movement) => {
                    self.movement(index, movement, &mut state, interpolations, &limits, &mut result)?;
                }
                Action::RelativeJointMovement(relative) => {
                    self.relative_movement(index, relative, &mut state, interpolations, &limits, &mut result)?;
                }
                Action::OverrideRobotTool(tool) => {
                    debug!("Action {}: tool {} is now active", index, tool.name);
                    state.tool = tool.clone();
                }
                Action::OverrideWorkObject(work_object) => {
                    debug!("Action {}: work object {} is now active", index, work_object.name);
                    state.work_object = work_object.clone();
                }
                Action::DigitalOutput { .. } | Action::WaitTime(_) | Action::Comment(_) => {
                    trace!("Action {}: passed through", index);
                }
            }
        }

        if result.planes.is_empty() {
            let flags = if initial.in_limits {
                SampleFlags::INITIAL
            } else {
                SampleFlags::INITIAL | SampleFlags::OUT_OF_LIMITS
            };
            result.push_sample(&initial, flags);
        }

        result.in_limits = result.flags.iter().all(|f| !f.contains(SampleFlags::OUT_OF_LIMITS));
        debug!("Path of {} samples, {} segments, {} warnings",
            result.len(), result.segments.len(), result.warnings.len());
        Ok(result)
    }

    fn movement(&self, index: usize, movement: &Movement, state: &mut State, interpolations: usize,
                limits: &Limits, result: &mut PathResult) -> Result<(), KinematicsError> {
        let tool = movement.tool.as_ref().unwrap_or(&state.tool).clone();
        let work_object = movement.work_object.as_ref().unwrap_or(&state.work_object).clone();
        let resolved = self.resolve(index, movement, state, &tool, &work_object, &mut result.warnings)?;

        let mut flags = match movement.movement_type {
            MovementType::Linear => SampleFlags::LINEAR,
            MovementType::AbsoluteJoint | MovementType::Joint => SampleFlags::JOINT,
        };
        if resolved.unresolved {
            flags |= SampleFlags::UNRESOLVED;
        }
        let straight = movement.movement_type == MovementType::Linear && !resolved.unresolved;

        let description = match movement.target_name() {
            "" => format!("{}", movement.movement_type),
            name => format!("{} {}", movement.movement_type, name),
        };
        let segment = PathSegment {
            action: index,
            description,
            samples: 0..0,
            curve: Polyline::default(),
            tool,
            speed: Some(movement.speed.clone()),
            zone: Some(movement.zone.clone()),
        };
        self.emit(index, state, resolved, flags, straight, interpolations, limits, segment, result)
    }

    fn relative_movement(&self, index: usize, relative: &RelativeJointMovement, state: &mut State,
                         interpolations: usize, limits: &Limits, result: &mut PathResult)
                         -> Result<(), KinematicsError> {
        if relative.robot_axis_deltas.len() != state.robot.len() {
            return Err(KinematicsError::dimension_mismatch(
                "relative robot axis deltas", state.robot.len(), relative.robot_axis_deltas.len()));
        }
        let robot = state.robot
            .iter()
            .zip(&relative.robot_axis_deltas)
            .map(|(value, delta)| value + delta)
            .collect();
        let external = match &relative.external_axis_deltas {
            Some(deltas) => state.external
                .iter()
                .zip(fit_to_length(deltas, state.external.len()))
                .map(|(value, delta)| value + delta)
                .collect(),
            None => state.external.clone(),
        };

        let segment = PathSegment {
            action: index,
            description: "relative joint movement".to_string(),
            samples: 0..0,
            curve: Polyline::default(),
            tool: state.tool.clone(),
            speed: None,
            zone: None,
        };
        let resolved = Resolved { robot, external, unresolved: false };
        self.emit(index, state, resolved, SampleFlags::JOINT, false, interpolations, limits, segment, result)
    }

    /// Finds the target axis values of the movement.
    fn resolve(&self, index: usize, movement: &Movement, state: &State, tool: &Tool,
               work_object: &WorkObject, warnings: &mut Vec<PathWarning>) -> Result<Resolved, KinematicsError> {
        let model = self.fk.model;
        let external_target = |values: &Option<AxisValues>| match values {
            Some(values) => fit_to_length(values, model.external_axis_count()),
            None => state.external.clone(),
        };

        match &movement.target {
            Target::Joint(target) => {
                self.check_robot_values("joint target axis values", &target.robot_axis_values)?;
                Ok(Resolved {
                    robot: target.robot_axis_values.clone(),
                    external: external_target(&target.external_axis_values),
                    unresolved: false,
                })
            }
            Target::Robot(target) => match &target.axis_values {
                Some(axis_values) => {
                    self.check_robot_values("robot target axis values", axis_values)?;
                    let external = external_target(&target.external_axis_values);
                    let frame = self.work_object_frame(index, work_object, &external, warnings);
                    let expected = frame * target.plane;
                    let reached = self.fk.chain(axis_values, &external, tool)?;
                    let (distance, angle) = plane_deviation(&reached.tcp, &expected);
                    if distance > self.position_tolerance || angle > self.orientation_tolerance {
                        debug!("Action {}: target {} is {:.3} mm, {:.3} deg away from the TCP",
                            index, target.name, distance, angle);
                        warnings.push(PathWarning::TargetMismatch {
                            action: index,
                            target: target.name.clone(),
                            distance,
                            angle,
                        });
                    }
                    Ok(Resolved { robot: axis_values.clone(), external, unresolved: false })
                }
                None => {
                    debug!("Action {}: target {} has no axis values, holding position", index, target.name);
                    warnings.push(PathWarning::UnresolvedTarget {
                        action: index,
                        target: target.name.clone(),
                    });
                    Ok(Resolved {
                        robot: state.robot.clone(),
                        external: state.external.clone(),
                        unresolved: true,
                    })
                }
            },
        }
    }

    fn check_robot_values(&self, what: &str, values: &[f64]) -> Result<(), KinematicsError> {
        let expected = self.fk.model.axis_count();
        if values.len() != expected {
            return Err(KinematicsError::dimension_mismatch(what, expected, values.len()));
        }
        Ok(())
    }

    /// Frame of the work object, moved by its coordinated external axis if there is one.
    fn work_object_frame(&self, index: usize, work_object: &WorkObject, external: &[f64],
                         warnings: &mut Vec<PathWarning>) -> Pose {
        let model = self.fk.model;
        let Some(axis_name) = &work_object.coordinated_axis else {
            return work_object.frame();
        };
        match model.external_axis_index(axis_name) {
            Some(i) => work_object.frame_moved_by(&model.external_axes[i].transform(external[i])),
            None => {
                warnings.push(PathWarning::UnknownExternalAxis {
                    action: index,
                    work_object: work_object.name.clone(),
                    axis: axis_name.clone(),
                });
                work_object.frame()
            }
        }
    }

    /// Interpolates from the current state to the target, appends the samples, the segment and
    /// the limit warnings, and moves the state to the target.
    #[allow(clippy::too_many_arguments)]
    fn emit(&self, index: usize, state: &mut State, target: Resolved, flags: SampleFlags, straight: bool,
            interpolations: usize, limits: &Limits, mut segment: PathSegment, result: &mut PathResult)
            -> Result<(), KinematicsError> {
        let count = interpolations.saturating_add(1);
        let start = self.fk.chain(&state.robot, &state.external, &segment.tool)?;
        let robot_samples = interpolate(&state.robot, &target.robot, count)?;
        let external_samples = interpolate(&state.external, &target.external, count)?;

        let first = result.len();
        let mut reported_robot = vec![false; limits.robot.len()];
        let mut reported_external = vec![false; limits.external.len()];
        let mut last_tcp = start.tcp;

        for (k, (robot, external)) in robot_samples.iter().zip(&external_samples).enumerate() {
            let chain = self.fk.chain(robot, external, &segment.tool)?;
            let mut sample_flags = flags | if k + 1 == count {
                SampleFlags::TARGET
            } else {
                SampleFlags::INTERPOLATED
            };
            if !chain.in_limits {
                sample_flags |= SampleFlags::OUT_OF_LIMITS;
                for (axis, violation) in limits.robot.violations(robot) {
                    if !reported_robot[axis] {
                        reported_robot[axis] = true;
                        result.warnings.push(PathWarning::AxisLimitExceeded {
                            action: index,
                            axis: AxisRef::Robot(axis),
                            violation,
                        });
                    }
                }
                for (axis, violation) in limits.external.violations(external) {
                    if !reported_external[axis] {
                        reported_external[axis] = true;
                        result.warnings.push(PathWarning::AxisLimitExceeded {
                            action: index,
                            axis: AxisRef::External(axis, self.fk.model.external_axes[axis].name().to_string()),
                            violation,
                        });
                    }
                }
            }
            last_tcp = chain.tcp;
            result.push_sample(&chain, sample_flags);
        }

        let origin = |plane: &Pose| Point3::from(plane.translation.vector);
        segment.curve = if straight {
            Polyline::new((0..=count)
                .map(|k| origin(&interpolate_plane(&start.tcp, &last_tcp, k as f64 / count as f64)))
                .collect())
        } else {
            Polyline::new(once(origin(&start.tcp))
                .chain(result.planes[first..].iter().map(origin))
                .collect())
        };
        segment.samples = first..result.len();
        trace!("Action {}: {} samples, curve length {:.2} mm", index, count, segment.curve.length());
        result.segments.push(segment);

        state.robot = target.robot;
        state.external = target.external;
        Ok(())
    }
}

impl PathResult {
    fn empty() -> Self {
        PathResult {
            planes: Vec::new(),
            robot_axis_values: Vec::new(),
            external_axis_values: Vec::new(),
            flags: Vec::new(),
            segments: Vec::new(),
            warnings: Vec::new(),
            in_limits: true,
        }
    }

    fn push_sample(&mut self, chain: &ChainFrames, flags: SampleFlags) {
        self.planes.push(chain.tcp);
        self.robot_axis_values.push(chain.robot_axis_values.clone());
        self.external_axis_values.push(chain.external_axis_values.clone());
        self.flags.push(flags);
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// TCP curves, one per motion segment
    pub fn curves(&self) -> impl Iterator<Item = &Polyline> {
        self.segments.iter().map(|segment| &segment.curve)
    }

    /// Segment that produced the given sample (None for the initial sample)
    pub fn segment_of(&self, sample: usize) -> Option<&PathSegment> {
        self.segments.iter().find(|segment| segment.samples.contains(&sample))
    }

    /// Warnings as text
    pub fn error_text(&self) -> Vec<String> {
        self.warnings.iter().map(|w| w.to_string()).collect()
    }
}

impl fmt::Display for AxisRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisRef::Robot(i) => write!(f, "robot axis {}", i + 1),
            AxisRef::External(i, name) => write!(f, "external axis {} ({})", i + 1, name),
        }
    }
}

impl fmt::Display for PathWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathWarning::UnresolvedTarget { action, target } =>
                write!(f, "Action {}: target '{}' has no axis values, the robot holds its position",
                       action, target),
            PathWarning::AxisLimitExceeded { action, axis, violation } =>
                write!(f, "Action {}: {} {}", action, axis, violation),
            PathWarning::TargetMismatch { action, target, distance, angle } =>
                write!(f, "Action {}: axis values of target '{}' reach {:.2} mm and {:.2} deg away from it",
                       action, target, distance, angle),
            PathWarning::UnknownExternalAxis { action, work_object, axis } =>
                write!(f, "Action {}: work object '{}' is coordinated with unknown external axis '{}'",
                       action, work_object, axis),
        }
    }
}
