//! Actions that make up the robot program. Only the movements and the tool / work object
//! overrides influence the path, the other actions are passed through.

use std::fmt;
use crate::kinematic_traits::{AxisValues, Pose};
use crate::tool::{Tool, WorkObject};

/// Interpolation the robot controller uses to reach the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovementType {
    /// Joint movement to the absolute axis values (MoveAbsJ)
    AbsoluteJoint,
    /// Joint movement to the Cartesian target (MoveJ)
    Joint,
    /// Linear movement of the TCP to the Cartesian target (MoveL)
    Linear,
}

/// Target given directly with the axis values.
#[derive(Clone, Debug, PartialEq)]
pub struct JointTarget {
    pub name: String,
    pub robot_axis_values: AxisValues,
    /// External axis values, if not given the external axes do not move.
    pub external_axis_values: Option<AxisValues>,
}

/// Cartesian target: plane of the TCP in the work object coordinate system. There is no
/// inverse kinematics, so the axis values of the robot can only be obtained if they are
/// supplied with the target.
#[derive(Clone, Debug, PartialEq)]
pub struct RobotTarget {
    pub name: String,
    pub plane: Pose,
    pub axis_values: Option<AxisValues>,
    pub external_axis_values: Option<AxisValues>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Target {
    Joint(JointTarget),
    Robot(RobotTarget),
}

/// Speed data: TCP speed (mm/s), reorientation speed (deg/s), linear and rotational external
/// axis speeds (mm/s, deg/s).
#[derive(Clone, Debug, PartialEq)]
pub struct SpeedData {
    pub name: String,
    pub v_tcp: f64,
    pub v_ori: f64,
    pub v_leax: f64,
    pub v_reax: f64,
}

/// Zone data: how close the TCP must come to the target before moving on. Fine point means
/// the robot stops at the target.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneData {
    pub name: String,
    pub fine: bool,
    /// Zone size for the TCP path, mm
    pub p_tcp: f64,
    /// Zone size for the reorientation, mm
    pub p_ori: f64,
}

/// Movement to the target.
#[derive(Clone, Debug, PartialEq)]
pub struct Movement {
    pub movement_type: MovementType,
    pub target: Target,
    pub speed: SpeedData,
    pub zone: ZoneData,
    /// Tool used for this movement only. If not set, the active tool is used.
    pub tool: Option<Tool>,
    /// Work object used for this movement only. If not set, the active work object is used.
    pub work_object: Option<WorkObject>,
}

/// Movement by the given increments of the axis values.
#[derive(Clone, Debug, PartialEq)]
pub struct RelativeJointMovement {
    pub robot_axis_deltas: AxisValues,
    pub external_axis_deltas: Option<AxisValues>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Movement(Movement),
    RelativeJointMovement(RelativeJointMovement),
    /// Replaces the active tool for all following actions
    OverrideRobotTool(Tool),
    /// Replaces the active work object for all following actions
    OverrideWorkObject(WorkObject),
    DigitalOutput { name: String, value: bool },
    WaitTime(f64),
    Comment(String),
}

impl SpeedData {
    pub fn new(name: &str, v_tcp: f64, v_ori: f64, v_leax: f64, v_reax: f64) -> Self {
        SpeedData { name: name.to_string(), v_tcp, v_ori, v_leax, v_reax }
    }

    /// Predefined speed data with the given TCP speed (v5 ... v7000), other speeds as the
    /// controller defines them.
    pub fn predefined(v_tcp: f64) -> Self {
        SpeedData::new(&format!("v{}", v_tcp), v_tcp, 500.0, 5000.0, 1000.0)
    }
}

impl Default for SpeedData {
    fn default() -> Self {
        SpeedData::predefined(100.0)
    }
}

impl ZoneData {
    pub fn fine() -> Self {
        ZoneData { name: "fine".to_string(), fine: true, p_tcp: 0.0, p_ori: 0.0 }
    }

    /// Predefined zone data with the given path zone (z0 ... z200). The reorientation zone
    /// is 1.5 times larger, as for the controller predefined zones.
    pub fn predefined(p_tcp: f64) -> Self {
        ZoneData { name: format!("z{}", p_tcp), fine: false, p_tcp, p_ori: 1.5 * p_tcp }
    }
}

impl Default for ZoneData {
    fn default() -> Self {
        ZoneData::fine()
    }
}

impl Movement {
    /// Joint movement to the absolute axis values
    pub fn absolute_joint(robot_axis_values: AxisValues, external_axis_values: Option<AxisValues>) -> Self {
        Movement {
            movement_type: MovementType::AbsoluteJoint,
            target: Target::Joint(JointTarget {
                name: String::new(),
                robot_axis_values,
                external_axis_values,
            }),
            speed: SpeedData::default(),
            zone: ZoneData::default(),
            tool: None,
            work_object: None,
        }
    }

    /// Joint (MoveJ) or linear (MoveL) movement to the Cartesian target.
    pub fn cartesian(movement_type: MovementType, plane: Pose, axis_values: Option<AxisValues>) -> Self {
        Movement {
            movement_type,
            target: Target::Robot(RobotTarget {
                name: String::new(),
                plane,
                axis_values,
                external_axis_values: None,
            }),
            speed: SpeedData::default(),
            zone: ZoneData::default(),
            tool: None,
            work_object: None,
        }
    }

    pub fn with_speed(mut self, speed: SpeedData) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_zone(mut self, zone: ZoneData) -> Self {
        self.zone = zone;
        self
    }

    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tool = Some(tool);
        self
    }

    pub fn with_work_object(mut self, work_object: WorkObject) -> Self {
        self.work_object = Some(work_object);
        self
    }

    pub fn target_name(&self) -> &str {
        match &self.target {
            Target::Joint(target) => &target.name,
            Target::Robot(target) => &target.name,
        }
    }
}

impl Action {
    /// True for the actions that move the robot (and so produce path samples).
    pub fn is_motion(&self) -> bool {
        matches!(self, Action::Movement(_) | Action::RelativeJointMovement(_))
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MovementType::AbsoluteJoint => "MoveAbsJ",
            MovementType::Joint => "MoveJ",
            MovementType::Linear => "MoveL",
        };
        write!(f, "{}", name)
    }
}
