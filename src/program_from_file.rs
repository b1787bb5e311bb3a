//! Supports reading the robot program (list of actions) from the YAML file.
//!
//! ```yaml
//! actions:
//!   - comment: approach
//!   - override_tool: { name: pen, tcp: { origin: [0, 0, 100] } }
//!   - override_work_object: { name: table, user_frame: { origin: [500, 0, 200] } }
//!   - move_abs_j: { name: home, robot: [0, 0, 0, 0, 30, 0], speed: v1000, zone: fine }
//!   - move_j: { name: p10, plane: { origin: [0, 0, 50] }, axis_values: [0, 10, 20, 0, 60, 0], zone: z10 }
//!   - move_l: { name: p20, plane: { origin: [100, 0, 50] } }
//!   - move_rel_j: { robot: [0, 0, 0, 0, 0, 90] }
//!   - digital_output: { name: DO_PEN, value: true }
//!   - wait: 0.5
//! ```
//! Movements may carry their own `tool` and `work_object` that apply to that movement only,
//! and `external` axis values. Speed is `vN` or a map with `v_tcp`, `v_ori`, `v_leax`, `v_reax`;
//! zone is `fine`, `zN` or a map with `p_tcp` and `p_ori`.

use std::path::Path;
use nalgebra::Isometry3;
use regex::Regex;
use tracing::{debug, warn};
use yaml_rust2::Yaml;
use crate::actions::{Action, JointTarget, Movement, MovementType, RelativeJointMovement, RobotTarget,
                     SpeedData, Target, ZoneData};
use crate::model_from_file::{load_document, optional_f64, optional_str, optional_values, read_plane,
                             read_tool, read_work_object, required_str, required_values};
use crate::parameter_error::ParameterError;

/// Read the program from the YAML file. See the module documentation for the format.
pub fn actions_from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Vec<Action>, ParameterError> {
    let contents = std::fs::read_to_string(path)?;
    actions_from_yaml_str(&contents)
}

pub fn actions_from_yaml_str(contents: &str) -> Result<Vec<Action>, ParameterError> {
    let doc = load_document(contents)?;
    let items = doc["actions"].as_vec()
        .ok_or_else(|| ParameterError::MissingField("actions".to_string()))?;
    let actions = items.iter()
        .enumerate()
        .map(|(i, item)| read_action(item, i))
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Program of {} actions, {} motions", actions.len(), actions.iter().filter(|a| a.is_motion()).count());
    Ok(actions)
}

fn read_action(yaml: &Yaml, index: usize) -> Result<Action, ParameterError> {
    let field = format!("actions[{}]", index);
    let hash = yaml.as_hash()
        .ok_or_else(|| ParameterError::ParseError(format!("{}: map expected", field)))?;
    if hash.len() != 1 {
        return Err(ParameterError::ParseError(format!("{}: exactly one action per entry expected", field)));
    }
    let Some((key, value)) = hash.iter().next() else {
        return Err(ParameterError::ParseError(format!("{}: empty action", field)));
    };
    let kind = key.as_str()
        .ok_or_else(|| ParameterError::ParseError(format!("{}: action name expected", field)))?;
    let field = format!("{}.{}", field, kind);

    match kind {
        "move_abs_j" => {
            let target = Target::Joint(JointTarget {
                name: optional_str(&value["name"]).unwrap_or_default().to_string(),
                robot_axis_values: required_values(&value["robot"], &format!("{}.robot", field))?,
                external_axis_values: optional_values(&value["external"], &format!("{}.external", field))?,
            });
            read_movement(value, &field, MovementType::AbsoluteJoint, target)
        }
        "move_j" | "move_l" => {
            let target = Target::Robot(RobotTarget {
                name: optional_str(&value["name"]).unwrap_or_default().to_string(),
                plane: read_plane(&value["plane"], &format!("{}.plane", field))?,
                axis_values: optional_values(&value["axis_values"], &format!("{}.axis_values", field))?,
                external_axis_values: optional_values(&value["external"], &format!("{}.external", field))?,
            });
            let movement_type = if kind == "move_l" { MovementType::Linear } else { MovementType::Joint };
            read_movement(value, &field, movement_type, target)
        }
        "move_rel_j" => Ok(Action::RelativeJointMovement(RelativeJointMovement {
            robot_axis_deltas: required_values(&value["robot"], &format!("{}.robot", field))?,
            external_axis_deltas: optional_values(&value["external"], &format!("{}.external", field))?,
        })),
        "override_tool" => Ok(Action::OverrideRobotTool(read_tool(value, &field, None)?)),
        "override_work_object" => Ok(Action::OverrideWorkObject(read_work_object(value, &field)?)),
        "digital_output" => Ok(Action::DigitalOutput {
            name: required_str(&value["name"], &format!("{}.name", field))?.to_string(),
            value: value["value"].as_bool()
                .ok_or_else(|| ParameterError::MissingField(format!("{}.value", field)))?,
        }),
        "wait" => Ok(Action::WaitTime(optional_f64(value, &field)?
            .ok_or_else(|| ParameterError::MissingField(field.clone()))?)),
        "comment" => Ok(Action::Comment(optional_str(value).unwrap_or_default().to_string())),
        other => Err(ParameterError::ParseError(format!("actions[{}]: unknown action '{}'", index, other))),
    }
}

fn read_movement(yaml: &Yaml, field: &str, movement_type: MovementType, target: Target)
                 -> Result<Action, ParameterError> {
    let mut movement = match movement_type {
        MovementType::AbsoluteJoint => Movement::absolute_joint(Vec::new(), None),
        _ => Movement::cartesian(movement_type, Isometry3::identity(), None),
    };
    movement.target = target;

    if !yaml["speed"].is_badvalue() {
        movement = movement.with_speed(read_speed(&yaml["speed"], &format!("{}.speed", field))?);
    }
    if !yaml["zone"].is_badvalue() {
        movement = movement.with_zone(read_zone(&yaml["zone"], &format!("{}.zone", field))?);
    }
    if !yaml["tool"].is_badvalue() {
        movement = movement.with_tool(read_tool(&yaml["tool"], &format!("{}.tool", field), None)?);
    }
    if !yaml["work_object"].is_badvalue() {
        movement = movement.with_work_object(read_work_object(&yaml["work_object"], &format!("{}.work_object", field))?);
    }
    Ok(Action::Movement(movement))
}

fn read_speed(yaml: &Yaml, field: &str) -> Result<SpeedData, ParameterError> {
    if let Some(name) = yaml.as_str() {
        let re = Regex::new(r"^v(\d+(\.\d+)?)$")
            .map_err(|_| ParameterError::ParseError("Invalid regex pattern".to_string()))?;
        let caps = re.captures(name)
            .ok_or_else(|| ParameterError::ParseError(format!("{}: unknown speed data '{}'", field, name)))?;
        let v_tcp: f64 = caps[1].parse()
            .map_err(|_| ParameterError::ParseError(format!("{}: bad speed '{}'", field, name)))?;
        return Ok(SpeedData::predefined(v_tcp));
    }

    let number = |key: &str| -> Result<Option<f64>, ParameterError> {
        optional_f64(&yaml[key], &format!("{}.{}", field, key))
    };
    let v_tcp = number("v_tcp")?.ok_or_else(|| ParameterError::MissingField(format!("{}.v_tcp", field)))?;
    let default = SpeedData::predefined(v_tcp);
    let name = optional_str(&yaml["name"]).unwrap_or(default.name.as_str()).to_string();
    Ok(SpeedData {
        name,
        v_tcp,
        v_ori: number("v_ori")?.unwrap_or(default.v_ori),
        v_leax: number("v_leax")?.unwrap_or(default.v_leax),
        v_reax: number("v_reax")?.unwrap_or(default.v_reax),
    })
}

fn read_zone(yaml: &Yaml, field: &str) -> Result<ZoneData, ParameterError> {
    if let Some(name) = yaml.as_str() {
        if name == "fine" {
            return Ok(ZoneData::fine());
        }
        let re = Regex::new(r"^z(\d+(\.\d+)?)$")
            .map_err(|_| ParameterError::ParseError("Invalid regex pattern".to_string()))?;
        let caps = re.captures(name)
            .ok_or_else(|| ParameterError::ParseError(format!("{}: unknown zone data '{}'", field, name)))?;
        let p_tcp: f64 = caps[1].parse()
            .map_err(|_| ParameterError::ParseError(format!("{}: bad zone '{}'", field, name)))?;
        return Ok(ZoneData::predefined(p_tcp));
    }

    let p_tcp = optional_f64(&yaml["p_tcp"], &format!("{}.p_tcp", field))?
        .ok_or_else(|| ParameterError::MissingField(format!("{}.p_tcp", field)))?;
    let mut zone = ZoneData::predefined(p_tcp);
    if let Some(p_ori) = optional_f64(&yaml["p_ori"], &format!("{}.p_ori", field))? {
        if p_ori < p_tcp {
            warn!("{}: reorientation zone {} is smaller than the path zone {}", field, p_ori, p_tcp);
        }
        zone.p_ori = p_ori;
    }
    if let Some(name) = optional_str(&yaml["name"]) {
        zone.name = name.to_string();
    }
    Ok(zone)
}
