//! Supports reading the robot cell (robot, default tool, external axes and meshes) from the
//! YAML file. Mesh paths are relative to the directory of the YAML file.
//!
//! ```yaml
//! robot:
//!   name: IRB 120
//!   base_plane: { origin: [0, 0, 0] }
//!   mounting_frame: { origin: [374, 0, 630], x_axis: [0, 0, -1], y_axis: [0, 1, 0] }
//!   home: [0, 0, 0, 0, 30, 0]
//!   base_mesh: base.stl
//!   links:
//!     - name: J1
//!       kind: rotational
//!       axis: [0, 0, 1]
//!       attachment: { origin: [0, 0, 0] }
//!       limits: [-165, 165]
//!       mesh: link1.stl
//! tool:
//!   name: pen
//!   tcp: { origin: [0, 0, 100] }
//! external_axes:
//!   - name: track
//!     kind: linear
//!     axis: [1, 0, 0]
//!     attachment: { origin: [0, 0, 0] }
//!     limits: [0, 3000]
//!     carries_robot: true
//! mesh_scale: 1.0
//! ```
//! Planes are given by the origin and optionally the x axis and the direction in the plane
//! (y axis); missing axes default to the world ones.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use nalgebra::{Isometry3, Point3, Vector3};
use parry3d::shape::TriMesh;
use tracing::debug;
use yaml_rust2::{Yaml, YamlLoader};
use crate::constraints::AxisLimit;
use crate::external_axis::{AxisBody, LinearAxis, RotationalAxis};
use crate::kinematic_model::KinematicModel;
use crate::kinematic_traits::{ExternalAxis, Pose};
use crate::link::Link;
use crate::parameter_error::ParameterError;
use crate::read_trimesh::load_trimesh_from_stl;
use crate::tool::{Tool, WorkObject};
use crate::utils::{is_valid, plane_from_axes};

const AXIS_EPSILON: f64 = 1E-9;

impl KinematicModel {
    /// Read the robot cell from the YAML file. See the module documentation for the format.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::from_yaml_str(&contents, &directory)
    }

    /// Read the robot cell from the YAML text. Mesh paths are resolved against `mesh_directory`.
    pub fn from_yaml_str(contents: &str, mesh_directory: &Path) -> Result<Self, ParameterError> {
        let doc = load_document(contents)?;
        let meshes = MeshSource {
            directory: mesh_directory.to_path_buf(),
            scale: optional_f64(&doc["mesh_scale"], "mesh_scale")?.unwrap_or(1.0) as f32,
        };

        let robot = &doc["robot"];
        if robot.is_badvalue() {
            return Err(ParameterError::MissingField("robot".to_string()));
        }

        let name = optional_str(&robot["name"]).unwrap_or("robot");
        let base_plane = optional_plane(&robot["base_plane"], "robot.base_plane")?;
        let mounting_frame = optional_plane(&robot["mounting_frame"], "robot.mounting_frame")?;

        let links = required_vec(&robot["links"], "robot.links")?
            .iter()
            .enumerate()
            .map(|(i, link)| read_link(link, i, &meshes))
            .collect::<Result<Vec<_>, _>>()?;

        let mut model = KinematicModel::new(name, base_plane, mounting_frame, links);

        if let Some(home) = optional_values(&robot["home"], "robot.home")? {
            if home.len() != model.axis_count() {
                return Err(ParameterError::InvalidLength { expected: model.axis_count(), found: home.len() });
            }
            model = model.with_home(home);
        }

        if let Some(mesh) = meshes.optional(&robot["base_mesh"])? {
            model = model.with_base_mesh(mesh);
        }

        if !doc["tool"].is_badvalue() {
            model = model.with_tool(read_tool(&doc["tool"], "tool", Some(&meshes))?);
        }

        for (i, axis) in optional_vec(&doc["external_axes"], "external_axes")?.iter().enumerate() {
            model = model.with_external_axis(read_external_axis(axis, i, &meshes)?);
        }

        debug!("Robot {} with {} axes, {} external axes, tool {}",
            model.name, model.axis_count(), model.external_axis_count(), model.tool.name);
        Ok(model)
    }
}

/// Where to find the meshes and how to scale them
pub(crate) struct MeshSource {
    pub directory: PathBuf,
    pub scale: f32,
}

impl MeshSource {
    fn optional(&self, yaml: &Yaml) -> Result<Option<TriMesh>, ParameterError> {
        match yaml.as_str() {
            Some(file) => Ok(Some(load_trimesh_from_stl(self.directory.join(file), self.scale)?)),
            None => Ok(None),
        }
    }
}

pub(crate) fn load_document(contents: &str) -> Result<Yaml, ParameterError> {
    let docs = YamlLoader::load_from_str(contents)
        .map_err(|e| ParameterError::ParseError(format!("{}", e)))?;
    docs.into_iter()
        .next()
        .ok_or_else(|| ParameterError::ParseError("empty YAML document".to_string()))
}

fn read_link(yaml: &Yaml, index: usize, meshes: &MeshSource) -> Result<Link, ParameterError> {
    let field = |name: &str| format!("robot.links[{}].{}", index, name);
    let default_name = format!("J{}", index + 1);
    let name = optional_str(&yaml["name"]).unwrap_or(default_name.as_str());
    let axis = read_axis(&yaml["axis"], &field("axis"))?;
    let attachment = optional_plane(&yaml["attachment"], &field("attachment"))?;
    let limits = optional_limits(&yaml["limits"], &field("limits"))?;

    let link = match optional_str(&yaml["kind"]).unwrap_or("rotational") {
        "rotational" => Link::rotational(name, axis, attachment, limits),
        "prismatic" | "linear" => Link::prismatic(name, axis, attachment, limits),
        other => return Err(ParameterError::ParseError(
            format!("{}: unknown link kind '{}'", field("kind"), other))),
    };

    match meshes.optional(&yaml["mesh"])? {
        Some(mesh) => Ok(link.with_mesh(mesh)),
        None => Ok(link),
    }
}

fn read_external_axis(yaml: &Yaml, index: usize, meshes: &MeshSource)
                      -> Result<Arc<dyn ExternalAxis>, ParameterError> {
    let field = |name: &str| format!("external_axes[{}].{}", index, name);
    let name = required_str(&yaml["name"], &field("name"))?;
    let axis = read_axis(&yaml["axis"], &field("axis"))?;
    let attachment = optional_plane(&yaml["attachment"], &field("attachment"))?;
    let limits = optional_limits(&yaml["limits"], &field("limits"))?;
    let carries_robot = optional_bool(&yaml["carries_robot"], &field("carries_robot"))?.unwrap_or(false);

    let mut body = AxisBody { base: meshes.optional(&yaml["base_mesh"])?, links: Vec::new() };
    for (i, file) in optional_vec(&yaml["link_meshes"], &field("link_meshes"))?.iter().enumerate() {
        let file = file.as_str().ok_or_else(|| ParameterError::ParseError(
            format!("{}[{}]: file name expected", field("link_meshes"), i)))?;
        body.links.push(load_trimesh_from_stl(meshes.directory.join(file), meshes.scale)?);
    }

    let axis: Arc<dyn ExternalAxis> = match optional_str(&yaml["kind"]).unwrap_or("linear") {
        "linear" | "prismatic" => {
            let linear = LinearAxis::new(name, attachment, axis, limits).with_body(body);
            Arc::new(if carries_robot { linear.carrying_robot() } else { linear })
        }
        "rotational" => {
            let rotational = RotationalAxis::new(name, attachment, axis, limits).with_body(body);
            Arc::new(if carries_robot { rotational.carrying_robot() } else { rotational })
        }
        other => return Err(ParameterError::ParseError(
            format!("{}: unknown external axis kind '{}'", field("kind"), other))),
    };
    Ok(axis)
}

/// Tool: name, TCP plane and optional mesh (only where meshes can be loaded)
pub(crate) fn read_tool(yaml: &Yaml, field: &str, meshes: Option<&MeshSource>) -> Result<Tool, ParameterError> {
    let name = required_str(&yaml["name"], &format!("{}.name", field))?;
    let tcp = optional_plane(&yaml["tcp"], &format!("{}.tcp", field))?;
    let tool = Tool::new(name, tcp);
    match meshes {
        Some(meshes) => match meshes.optional(&yaml["mesh"])? {
            Some(mesh) => Ok(tool.with_mesh(mesh)),
            None => Ok(tool),
        },
        None => Ok(tool),
    }
}

pub(crate) fn read_work_object(yaml: &Yaml, field: &str) -> Result<WorkObject, ParameterError> {
    let name = required_str(&yaml["name"], &format!("{}.name", field))?;
    let user_frame = optional_plane(&yaml["user_frame"], &format!("{}.user_frame", field))?;
    let object_frame = optional_plane(&yaml["object_frame"], &format!("{}.object_frame", field))?;
    let work_object = WorkObject::new(name, user_frame).with_object_frame(object_frame);
    Ok(match optional_str(&yaml["coordinated_axis"]) {
        Some(axis) => work_object.coordinated_with(axis),
        None => work_object,
    })
}

/// Plane { origin, x_axis, y_axis }; identity if the field is absent.
pub(crate) fn optional_plane(yaml: &Yaml, field: &str) -> Result<Pose, ParameterError> {
    if yaml.is_badvalue() || yaml.is_null() {
        return Ok(Isometry3::identity());
    }
    read_plane(yaml, field)
}

pub(crate) fn read_plane(yaml: &Yaml, field: &str) -> Result<Pose, ParameterError> {
    if yaml.is_badvalue() {
        return Err(ParameterError::MissingField(field.to_string()));
    }
    let origin = read_vector(&yaml["origin"], &format!("{}.origin", field))?;
    let x_axis = optional_vector(&yaml["x_axis"], &format!("{}.x_axis", field))?.unwrap_or_else(Vector3::x);
    let y_axis = optional_vector(&yaml["y_axis"], &format!("{}.y_axis", field))?.unwrap_or_else(Vector3::y);
    plane_from_axes(Point3::from(origin), x_axis, y_axis)
        .ok_or_else(|| ParameterError::ParseError(format!("{}: degenerate plane axes", field)))
}

pub(crate) fn read_vector(yaml: &Yaml, field: &str) -> Result<Vector3<f64>, ParameterError> {
    optional_vector(yaml, field)?.ok_or_else(|| ParameterError::MissingField(field.to_string()))
}

/// Direction of the link or external axis motion, must not be zero.
fn read_axis(yaml: &Yaml, field: &str) -> Result<Vector3<f64>, ParameterError> {
    let axis = read_vector(yaml, field)?;
    if axis.norm() < AXIS_EPSILON {
        return Err(ParameterError::ParseError(format!("{}: zero-length axis", field)));
    }
    Ok(axis)
}

fn optional_vector(yaml: &Yaml, field: &str) -> Result<Option<Vector3<f64>>, ParameterError> {
    match optional_values(yaml, field)? {
        Some(values) if values.len() == 3 => Ok(Some(Vector3::new(values[0], values[1], values[2]))),
        Some(values) => Err(ParameterError::InvalidLength { expected: 3, found: values.len() }),
        None => Ok(None),
    }
}

fn optional_limits(yaml: &Yaml, field: &str) -> Result<AxisLimit, ParameterError> {
    match optional_values(yaml, field)? {
        Some(values) if values.len() == 2 => Ok(AxisLimit::new(values[0], values[1])),
        Some(values) => Err(ParameterError::InvalidLength { expected: 2, found: values.len() }),
        None => Ok(AxisLimit::unlimited()),
    }
}

/// List of numbers; None if the field is absent.
pub(crate) fn optional_values(yaml: &Yaml, field: &str) -> Result<Option<Vec<f64>>, ParameterError> {
    if yaml.is_badvalue() || yaml.is_null() {
        return Ok(None);
    }
    let items = yaml.as_vec()
        .ok_or_else(|| ParameterError::ParseError(format!("{}: list of numbers expected", field)))?;
    items.iter()
        .enumerate()
        .map(|(i, item)| number(item)
            .ok_or_else(|| ParameterError::ParseError(format!("{}[{}]: number expected", field, i))))
        .collect::<Result<Vec<_>, _>>()
        .and_then(|values| if is_valid(&values) {
            Ok(Some(values))
        } else {
            Err(ParameterError::ParseError(format!("{}: values must be finite", field)))
        })
}

pub(crate) fn required_values(yaml: &Yaml, field: &str) -> Result<Vec<f64>, ParameterError> {
    optional_values(yaml, field)?.ok_or_else(|| ParameterError::MissingField(field.to_string()))
}

pub(crate) fn optional_f64(yaml: &Yaml, field: &str) -> Result<Option<f64>, ParameterError> {
    if yaml.is_badvalue() || yaml.is_null() {
        return Ok(None);
    }
    number(yaml)
        .map(Some)
        .ok_or_else(|| ParameterError::ParseError(format!("{}: number expected", field)))
}

/// YAML distinguishes integers and reals, both are accepted as numbers.
fn number(yaml: &Yaml) -> Option<f64> {
    match yaml {
        Yaml::Integer(i) => Some(*i as f64),
        Yaml::Real(_) => yaml.as_f64(),
        _ => None,
    }
}

pub(crate) fn optional_str(yaml: &Yaml) -> Option<&str> {
    yaml.as_str()
}

pub(crate) fn required_str<'y>(yaml: &'y Yaml, field: &str) -> Result<&'y str, ParameterError> {
    yaml.as_str().ok_or_else(|| ParameterError::MissingField(field.to_string()))
}

fn optional_bool(yaml: &Yaml, field: &str) -> Result<Option<bool>, ParameterError> {
    if yaml.is_badvalue() || yaml.is_null() {
        return Ok(None);
    }
    yaml.as_bool()
        .map(Some)
        .ok_or_else(|| ParameterError::ParseError(format!("{}: true or false expected", field)))
}

/// List of entries; empty if the field is absent.
fn optional_vec<'y>(yaml: &'y Yaml, field: &str) -> Result<&'y [Yaml], ParameterError> {
    if yaml.is_badvalue() || yaml.is_null() {
        return Ok(&[]);
    }
    yaml.as_vec()
        .map(Vec::as_slice)
        .ok_or_else(|| ParameterError::ParseError(format!("{}: list expected", field)))
}

fn required_vec<'y>(yaml: &'y Yaml, field: &str) -> Result<&'y Vec<Yaml>, ParameterError> {
    yaml.as_vec().ok_or_else(|| ParameterError::MissingField(field.to_string()))
}
