use std::sync::Arc;
use nalgebra::Isometry3;
use parry3d::shape::TriMesh;
use crate::constraints::Constraints;
use crate::kinematic_traits::{AxisValues, ExternalAxis, Pose};
use crate::link::Link;
use crate::tool::Tool;

/// Static description of the robot: the chain of links together with the base plane, the
/// mounting frame (flange), the default tool and the external axes. The model is built once
/// and treated as immutable for the duration of any computation, so it can be shared
/// between threads.
pub struct KinematicModel {
    pub name: String,

    /// Where the robot is installed in the cell (world coordinates).
    pub base_plane: Pose,

    /// Flange of the last link in the robot base coordinate system, robot at home.
    pub mounting_frame: Pose,

    /// Tool used when no tool override is active.
    pub tool: Tool,

    /// Chain of links, in order from the base to the flange.
    pub links: Vec<Link>,

    /// External axes, in the order of the external axis values.
    pub external_axes: Vec<Arc<dyn ExternalAxis>>,

    /// Static robot base mesh in the robot base coordinate system.
    pub base_mesh: Option<TriMesh>,

    /// Declared home configuration. If not set, all axes are at zero.
    pub home: Option<AxisValues>,
}

impl KinematicModel {
    /// Constructs a new robot model without tool (`tool0`), external axes and meshes.
    /// This method consumes the links, moving them inside the robot.
    /// This is important for meshes that are bulky.
    ///
    /// # Parameters
    ///
    /// * `name` - Name of the robot
    /// * `base_plane` - The transform bringing the robot into its intended location inside the robotic cell.
    /// * `mounting_frame` - Flange frame in the robot base coordinate system with all axes at zero.
    /// * `links` - Links of the chain, the axis definitions are in the robot base coordinate system.
    pub fn new(name: &str, base_plane: Pose, mounting_frame: Pose, links: Vec<Link>) -> Self {
        KinematicModel {
            name: name.to_string(),
            base_plane,
            mounting_frame,
            tool: Tool::default(),
            links,
            external_axes: Vec::new(),
            base_mesh: None,
            home: None,
        }
    }

    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tool = tool;
        self
    }

    pub fn with_external_axis(mut self, axis: Arc<dyn ExternalAxis>) -> Self {
        self.external_axes.push(axis);
        self
    }

    pub fn with_base_mesh(mut self, mesh: TriMesh) -> Self {
        self.base_mesh = Some(mesh);
        self
    }

    pub fn with_home(mut self, home: AxisValues) -> Self {
        self.home = Some(home);
        self
    }

    /// Robot with the base at the world origin.
    pub fn at_origin(name: &str, mounting_frame: Pose, links: Vec<Link>) -> Self {
        Self::new(name, Isometry3::identity(), mounting_frame, links)
    }

    pub fn axis_count(&self) -> usize {
        self.links.len()
    }

    pub fn external_axis_count(&self) -> usize {
        self.external_axes.len()
    }

    /// Home configuration of the robot axes: declared home if it matches the number of links,
    /// all zeros otherwise.
    pub fn home_axis_values(&self) -> AxisValues {
        match &self.home {
            Some(home) if home.len() == self.links.len() => home.clone(),
            _ => vec![0.0; self.links.len()],
        }
    }

    pub fn home_external_axis_values(&self) -> AxisValues {
        vec![0.0; self.external_axes.len()]
    }

    pub fn constraints(&self) -> Constraints {
        Constraints::new(self.links.iter().map(|link| link.limits).collect())
    }

    pub fn external_constraints(&self) -> Constraints {
        Constraints::new(self.external_axes.iter().map(|axis| axis.limits()).collect())
    }

    /// Index of the external axis with the given name
    pub fn external_axis_index(&self, name: &str) -> Option<usize> {
        self.external_axes.iter().position(|axis| axis.name() == name)
    }
}
