//! Preview of a single moment of the generated path: the robot posed at the selected sample,
//! the TCP curves and the warnings to show.

use tracing::trace;
use crate::forward_kinematics::{ForwardKinematics, PositionedRobot};
use crate::kinematics_error::KinematicsError;
use crate::path_generator::PathResult;
use crate::polyline::Polyline;

/// What to include into the preview frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewOptions {
    /// Pose the robot at the selected sample
    pub preview_mesh: bool,

    /// Include TCP curves of all segments
    pub preview_curve: bool,

    /// Maximal number of warnings shown
    pub max_messages: usize,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        PreviewOptions {
            preview_mesh: true,
            preview_curve: true,
            max_messages: 8,
        }
    }
}

pub struct PreviewFrame<'a> {
    /// Index of the previewed sample
    pub index: usize,

    /// Robot posed at the sample, if mesh preview is on
    pub robot: Option<PositionedRobot<'a>>,

    pub curves: Vec<Polyline>,

    /// Warning texts, at most `max_messages` of them
    pub messages: Vec<String>,
}

/// Maps the slider position in [0, 1] to the sample index. Values outside the range are clamped.
pub fn sample_index(position: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let position = if position.is_nan() { 0.0 } else { position.clamp(0.0, 1.0) };
    ((position * (len - 1) as f64).round() as usize).min(len - 1)
}

/// Builds the preview of the path at the given slider position. Forward kinematics runs once,
/// with the tool that was active in the segment of the sample.
pub fn preview_frame<'a>(fk: &ForwardKinematics<'a>, result: &'a PathResult, position: f64,
                         options: &PreviewOptions) -> Result<PreviewFrame<'a>, KinematicsError> {
    let index = sample_index(position, result.len());
    trace!("Preview of sample {} of {}", index, result.len());

    let robot = if options.preview_mesh && !result.is_empty() {
        let tool = match result.segment_of(index) {
            Some(segment) => &segment.tool,
            None => &fk.model.tool,
        };
        Some(fk.calculate_with_tool(
            &result.robot_axis_values[index],
            &result.external_axis_values[index],
            tool,
        )?)
    } else {
        None
    };

    let curves = if options.preview_curve {
        result.curves().cloned().collect()
    } else {
        Vec::new()
    };

    let messages = result.error_text().into_iter().take(options.max_messages).collect();

    Ok(PreviewFrame { index, robot, curves, messages })
}
