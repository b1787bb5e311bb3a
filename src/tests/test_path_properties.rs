#[cfg(test)]
mod tests {
    use nalgebra::{Isometry3, Point3, Vector3};
    use crate::actions::{Action, Movement, MovementType, RelativeJointMovement, SpeedData, ZoneData};
    use crate::annotations::SampleFlags;
    use crate::constraints::AxisLimit;
    use crate::forward_kinematics::ForwardKinematics;
    use crate::interpolator::interpolate;
    use crate::kinematic_model::KinematicModel;
    use crate::kinematics_error::KinematicsError;
    use crate::link::Link;
    use crate::path_generator::{PathGenerator, PathWarning};
    use crate::tests::test_utils::{assert_point, single_axis_robot};
    use crate::tool::Tool;
    use crate::utils::plane_at;

    /// Six axis arm with the spherical wrist, dimensions of the small industrial robot.
    fn six_axis_robot() -> KinematicModel {
        let limit = |min: f64, max: f64| AxisLimit::new(min, max);
        KinematicModel::at_origin(
            "six axes",
            plane_at(374.0, 0.0, 630.0),
            vec![
                Link::rotational("J1", Vector3::z(), plane_at(0.0, 0.0, 0.0), limit(-165.0, 165.0)),
                Link::rotational("J2", Vector3::y(), plane_at(0.0, 0.0, 290.0), limit(-110.0, 110.0)),
                Link::rotational("J3", Vector3::y(), plane_at(0.0, 0.0, 560.0), limit(-110.0, 70.0)),
                Link::rotational("J4", Vector3::x(), plane_at(302.0, 0.0, 630.0), limit(-160.0, 160.0)),
                Link::rotational("J5", Vector3::y(), plane_at(302.0, 0.0, 630.0), limit(-120.0, 120.0)),
                Link::rotational("J6", Vector3::x(), plane_at(302.0, 0.0, 630.0), limit(-400.0, 400.0)),
            ],
        )
    }

    fn origin(plane: &Isometry3<f64>) -> Point3<f64> {
        Point3::from(plane.translation.vector)
    }

    #[test]
    fn test_wrist_geometry() {
        let robot = six_axis_robot();
        let fk = ForwardKinematics::new(&robot);

        let home = fk.calculate(&[0.0; 6], &[]).expect("Must compute");
        assert_point(&origin(home.tcp()), &Point3::new(374.0, 0.0, 630.0), 1E-9);

        // J4 and J6 rotate about the line through the flange, the flange point stays in place
        let twisted = fk.calculate(&[0.0, 0.0, 0.0, 90.0, 0.0, -90.0], &[]).expect("Must compute");
        assert_point(&origin(twisted.tcp()), &Point3::new(374.0, 0.0, 630.0), 1E-9);
        assert!(twisted.tcp().rotation.angle_to(&home.tcp().rotation) < 1E-9);

        // J5 bends the wrist down
        let bent = fk.calculate(&[0.0, 0.0, 0.0, 0.0, 90.0, 0.0], &[]).expect("Must compute");
        assert_point(&origin(bent.tcp()), &Point3::new(302.0, 0.0, 558.0), 1E-9);
    }

    #[test]
    fn test_in_domain_values_are_in_limits() {
        let robot = six_axis_robot();
        let fk = ForwardKinematics::new(&robot);
        let limits = robot.constraints().limits;
        for step in 0..=10 {
            let t = step as f64 / 10.0;
            let values: Vec<f64> = limits.iter().map(|l| l.min + t * (l.max - l.min)).collect();
            let posed = fk.calculate(&values, &[]).expect("Must compute");
            assert!(posed.in_limits(), "Values {:?} must be in limits", values);
        }
    }

    #[test]
    fn test_out_of_domain_value_still_posed() {
        let robot = six_axis_robot();
        let fk = ForwardKinematics::new(&robot);
        for axis in 0..6 {
            for beyond in [-1000.0, 1000.0] {
                let mut values = vec![0.0; 6];
                values[axis] = beyond;
                let posed = fk.calculate(&values, &[]).expect("Pose must be produced");
                assert!(!posed.in_limits(), "Axis {} at {} must be out of limits", axis, beyond);
                assert_eq!(posed.chain.link_motions.len(), 6);
            }
        }
    }

    #[test]
    fn test_mismatched_length_gives_no_pose() {
        let robot = six_axis_robot();
        let fk = ForwardKinematics::new(&robot);
        for length in [0, 5, 7] {
            match fk.calculate(&vec![0.0; length], &[]) {
                Err(KinematicsError::DimensionMismatch { expected: 6, found, .. }) => assert_eq!(found, length),
                Err(other) => panic!("Dimension mismatch expected, got {}", other),
                Ok(_) => panic!("No pose expected for {} values", length),
            }
        }
    }

    #[test]
    fn test_interpolation_ends_exactly_at_target() {
        let from = [0.0, -12.5, 33.3, 0.1, 90.0, -179.9];
        let to = [165.0, 110.0, -110.0, 1.0 / 3.0, -120.0, 400.0];
        assert_eq!(interpolate(&from, &to, 1).expect("Same length"), vec![to.to_vec()]);
        let samples = interpolate(&from, &to, 17).expect("Same length");
        assert_eq!(samples.len(), 17);
        assert_eq!(samples[16], to.to_vec());
    }

    #[test]
    fn test_complete_program() {
        let robot = six_axis_robot();
        let generator = PathGenerator::new(&robot);
        let pen = Tool::new("pen", Isometry3::translation(0.0, 0.0, 120.0));

        // Cartesian targets carry axis values that reach them with the pen
        let p10_values = vec![10.0, 20.0, -10.0, 0.0, 80.0, 0.0];
        let p20_values = vec![-10.0, 20.0, -10.0, 0.0, 80.0, 0.0];
        let p10 = generator.fk.chain(&p10_values, &[], &pen).expect("Must compute").tcp;
        let p20 = generator.fk.chain(&p20_values, &[], &pen).expect("Must compute").tcp;

        let program = vec![
            Action::Comment("draw a line".to_string()),
            Action::Movement(Movement::absolute_joint(vec![0.0, 0.0, 0.0, 0.0, 30.0, 0.0], None)
                .with_speed(SpeedData::predefined(1000.0))),
            Action::OverrideRobotTool(pen.clone()),
            Action::Movement(Movement::cartesian(MovementType::Joint, p10, Some(p10_values.clone()))
                .with_zone(ZoneData::predefined(10.0))),
            Action::DigitalOutput { name: "DO_PEN".to_string(), value: true },
            Action::Movement(Movement::cartesian(MovementType::Linear, p20, Some(p20_values.clone()))
                .with_speed(SpeedData::predefined(200.0))),
            Action::WaitTime(0.5),
            Action::RelativeJointMovement(RelativeJointMovement {
                robot_axis_deltas: vec![0.0, -20.0, 0.0, 0.0, 0.0, 0.0],
                external_axis_deltas: None,
            }),
        ];

        let interpolations = 9;
        let result = generator.calculate(&program, interpolations).expect("Must generate");
        assert!(result.warnings.is_empty(), "{:?}", result.error_text());
        assert!(result.in_limits);
        assert_eq!(result.segments.len(), 4);
        assert_eq!(result.curves().count(), 4);
        assert_eq!(result.len(), 4 * (interpolations + 1));
        assert_eq!(result.flags.len(), result.len());
        assert_eq!(result.robot_axis_values.len(), result.len());
        assert_eq!(result.external_axis_values.len(), result.len());

        // Targets are reached exactly, with the tool active at that time
        let actions: Vec<usize> = result.segments.iter().map(|s| s.action).collect();
        assert_eq!(actions, vec![1, 3, 5, 7]);
        assert_eq!(result.robot_axis_values[2 * (interpolations + 1) - 1], p10_values);
        assert!((result.planes[2 * (interpolations + 1) - 1].translation.vector - p10.translation.vector).norm() < 1E-9);
        assert_eq!(result.robot_axis_values[3 * (interpolations + 1) - 1], p20_values);
        assert_eq!(result.segments[0].tool.name, "tool0");
        assert_eq!(result.segments[1].tool.name, "pen");
        assert_eq!(result.segments[0].speed.as_ref().map(|s| s.name.as_str()), Some("v1000"));
        assert_eq!(result.segments[1].zone.as_ref().map(|z| z.name.as_str()), Some("z10"));

        // Linear movement draws the straight line between the targets
        let line = &result.segments[2].curve;
        assert!(line.max_deviation_from_chord() < 1E-9);
        assert!((line.length() - (p20.translation.vector - p10.translation.vector).norm()).abs() < 1E-9);
        assert!(result.flags[3 * (interpolations + 1) - 1].contains(SampleFlags::LINEAR | SampleFlags::TARGET));

        // Joint movement does not in general
        assert!(result.segments[1].curve.max_deviation_from_chord() > 1.0);

        let relative_end = result.robot_axis_values.last().expect("Not empty");
        assert_eq!(relative_end, &vec![-10.0, 0.0, -10.0, 0.0, 80.0, 0.0]);

        assert_eq!(generator.calculate(&program, interpolations).expect("Must generate"), result);
    }

    #[test]
    fn test_movement_tool_applies_once() {
        let robot = single_axis_robot();
        let long = Tool::new("long", Isometry3::translation(100.0, 0.0, 0.0));
        let program = vec![
            Action::Movement(Movement::absolute_joint(vec![90.0], None).with_tool(long)),
            Action::Movement(Movement::absolute_joint(vec![0.0], None)),
        ];
        let result = PathGenerator::new(&robot).calculate(&program, 0).expect("Must generate");
        assert_point(&origin(&result.planes[0]), &Point3::new(0.0, 200.0, 0.0), 1E-9);
        assert_point(&origin(&result.planes[1]), &Point3::new(100.0, 0.0, 0.0), 1E-9);
    }

    #[test]
    fn test_limit_warning_once_per_axis_and_segment() {
        let robot = six_axis_robot();
        let program = vec![
            Action::Movement(Movement::absolute_joint(vec![200.0, 0.0, 100.0, 0.0, 0.0, 0.0], None)),
            Action::Movement(Movement::absolute_joint(vec![0.0, 0.0, -200.0, 0.0, 0.0, 0.0], None)),
        ];
        let result = PathGenerator::new(&robot).calculate(&program, 4).expect("Must generate");
        // First movement: axis 3 passes its maximum at 80 before axis 1 reaches 200.
        // Second movement: axis 1 is back in limits from the first sample, axis 3 goes below minimum.
        let offending: Vec<(usize, String)> = result.warnings.iter().map(|w| match w {
            PathWarning::AxisLimitExceeded { action, axis, .. } => (*action, axis.to_string()),
            other => panic!("Only limit warnings expected, got {}", other),
        }).collect();
        assert_eq!(offending, vec![
            (0, "robot axis 3".to_string()),
            (0, "robot axis 1".to_string()),
            (1, "robot axis 3".to_string()),
        ]);
        assert!(!result.in_limits);
    }
}
