#[cfg(test)]
mod tests {
    use nalgebra::{Point3, Vector3};
    use crate::actions::{Action, MovementType, Target};
    use crate::kinematic_model::KinematicModel;
    use crate::parameter_error::ParameterError;
    use crate::path_generator::{PathGenerator, PathWarning};
    use crate::preview::{preview_frame, PreviewOptions};
    use crate::program_from_file::actions_from_yaml_file;
    use crate::tests::test_utils::assert_point;

    const CELL: &str = "src/tests/data/cell.yaml";
    const PROGRAM: &str = "src/tests/data/program.yaml";
    const READ_ERROR: &str = "Failed to load the file";

    #[test]
    fn test_cell_from_yaml() {
        let robot = KinematicModel::from_yaml_file(CELL).expect(READ_ERROR);
        assert_eq!(robot.name, "planar arm");
        assert_eq!(robot.axis_count(), 2);
        assert_eq!(robot.links[1].name, "shoulder");
        assert_eq!(robot.links[1].limits.max, 120.0);
        assert!(robot.links.iter().all(|link| link.mesh.is_some()));
        assert!(robot.base_mesh.is_some());
        assert_eq!(robot.home_axis_values(), vec![0.0, 0.0]);

        assert_eq!(robot.tool.name, "pen");
        assert_eq!(robot.tool.tcp.translation.vector, Vector3::new(0.0, 0.0, 100.0));
        let mesh = robot.tool.mesh.as_ref().expect("Tool has mesh");
        // Scaled from meters to millimeters
        assert!(mesh.vertices().iter().any(|v| (v - Point3::new(100.0, 0.0, 0.0)).norm() < 1E-3));

        assert_eq!(robot.external_axis_count(), 1);
        let track = &robot.external_axes[0];
        assert_eq!(track.name(), "track");
        assert!(track.carries_robot());
        assert!(track.body().base.is_some());
        assert_eq!(track.body().links.len(), 1);
    }

    #[test]
    fn test_program_from_yaml() {
        let actions = actions_from_yaml_file(PROGRAM).expect(READ_ERROR);
        assert_eq!(actions.len(), 11);
        assert!(matches!(&actions[0], Action::Comment(text) if text == "go home first"));
        assert!(matches!(&actions[4], Action::DigitalOutput { name, value: true } if name == "DO_PEN"));
        assert!(matches!(actions[8], Action::WaitTime(t) if t == 0.5));
        assert!(matches!(&actions[9], Action::OverrideRobotTool(tool) if tool.name == "long pen"));

        let Action::Movement(p10) = &actions[3] else {
            panic!("Movement expected, got {:?}", actions[3]);
        };
        assert_eq!(p10.movement_type, MovementType::Joint);
        assert_eq!(p10.target_name(), "p10");
        assert_eq!(p10.speed.v_tcp, 250.0);
        assert_eq!(p10.speed.v_ori, 100.0);
        assert_eq!(p10.zone.name, "z5");
        match &p10.target {
            Target::Robot(target) => {
                assert_eq!(target.axis_values, Some(vec![90.0, 0.0]));
                assert!((target.plane.rotation * Vector3::x() - Vector3::y()).norm() < 1E-9);
            }
            other => panic!("Robot target expected, got {:?}", other),
        }

        let Action::Movement(p20) = &actions[5] else {
            panic!("Movement expected, got {:?}", actions[5]);
        };
        assert_eq!(p20.movement_type, MovementType::Linear);
        assert!(p20.zone.fine);
    }

    #[test]
    fn test_path_of_loaded_program() {
        let robot = KinematicModel::from_yaml_file(CELL).expect(READ_ERROR);
        let actions = actions_from_yaml_file(PROGRAM).expect(READ_ERROR);
        let generator = PathGenerator::new(&robot);
        let interpolations = 4;
        let result = generator.calculate(&actions, interpolations).expect("Must generate");

        assert_eq!(result.segments.len(), 6);
        assert_eq!(result.len(), 6 * (interpolations + 1));
        assert!(result.in_limits);
        assert_eq!(result.warnings, vec![PathWarning::UnresolvedTarget { action: 5, target: "p20".to_string() }]);

        // After "ready" the pen is on the track at 1000 with the waist turned by 90 degrees
        assert_point(&Point3::from(result.planes[2 * (interpolations + 1) - 1].translation.vector),
                     &Point3::new(1000.0, 300.0, 500.0), 1E-9);

        // Relative movement moved the track by 500, the last movement uses the long pen
        let last = result.len() - 1;
        assert_eq!(result.external_axis_values[last], vec![1500.0]);
        assert_point(&Point3::from(result.planes[last].translation.vector),
                     &Point3::new(1800.0, 0.0, 600.0), 1E-9);

        let frame = preview_frame(&generator.fk, &result, 1.0, &PreviewOptions::default())
            .expect("Must preview");
        let posed = frame.robot.expect("Mesh preview is on");
        assert!(posed.tool.is_none(), "Overriding tool has no mesh");
        assert!(posed.joints.iter().all(|joint| joint.is_some()));
        assert_eq!(posed.external[0].len(), 2);
        assert_eq!(frame.messages.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(KinematicModel::from_yaml_file("src/tests/data/no_such_cell.yaml"),
            Err(ParameterError::IoError(_))));
        assert!(matches!(actions_from_yaml_file("src/tests/data/no_such_program.yaml"),
            Err(ParameterError::IoError(_))));
    }
}
