use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use rs_robot_actions::annotations::SampleFlags;
use rs_robot_actions::kinematic_model::KinematicModel;
use rs_robot_actions::path_generator::PathGenerator;
use rs_robot_actions::preview::{preview_frame, PreviewOptions};
use rs_robot_actions::program_from_file::actions_from_yaml_file;
use rs_robot_actions::utils::{format_axis_values, format_plane};

/// Previews the path of the robot program: forward kinematics for every interpolated sample,
/// segment summary and warnings.
#[derive(Parser, Debug)]
#[command(author, version, name = "rs-robot-actions")]
struct CommandLineArguments {
    /// Robot cell YAML (robot, tool, external axes)
    #[arg(long)]
    robot: PathBuf,

    /// Program YAML (list of actions)
    #[arg(long)]
    program: PathBuf,

    /// Intermediate samples per movement
    #[arg(long, default_value_t = 5)]
    interpolations: usize,

    /// Maximal number of warnings to print
    #[arg(long, default_value_t = 8)]
    max_messages: usize,

    /// Slider position in [0, 1] of the sample to pose and print
    #[arg(long)]
    sample: Option<f64>,

    /// Print every sample, not only the segment summary
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rs_robot_actions=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CommandLineArguments::parse();

    let robot = KinematicModel::from_yaml_file(&args.robot)
        .with_context(|| format!("Cannot read robot cell {}", args.robot.display()))?;
    let actions = actions_from_yaml_file(&args.program)
        .with_context(|| format!("Cannot read program {}", args.program.display()))?;
    tracing::info!("Robot {}, program of {} actions", robot.name, actions.len());

    let generator = PathGenerator::new(&robot);
    let result = generator.calculate(&actions, args.interpolations)
        .context("Path generation failed")?;

    println!("{} samples, {} segments, {}", result.len(), result.segments.len(),
             if result.in_limits { "all in limits" } else { "OUT OF LIMITS" });
    for segment in &result.segments {
        println!("Action {:3}: {:24} tool {:10} {:6} samples, TCP travel {:9.2} mm",
                 segment.action, segment.description, segment.tool.name,
                 segment.samples.len(), segment.curve.length());
    }

    if args.verbose {
        for (i, plane) in result.planes.iter().enumerate() {
            println!("{:5} {} {} [{}]", i, format_axis_values(&result.robot_axis_values[i]),
                     format_plane(plane), result.flags[i]);
        }
    }

    let options = PreviewOptions { max_messages: args.max_messages, ..PreviewOptions::default() };
    let frame = preview_frame(&generator.fk, &result, args.sample.unwrap_or(1.0), &options)
        .context("Preview failed")?;
    for message in &frame.messages {
        println!("Warning: {}", message);
    }
    if result.warnings.len() > frame.messages.len() {
        println!("... and {} more warnings", result.warnings.len() - frame.messages.len());
    }

    if args.sample.is_some() {
        if let Some(posed) = &frame.robot {
            let flags = result.flags.get(frame.index).copied().unwrap_or(SampleFlags::NONE);
            println!("Sample {}: axes {}, external {}", frame.index,
                     format_axis_values(posed.robot_axis_values()),
                     format_axis_values(posed.external_axis_values()));
            println!("TCP {} [{}]{}", format_plane(posed.tcp()), flags,
                     if posed.in_limits() { "" } else { " out of limits" });
        }
    }
    Ok(())
}
