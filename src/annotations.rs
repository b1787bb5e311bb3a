use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Flags that are set on every sample of the generated path
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SampleFlags: u32 {
        const NONE = 0b0000_0000;

        /// The sample is the initial state of the program (robot at home, nothing else moved)
        const INITIAL =             0b0000_0001;

        /// The sample is the target of the action
        const TARGET =              0b0000_0010;

        /// The sample is a linear interpolation between the previous state and the target
        const INTERPOLATED =        0b0000_0100;

        /// Axis values change linearly (MoveAbsJ, MoveJ, relative joint movement)
        const JOINT =               0b0000_1000;

        /// The TCP is expected to move along the straight line (MoveL)
        const LINEAR =              0b0001_0000;

        /// The target axis values are not known, the robot holds its position
        const UNRESOLVED =          0b0010_0000;

        /// At least one axis value of this sample is out of limits
        const OUT_OF_LIMITS =       0b0100_0000;
    }
}

/// Human readable flag names, separated by " | "
pub fn flag_representation(flags: &SampleFlags) -> String {
    const FLAG_MAP: &[(SampleFlags, &str)] = &[
        (SampleFlags::INITIAL, "INITIAL"),
        (SampleFlags::TARGET, "TARGET"),
        (SampleFlags::INTERPOLATED, "INTERPOLATED"),
        (SampleFlags::JOINT, "JOINT"),
        (SampleFlags::LINEAR, "LINEAR"),
        (SampleFlags::UNRESOLVED, "UNRESOLVED"),
        (SampleFlags::OUT_OF_LIMITS, "OUT_OF_LIMITS"),
    ];

    FLAG_MAP
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(" | ")
}

impl fmt::Display for SampleFlags {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", flag_representation(self))
    }
}
