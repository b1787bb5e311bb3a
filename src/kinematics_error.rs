//! Structural errors of forward kinematics, interpolation and path generation.
//! Non-fatal problems (axis limits, unresolved targets) are not errors, they are
//! collected as warnings of the path.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// A value vector has the wrong length where strict matching is required.
    /// `what` names the offending input (robot axis values, interpolation input, etc).
    DimensionMismatch { what: String, expected: usize, found: usize },
}

impl KinematicsError {
    pub(crate) fn dimension_mismatch(what: &str, expected: usize, found: usize) -> Self {
        KinematicsError::DimensionMismatch { what: what.to_string(), expected, found }
    }
}

impl fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            KinematicsError::DimensionMismatch { ref what, expected, found } =>
                write!(f, "Dimension mismatch in {}: expected {}, found {}", what, expected, found),
        }
    }
}

impl std::error::Error for KinematicsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message() {
        let error = KinematicsError::dimension_mismatch("robot axis values", 6, 5);
        assert_eq!(format!("{}", error),
                   "Dimension mismatch in robot axis values: expected 6, found 5");
    }
}
