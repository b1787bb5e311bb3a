//! Error handling for the robot cell and program loaders

use std::io;

/// Unified error to report failures while reading the robot cell, the program and the meshes.
#[derive(Debug)]
pub enum ParameterError {
    IoError(io::Error),
    ParseError(String),
    MissingField(String),
    InvalidLength { expected: usize, found: usize },
    MeshError(String),
}

impl std::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ParameterError::IoError(ref err) =>
                write!(f, "IO Error: {}", err),
            ParameterError::ParseError(ref msg) =>
                write!(f, "Parse Error: {}", msg),
            ParameterError::MissingField(ref field) =>
                write!(f, "Missing Field: {}", field),
            ParameterError::InvalidLength { expected, found } =>
                write!(f, "Invalid Length: expected {}, found {}", expected, found),
            ParameterError::MeshError(ref msg) =>
                write!(f, "Mesh Error: {}", msg),
        }
    }
}

impl std::error::Error for ParameterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParameterError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ParameterError {
    fn from(err: io::Error) -> Self {
        ParameterError::IoError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ParameterError::InvalidLength { expected: 3, found: 2 };
        assert_eq!(err.to_string(), "Invalid Length: expected 3, found 2");
        let err: ParameterError = io::Error::new(io::ErrorKind::NotFound, "cell.yaml").into();
        assert!(err.to_string().starts_with("IO Error"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
