//! Error types for the fusion engine
//!
//! Transient absence (no frame this tick) and out-of-range mappings are
//! never errors. They surface as `false` or as sentinel coordinates.

use thiserror::Error;

use crate::{FrameSourceTypes, Size};

/// Core Kinetic errors
#[derive(Error, Debug)]
pub enum KineticError {
    // Buffer errors
    #[error("Shape mismatch for {stream:?}: buffer is {expected}, frame is {actual}")]
    ShapeMismatch {
        stream: FrameSourceTypes,
        expected: Size,
        actual: Size,
    },

    #[error("Frame data too short: expected {expected}, got {actual}")]
    FrameTooShort { expected: usize, actual: usize },

    // Mapping errors
    #[error("Length mismatch: input has {input} elements, output has {output}")]
    LengthMismatch { input: usize, output: usize },

    // Session errors
    #[error("Engine is not streaming")]
    NotStreaming,

    #[error("Configuration violation: {0}")]
    ConfigViolation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Kinetic operations
pub type KineticResult<T> = Result<T, KineticError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message() {
        let err = KineticError::ShapeMismatch {
            stream: FrameSourceTypes::DEPTH,
            expected: Size::new(512, 424),
            actual: Size::new(640, 480),
        };
        let msg = err.to_string();
        assert!(msg.contains("512x424"));
        assert!(msg.contains("640x480"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: KineticError = io.into();
        assert!(matches!(err, KineticError::Io(_)));
    }
}
