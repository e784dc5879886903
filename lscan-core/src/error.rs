//! Error types for lscan

use thiserror::Error;

/// Main error type for lscan operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Triangulation of face {face} failed: {message}")]
    Triangulation { face: usize, message: String },

    #[error("Cancelled during {stage}")]
    Cancelled { stage: &'static str },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),
}

impl Error {
    /// Index of the face that failed, for face-scoped errors
    pub fn face(&self) -> Option<usize> {
        match self {
            Error::Triangulation { face, .. } => Some(*face),
            _ => None,
        }
    }

    /// Re-tag a triangulation error with the face index used by the caller
    pub fn for_face(self, face: usize) -> Self {
        match self {
            Error::Triangulation { message, .. } => Error::Triangulation { face, message },
            Error::DegenerateInput(message)
            | Error::InvalidData(message)
            | Error::Algorithm(message) => Error::Triangulation { face, message },
            other => other,
        }
    }
}

/// Result type alias for lscan operations
pub type Result<T> = std::result::Result<T, Error>;
