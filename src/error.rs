//! Error types for readflow library.

use std::io;
use thiserror::Error;

/// Result type alias for readflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing reading structure.
///
/// Empty or degenerate input is never an error: it produces empty or
/// identity results. The `Index*` and `Paragraph*` variants report broken
/// invariants in the produced stream and indicate a bug in the heuristics.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Word stream could not be decoded or encoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A source record cannot be used at all.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Two output words carry the same index.
    #[error("Duplicate word index {0} in output")]
    IndexDuplicate(usize),

    /// Output indices are not contiguous from zero.
    #[error("Word index gap: expected {expected}, found {found}")]
    IndexGap {
        /// Index that should have been present
        expected: usize,
        /// Index actually found at that position
        found: usize,
    },

    /// A paragraph does not have exactly one start and one end marker.
    #[error("Paragraph {id} has {starts} start and {ends} end markers")]
    ParagraphMarkers {
        /// Paragraph id
        id: usize,
        /// Number of words flagged as paragraph start
        starts: usize,
        /// Number of words flagged as paragraph end
        ends: usize,
    },

    /// Paragraph ids are not consecutive in reading order.
    #[error("Paragraph id sequence broken: expected {expected}, found {found}")]
    ParagraphSequence {
        /// Id that should come next
        expected: usize,
        /// Id actually found
        found: usize,
    },

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Whether this error reports a broken output invariant.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Error::IndexDuplicate(_)
                | Error::IndexGap { .. }
                | Error::ParagraphMarkers { .. }
                | Error::ParagraphSequence { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::IndexDuplicate(4);
        assert_eq!(err.to_string(), "Duplicate word index 4 in output");

        let err = Error::IndexGap {
            expected: 3,
            found: 5,
        };
        assert_eq!(err.to_string(), "Word index gap: expected 3, found 5");

        let err = Error::ParagraphMarkers {
            id: 2,
            starts: 0,
            ends: 1,
        };
        assert_eq!(
            err.to_string(),
            "Paragraph 2 has 0 start and 1 end markers"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_invariant_violation());
    }

    #[test]
    fn test_invariant_classification() {
        assert!(Error::IndexDuplicate(0).is_invariant_violation());
        assert!(Error::ParagraphSequence {
            expected: 1,
            found: 2
        }
        .is_invariant_violation());
        assert!(!Error::InvalidInput("page 0".into()).is_invariant_violation());
    }
}
