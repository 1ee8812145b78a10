//! Error types for fragment composition and parsing.

use thiserror::Error;

use crate::clause::ClauseSlot;

/// Errors raised while assembling or rendering a statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpliceError {
    /// The requested clause slot holds no fragment.
    #[error("section {0} not found")]
    SectionNotFound(ClauseSlot),

    /// Rendering was requested before any section was set.
    #[error("no section provided yet")]
    NoSection,

    /// The statement has more placeholders than supplied parameters.
    #[error("too few parameters provided: expected {expected}, got {provided}")]
    TooFewParameters {
        /// Number of placeholders found.
        expected: usize,
        /// Number of parameters supplied.
        provided: usize,
    },

    /// The statement has fewer placeholders than supplied parameters.
    #[error("too many parameters provided: expected {expected}, got {provided}")]
    TooManyParameters {
        /// Number of placeholders found.
        expected: usize,
        /// Number of parameters supplied.
        provided: usize,
    },

    /// The parser rejected the statement.
    #[error("parsing failed with {message}")]
    Parse {
        /// Parser specific status code.
        code: u32,
        /// Textual status.
        message: String,
    },

    /// A marker does not address a single-byte placeholder in its chunk.
    #[error("marker at offset {offset} is outside of the {slot} chunk")]
    MarkerOutOfBounds {
        /// Slot whose chunk was being rendered.
        slot: ClauseSlot,
        /// Offset of the marker, relative to the unrendered chunk.
        offset: usize,
    },
}

impl SpliceError {
    /// Creates a parse failure.
    #[must_use]
    pub fn parse(code: u32, message: impl Into<String>) -> Self {
        Self::Parse {
            code,
            message: message.into(),
        }
    }
}

/// Result type alias for composition and parsing operations.
pub type Result<T> = std::result::Result<T, SpliceError>;
