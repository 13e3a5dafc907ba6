//! Error types for the storyboard editor.

use thiserror::Error;

use crate::generation::GenerationError;

/// Result type alias for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur while editing a storyboard.
#[derive(Error, Debug)]
pub enum EditorError {
    /// Scene input rejected before any request was built.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A generation request is already in flight.
    #[error("A scene is already being generated")]
    Busy,

    /// The remote image generator failed.
    #[error("Generation failed: {0}")]
    Remote(#[from] GenerationError),

    /// Index out of bounds for list operations.
    #[error("Index {index} out of bounds for storyboard of length {length}")]
    IndexOutOfBounds { index: usize, length: usize },

    /// Resolution outside 480..=1080 or off the 120 step.
    #[error("Invalid resolution {0}: expected 480..=1080 in steps of 120")]
    InvalidResolution(u32),

    /// Unknown style or aspect ratio value.
    #[error("Invalid {kind}: {value}")]
    InvalidOption { kind: &'static str, value: String },

    /// A completion was applied for a ticket that does not match the pending request.
    #[error("No generation is pending for ticket {0}")]
    UnknownTicket(String),

    /// Export could not be written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EditorError {
    /// Creates a Validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates an IndexOutOfBounds error.
    pub fn index_out_of_bounds(index: usize, length: usize) -> Self {
        Self::IndexOutOfBounds { index, length }
    }

    /// Creates an InvalidOption error.
    pub fn invalid_option(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidOption {
            kind,
            value: value.into(),
        }
    }

    /// Creates an UnknownTicket error.
    pub fn unknown_ticket(ticket: impl Into<String>) -> Self {
        Self::UnknownTicket(ticket.into())
    }
}
