//! Error types for resume_layout.

use std::io;
use thiserror::Error;

/// Result type alias for resume_layout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing a resume.
///
/// Heuristic misses are never errors: a rule that does not fire, a section
/// without entries or a degenerate average all degrade to "no value". Only
/// input that cannot be read or has an impossible shape ends up here.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading fragment files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Fragment or configuration JSON could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A fragment carries geometry that cannot be laid out.
    #[error("Malformed fragment at index {index}: {reason}")]
    MalformedFragment {
        /// Position of the fragment in the input stream
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A configured rule or extraction pattern is not a valid regex.
    #[error("Invalid pattern for {name}: {source}")]
    InvalidPattern {
        /// Attribute or field the pattern belongs to
        name: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),
}
