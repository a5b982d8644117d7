//! Error types for the xlspot library.

use std::io;
use thiserror::Error;

/// Result type alias for xlspot operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while scanning a workbook.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading the archive or one of its members.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The path does not resolve to a readable ZIP container.
    #[error("Cannot open archive {path}: {reason}")]
    ArchiveNotFound { path: String, reason: String },

    /// A requested archive member does not exist.
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    /// An archive member is not well-formed XML, or carries values of the wrong shape.
    #[error("Malformed document {part}: {message}")]
    MalformedDocument { part: String, message: String },

    /// Error while rendering a report.
    #[error("Render error: {0}")]
    Render(String),
}

impl Error {
    /// Build a [`Error::MalformedDocument`] for the given archive member.
    pub fn malformed(part: &str, message: impl Into<String>) -> Self {
        Error::MalformedDocument {
            part: part.to_string(),
            message: message.into(),
        }
    }

    /// Whether this error only signals an absent archive member.
    pub fn is_missing_member(&self) -> bool {
        matches!(self, Error::MemberNotFound(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
