//! Document error types
//!
//! Errors raised while reading or writing s72 files.

use std::fmt;
use std::io;

/// Error loading a document
#[derive(Debug)]
pub enum DocumentLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid JSON, missing format tag, malformed record)
    Parse(serde_json::Error),
}

impl From<io::Error> for DocumentLoadError {
    fn from(e: io::Error) -> Self {
        DocumentLoadError::Io(e)
    }
}

impl From<serde_json::Error> for DocumentLoadError {
    fn from(e: serde_json::Error) -> Self {
        DocumentLoadError::Parse(e)
    }
}

impl fmt::Display for DocumentLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentLoadError::Io(e) => write!(f, "IO error: {}", e),
            DocumentLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for DocumentLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentLoadError::Io(e) => Some(e),
            DocumentLoadError::Parse(e) => Some(e),
        }
    }
}

/// Error saving a document
#[derive(Debug)]
pub enum DocumentSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(serde_json::Error),
}

impl From<io::Error> for DocumentSaveError {
    fn from(e: io::Error) -> Self {
        DocumentSaveError::Io(e)
    }
}

impl From<serde_json::Error> for DocumentSaveError {
    fn from(e: serde_json::Error) -> Self {
        // Write failures surface through the serializer once the buffer fills
        if e.is_io() {
            DocumentSaveError::Io(e.into())
        } else {
            DocumentSaveError::Serialize(e)
        }
    }
}

impl fmt::Display for DocumentSaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSaveError::Io(e) => write!(f, "IO error: {}", e),
            DocumentSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for DocumentSaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentSaveError::Io(e) => Some(e),
            DocumentSaveError::Serialize(e) => Some(e),
        }
    }
}
