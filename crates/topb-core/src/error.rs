//! Error types for topb generation

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for generation operations
pub type TopbResult<T> = Result<T, TopbError>;

/// Error type for generation operations
#[derive(Error, Debug)]
pub enum TopbError {
    /// Source file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source text is not valid Go
    #[error("{}:{line}:{column}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The Go grammar could not be loaded into the parser
    #[error("failed to load Go grammar: {0}")]
    Language(String),

    /// Struct embeds another type, which has no addressable field name
    #[error("type {type_name}: embedded field {field_type} cannot be copied by name")]
    EmbeddedField {
        type_name: String,
        field_type: String,
    },

    /// A conversion method was requested for a non-struct type
    #[error("type {type_name} is not a struct")]
    NotAStruct { type_name: String },

    /// Struct declares type parameters
    #[error("type {type_name}: generic structs are not supported")]
    GenericType { type_name: String },

    /// Eligible types were found but no wire package import path is known
    #[error("no wire package import path configured for {}", .path.display())]
    MissingWireImport { path: PathBuf },

    /// Output file could not be written
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stale output file could not be removed
    #[error("failed to remove {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed
    #[error("failed to scan {}: {message}", .path.display())]
    Walk { path: PathBuf, message: String },

    /// Configuration file is unreadable or invalid
    #[error("configuration error: {0}")]
    Config(String),
}

impl TopbError {
    /// File the error concerns, when there is one
    pub fn path(&self) -> Option<&Path> {
        match self {
            TopbError::Read { path, .. }
            | TopbError::Parse { path, .. }
            | TopbError::MissingWireImport { path }
            | TopbError::Write { path, .. }
            | TopbError::Remove { path, .. }
            | TopbError::Walk { path, .. } => Some(path.as_path()),
            _ => None,
        }
    }

    /// Whether this error was raised while loading an input (as opposed to
    /// generating or writing its output)
    pub fn is_load_error(&self) -> bool {
        matches!(self, TopbError::Read { .. } | TopbError::Parse { .. })
    }
}

impl From<walkdir::Error> for TopbError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(PathBuf::from).unwrap_or_default();
        TopbError::Walk {
            path,
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for TopbError {
    fn from(err: toml::de::Error) -> Self {
        TopbError::Config(err.to_string())
    }
}
