use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodemodError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Pattern set not found: {0:?} is neither a built-in set nor a readable file")]
    PatternSetNotFound(String),

    #[error("Invalid pattern set {name:?}: {reason}")]
    InvalidPatternSet { name: String, reason: String },

    #[error("Unknown suffix tag: {0:?}")]
    UnknownSuffix(String),

    #[error("Failed to walk source directory: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Pattern compilation failed: {0}")]
    Regex(#[from] regex::Error),
}

impl CodemodError {
    /// Wrap an I/O error for `path`, mapping `NotFound` to its own variant
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            CodemodError::NotFound(path)
        } else {
            CodemodError::Io { path, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, CodemodError>;
