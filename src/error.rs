//! Library error types.
use std::path::PathBuf;

/// Fatal failures. Anything surfacing as a `GenError` aborts the run before
/// artifacts are written.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("failed to parse schema ({path}): {message}")]
    Schema { path: String, message: String },

    #[error("failed to parse config ({path}): {message}")]
    Config { path: String, message: String },

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("glob pattern error: {0}")]
    Glob(String),

    #[error("node kind `{kind}` lists builder field `{field}` which has no field definition")]
    MissingField { kind: String, field: String },

    #[error("node kind `{kind}` is defined in both {first} and {second}")]
    DuplicateNodeKind { kind: String, first: String, second: String },

    #[error("`{0}` is not a valid identifier")]
    InvalidIdentifier(String),

    #[error("generated artifacts are out of date: {}", .0.join(", "))]
    Stale(Vec<String>),
}

impl GenError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io { path: path.into(), source }
    }
}

pub type Result<T, E = GenError> = std::result::Result<T, E>;
