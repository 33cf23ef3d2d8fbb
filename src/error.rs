// File: src/error.rs
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenderError>;

/// Failures while building or restoring the name tables.
/// Resolution itself never fails: a miss is `None`.
#[derive(Error, Debug)]
pub enum GenderError {
    /// A source file could not be opened or read.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file is structurally broken.
    #[error("malformed {} at line {line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// The global dictionary is not valid JSON of the expected shape.
    #[error("invalid name dictionary {}: {source}", path.display())]
    Dictionary {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The data configuration file could not be parsed.
    #[error("invalid data configuration: {0}")]
    Config(String),

    /// A compiled snapshot could not be encoded or decoded.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}

impl GenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenderError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        GenderError::Malformed {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }
}
