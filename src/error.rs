//! Error types for snapshotting and rendering the process tree.

use std::path::PathBuf;

/// Errors raised while reading, wiring or rendering a process snapshot.
#[derive(Debug, thiserror::Error)]
pub enum ProcTreeError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed status record {}: {line:?}", .path.display())]
    MalformedRecord { path: PathBuf, line: String },

    #[error("failed to enumerate {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize process tree: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProcTreeError>;

impl ProcTreeError {
    /// True when the underlying cause is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        match self {
            ProcTreeError::Io { source, .. } | ProcTreeError::Discovery { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}
