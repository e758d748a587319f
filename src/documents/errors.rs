// Standard library
use std::path::PathBuf;

// 3rd party crates
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode document: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to read document from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
