use std::path::PathBuf;
use thiserror::Error;

/// The main error type for mask2coco operations.
#[derive(Debug, Error)]
pub enum Mask2CocoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("Failed to parse configuration from {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Invalid mask: {reason}")]
    InvalidMask { reason: String },

    #[error("Failed to read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write image {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write COCO JSON to {path}: {source}")]
    CocoJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Source '{source_name}' cannot provide entry {index}: {message}")]
    SourceEntry {
        source_name: String,
        index: usize,
        message: String,
    },
}

impl Mask2CocoError {
    /// Shorthand for a configuration error.
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Mask2CocoError::Config {
            message: message.into(),
        }
    }

    /// Shorthand for an invalid mask error.
    pub(crate) fn invalid_mask(reason: impl Into<String>) -> Self {
        Mask2CocoError::InvalidMask {
            reason: reason.into(),
        }
    }
}
