//! Error types for the backlight controller

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for the backlight controller
pub type Result<T> = std::result::Result<T, BacklightError>;

/// Main error type for the backlight controller
#[derive(Error, Debug)]
pub enum BacklightError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {}: {content:?} is not a brightness value", path.display())]
    Parse { path: PathBuf, content: String },

    #[error("{} reports a maximum brightness of 0", path.display())]
    InvalidMax { path: PathBuf },

    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BacklightError {
    /// True for failures that happened while reading device state.
    pub fn is_read_error(&self) -> bool {
        matches!(
            self,
            Self::Read { .. } | Self::Parse { .. } | Self::InvalidMax { .. }
        )
    }

    pub fn is_write_error(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}
