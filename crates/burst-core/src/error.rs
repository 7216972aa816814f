/// Core error types for the Burst pipeline.
use std::path::PathBuf;

/// A specialized Result type for Burst operations.
pub type BurstResult<T> = Result<T, BurstError>;

/// Top-level error type encompassing all Burst subsystems.
#[derive(Debug, thiserror::Error)]
pub enum BurstError {
    #[error("image load error: {message} ({path:?})")]
    ImageLoad { message: String, path: PathBuf },

    #[error("encode error: {0}")]
    Encode(String),

    #[error("resize error: {0}")]
    Resize(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("export cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BurstError {
    /// Create an image load error.
    pub fn image_load(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        BurstError::ImageLoad {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Create an encode error naming the output path.
    pub fn encode(message: impl std::fmt::Display, path: &std::path::Path) -> Self {
        BurstError::Encode(format!("{} ({})", message, path.display()))
    }
}
