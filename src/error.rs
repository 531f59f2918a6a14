use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Wrapper for board not found: {0}")]
    WrapperNotFound(String),

    #[error("Invalid column count: {found} (at least one column is required)")]
    InvalidColumnCount { found: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BoardError {
    /// True for failures raised while building a board from its configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::WrapperNotFound(_)
                | Self::InvalidColumnCount { .. }
                | Self::ConfigError(_)
                | Self::SerializationError(_)
        )
    }
}
