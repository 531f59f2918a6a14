use crate::{
    domain::BoardConfig,
    error::{BoardError, Result},
};
use async_trait::async_trait;

#[cfg(feature = "file-config")]
pub mod file_source;

/// Where board configurations come from
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Loads the board configuration
    async fn load(&self) -> Result<BoardConfig>;

    /// Checks whether a configuration is available to load
    async fn is_available(&self) -> bool;
}

impl BoardConfig {
    /// Parses a configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BoardError::ConfigError(e.to_string()))
    }

    /// Serializes the configuration as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
