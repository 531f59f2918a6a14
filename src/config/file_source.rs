use crate::{
    config::ConfigSource,
    domain::BoardConfig,
    error::{BoardError, Result},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Loads a board configuration from a JSON file
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    const DEFAULT_FILE: &'static str = "board.json";

    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Source reading `board.json` inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(Self::DEFAULT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigSource for FileConfigSource {
    async fn load(&self) -> Result<BoardConfig> {
        if !self.path.exists() {
            return Err(BoardError::ConfigError(format!(
                "Config file not found: {}",
                self.path.display()
            )));
        }

        let contents = fs::read_to_string(&self.path).await?;
        let config = BoardConfig::from_json(&contents)?;
        debug!(path = %self.path.display(), columns = config.columns.len(), "Loaded board config");
        Ok(config)
    }

    async fn is_available(&self) -> bool {
        fs::metadata(&self.path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }
}
