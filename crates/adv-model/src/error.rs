use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {source}")]
    ConfigParse {
        path: Option<PathBuf>,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
