use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SteerError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },

    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] serde_yaml_ng::Error),

    #[error("invalid failure pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, SteerError>;
