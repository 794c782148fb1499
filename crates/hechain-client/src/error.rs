use std::path::PathBuf;

use thiserror::Error;

use hechain_core::error::HechainError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Chain(#[from] HechainError),

    #[error("client config belongs to chain {got:?}, expected {expected:?}")]
    ChainMismatch { expected: String, got: String },

    #[error("client config already exists at {} (use --force to overwrite)", .0.display())]
    ConfigExists(PathBuf),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed client config at {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}
