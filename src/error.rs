use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalloutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Vault directory not found: {}", .0.display())]
    VaultNotFound(PathBuf),

    #[error("Path has no parent directory: {}", .0.display())]
    NoParent(PathBuf),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CalloutError>;
