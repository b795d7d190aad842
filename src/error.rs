//! Error types for cheapcart

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cheapcart operations
#[derive(Error, Debug)]
pub enum CheapcartError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Data directory not found: {path}")]
    DataDirNotFound { path: PathBuf },

    #[error("Failed to read catalog {path}: {message}")]
    CatalogFile { path: PathBuf, message: String },

    #[error("No store catalogs found in {0}")]
    NoCatalogs(PathBuf),

    #[error("Basket is empty")]
    EmptyBasket,

    #[error("Invalid basket entry: {0}")]
    InvalidBasketEntry(String),

    #[error("Similarity threshold must be between 0 and 1, got {0}")]
    InvalidThreshold(f64),

    #[error("Unknown similarity strategy: {0}")]
    UnknownStrategy(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for cheapcart operations
pub type Result<T> = std::result::Result<T, CheapcartError>;

impl CheapcartError {
    /// Create a catalog file error
    pub fn catalog_file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::CatalogFile {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a data directory not found error
    pub fn data_dir_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DataDirNotFound { path: path.into() }
    }

    /// Create a basket entry error
    pub fn basket_entry(msg: impl Into<String>) -> Self {
        Self::InvalidBasketEntry(msg.into())
    }
}
