use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::ProductId;

/// Failures reported by a product accessor.
///
/// Kept `Clone + PartialEq` so results can ride inside UI messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessorError {
    #[error("product {0} not found")]
    NotFound(ProductId),
    #[error("product service unavailable: {0}")]
    Unavailable(String),
    #[error("invalid product data: {0}")]
    InvalidData(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}
