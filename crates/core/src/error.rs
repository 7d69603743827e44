//! Catalog error model.

use thiserror::Error;

/// Result type used across the catalog crates.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-level error.
///
/// Per-query failures (`InvalidParams`) go back to the immediate caller.
/// `Load` is fatal at startup. `TransientIo` may succeed on a later attempt,
/// but nothing in these crates retries it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Backing catalog data is missing or malformed.
    #[error("catalog load failed: {0}")]
    Load(String),

    /// Caller-supplied query parameters are out of contract.
    #[error("invalid query parameters: {0}")]
    InvalidParams(String),

    /// Reading the backing data failed for a reason that may not recur.
    #[error("catalog io error: {0}")]
    TransientIo(String),
}

impl CatalogError {
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::InvalidParams(msg.into())
    }

    pub fn transient_io(msg: impl Into<String>) -> Self {
        Self::TransientIo(msg.into())
    }

    /// Whether a caller-level retry could reasonably succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TransientIo(_))
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Load(format!("malformed json: {err}"))
    }
}
