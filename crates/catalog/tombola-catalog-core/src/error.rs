use thiserror::Error;

/// Failures at the persistence edge. Callers that feed the selection engine
/// catch these and fall back to empty data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
