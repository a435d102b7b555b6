//! Error types for the catalog-query crate.

use thiserror::Error;

/// Errors raised at the fallible edges of the crate: decoding catalog
/// documents, constructing entries and parsing request identifiers.
///
/// Query execution itself never fails.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Sort identifier is not one of the known sort keys.
    #[error("unknown sort key: '{0}'")]
    UnknownSortKey(String),

    /// No sort identifier was supplied. There is no default sort.
    #[error("missing sort key")]
    MissingSortKey,

    /// Language identifier is not a supported target language.
    #[error("unknown language: '{0}'")]
    UnknownLanguage(String),

    /// Entry data violates an entry invariant.
    #[error("invalid catalog entry: {0}")]
    InvalidEntry(String),

    /// Catalog document is not valid JSON or has the wrong shape.
    #[error("invalid catalog document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for catalog-query operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
