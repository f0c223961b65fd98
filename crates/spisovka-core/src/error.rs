//! Error types for spisovka-core

use thiserror::Error;

/// Result type alias using spisovka-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in spisovka-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The URL is missing one of the required query parameters
    #[error("URL is not complete")]
    IncompleteUrl,

    /// A case with the same spisovka is already in the store
    #[error("Spisovka {0} is already tracked")]
    AlreadyTracked(String),

    /// No case with the given spisovka exists
    #[error("Spisovka {0} was not found")]
    NotFound(String),

    /// Fetching a tracked page failed
    #[error("Fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
