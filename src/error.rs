//! Error types for dataset retrieval, decoding, and search
//!
//! Every failure in this crate is terminal for a single-shot lookup, so the
//! variants carry enough context to print a useful diagnostic and nothing
//! more. The CLI wraps them in `anyhow` on the way out.

use thiserror::Error;

/// Boxed error used as the source of retrieval failures (HTTP or file I/O)
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required parameter is missing or a config value is unusable
    #[error("{0}")]
    Configuration(String),

    /// The dataset could not be downloaded, read, or written to the cache
    #[error("failed to retrieve dataset from {location}")]
    Retrieval {
        location: String,
        #[source]
        source: BoxError,
    },

    /// The dataset bytes are not a valid ATT&CK bundle
    #[error("failed to parse dataset JSON")]
    Deserialization(#[from] serde_json::Error),

    /// The search term does not compile as a regular expression
    #[error("invalid search pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl Error {
    pub fn retrieval(location: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Retrieval {
            location: location.into(),
            source: source.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
