//! Error types for graphscout.
//!
//! Library crates use [`GraphScoutError`] via `thiserror`.
//! The CLI app wraps this with `color-eyre` for rich diagnostics.

/// Top-level error type for all graphscout operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphScoutError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Token acquisition or credential error.
    #[error("auth error: {0}")]
    Auth(String),

    /// Network/HTTP error while talking to the Graph service.
    #[error("network error: {0}")]
    Network(String),

    /// Response body did not match the expected wire shape.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// Page content retrieval error, carrying page/site context.
    #[error("failed to fetch page {page_id} of site {site_id}: {message}")]
    PageContent {
        site_id: String,
        page_id: String,
        message: String,
    },

    /// Output serialization error.
    #[error("serialize error: {0}")]
    Serialize(String),

    /// Filesystem I/O error (config handling).
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, GraphScoutError>;

impl GraphScoutError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a decode error from any displayable message.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<std::path::PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap an error from a page content fetch with its site/page context.
    pub fn page_content(
        site_id: impl Into<String>,
        page_id: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::PageContent {
            site_id: site_id.into(),
            page_id: page_id.into(),
            message: msg.into(),
        }
    }
}
