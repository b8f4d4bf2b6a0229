use thiserror::Error;

/// Error type for the `ftd-client` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Token request was rejected or returned no token.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// HTTP transport error (connection refused, DNS failure, TLS, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Non-success response from the device.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// A name lookup matched nothing.
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
