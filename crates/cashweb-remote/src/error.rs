//! Error types for cashweb-remote

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The call could not complete (connection, TLS, non-2xx status)
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Timeout: no response within {millis} ms")]
    Timeout { millis: u64 },

    /// The service answered but reported `success: false`
    #[error("Remote error: {message}")]
    Remote { message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Invalid service URL: {url}")]
    InvalidUrl { url: String },
}
