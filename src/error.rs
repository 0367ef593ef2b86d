//! Error types for the asset pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating site assets
#[derive(Error, Debug)]
pub enum Error {
    /// Neither credential variable is set in the environment
    #[error("No API key found in environment variables (checked {primary} and {fallback})")]
    MissingCredential {
        primary: &'static str,
        fallback: &'static str,
    },

    /// Invalid configuration or job definition
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Transport-level failure talking to the generation service
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The service answered with a non-success status
    #[error("Service returned HTTP {status}: {body}")]
    Service { status: u16, body: String },

    /// The response body could not be understood
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The response carried no inline image part
    #[error("No image data found in response")]
    NoImageData,

    /// The inline payload was not valid base64
    #[error("Failed to decode image payload: {0}")]
    DecodeError(#[from] base64::DecodeError),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "gemini")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::MalformedResponse(err.to_string())
        } else {
            Error::NetworkError(err.to_string())
        }
    }
}
