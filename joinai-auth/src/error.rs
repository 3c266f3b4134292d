use thiserror::Error;

/// Errors produced while building authentication headers
#[derive(Debug, Error)]
pub enum AuthError {
    /// A primitive the signer depends on is unusable (e.g. the system clock)
    #[error("environment failure: {0}")]
    Environment(String),

    /// A required configuration variable is not set
    #[error("{0} not found in environment")]
    MissingConfig(&'static str),

    /// A generated value cannot be carried in an HTTP header
    #[error("invalid value for header {name}")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },

    #[error("invalid HMAC key: {0}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;
