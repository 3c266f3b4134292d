//! JoinAI authentication headers
//! Builds the signed headers the JoinAI assistant gateway expects, either the
//! MD5 checksum scheme or the HMAC-SHA256 gateway scheme. Sending the request
//! is left to the caller's HTTP client.

pub mod config;
pub mod error;
pub mod hmac_signature;
pub mod joinai_signature;
pub mod source;

pub use config::{HmacConfig, JoinAiConfig};
pub use error::{AuthError, Result};
pub use hmac_signature::{create_hmac_headers, create_hmac_headers_with, HmacHeaders};
pub use joinai_signature::{
    app_name_from_path, create_joinai_headers, create_joinai_headers_with, pad_app_name, JoinAiHeaders,
};
pub use source::{Clock, FixedClock, FixedId, IdSource, RandomUuid, SystemClock};
