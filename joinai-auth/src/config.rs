/// Credential configuration loaded from the environment

use crate::error::{AuthError, Result};
use crate::hmac_signature::{create_hmac_headers, HmacHeaders};
use crate::joinai_signature::{create_joinai_headers, JoinAiHeaders};
use std::fmt;

pub const JOINAI_APP_ID: &str = "JOINAI_APP_ID";
pub const JOINAI_APP_KEY: &str = "JOINAI_APP_KEY";
pub const JOINAI_APP_PATH: &str = "JOINAI_APP_PATH";

pub const APP_ID: &str = "APP_ID";
pub const APP_SECRET: &str = "APP_SECRET";
pub const APP_HOST: &str = "APP_HOST";

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Lookup that answers from `overrides` first and falls back to `base`
fn overlay<'a>(
    overrides: &'a [(&'static str, Option<String>)],
    base: impl Fn(&str) -> Option<String> + 'a,
) -> impl Fn(&str) -> Option<String> + 'a {
    move |name: &str| {
        overrides
            .iter()
            .find(|(key, _)| *key == name)
            .and_then(|(_, value)| value.clone())
            .or_else(|| base(name))
    }
}

/// Credentials for the JoinAI checksum scheme
#[derive(Clone)]
pub struct JoinAiConfig {
    pub app_id: String,
    pub app_key: String,
    pub path: Option<String>,
}

impl JoinAiConfig {
    pub fn new(app_id: String, app_key: String, path: Option<String>) -> Self {
        JoinAiConfig { app_id, app_key, path }
    }

    /// Load JoinAI configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_env_or(None, None, None)
    }

    /// Load configuration, preferring explicitly given values over the environment
    pub fn from_env_or(app_id: Option<String>, app_key: Option<String>, path: Option<String>) -> Result<Self> {
        let overrides = [(JOINAI_APP_ID, app_id), (JOINAI_APP_KEY, app_key), (JOINAI_APP_PATH, path)];
        Self::from_lookup(overlay(&overrides, env_lookup))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let app_id = lookup(JOINAI_APP_ID).ok_or(AuthError::MissingConfig(JOINAI_APP_ID))?;
        let app_key = lookup(JOINAI_APP_KEY).ok_or(AuthError::MissingConfig(JOINAI_APP_KEY))?;
        let path = lookup(JOINAI_APP_PATH).filter(|p| !p.is_empty());

        Ok(JoinAiConfig { app_id, app_key, path })
    }

    pub fn headers(&self) -> Result<JoinAiHeaders> {
        create_joinai_headers(&self.app_id, &self.app_key, self.path.as_deref())
    }
}

impl fmt::Debug for JoinAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinAiConfig")
            .field("app_id", &self.app_id)
            .field("app_key", &"<redacted>")
            .field("path", &self.path)
            .finish()
    }
}

/// Credentials for the HMAC gateway scheme
#[derive(Clone)]
pub struct HmacConfig {
    pub app_id: String,
    pub app_secret: String,
    pub host: String,
}

impl HmacConfig {
    pub fn new(app_id: String, app_secret: String, host: String) -> Self {
        HmacConfig { app_id, app_secret, host }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_env_or(None, None, None)
    }

    pub fn from_env_or(app_id: Option<String>, app_secret: Option<String>, host: Option<String>) -> Result<Self> {
        let overrides = [(APP_ID, app_id), (APP_SECRET, app_secret), (APP_HOST, host)];
        Self::from_lookup(overlay(&overrides, env_lookup))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(HmacConfig {
            app_id: lookup(APP_ID).ok_or(AuthError::MissingConfig(APP_ID))?,
            app_secret: lookup(APP_SECRET).ok_or(AuthError::MissingConfig(APP_SECRET))?,
            host: lookup(APP_HOST).ok_or(AuthError::MissingConfig(APP_HOST))?,
        })
    }

    pub fn headers(&self) -> Result<HmacHeaders> {
        create_hmac_headers(&self.app_id, &self.app_secret, &self.host)
    }
}

impl fmt::Debug for HmacConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacConfig")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .field("host", &self.host)
            .finish()
    }
}
