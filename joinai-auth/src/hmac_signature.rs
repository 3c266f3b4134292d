/// HMAC-SHA256 gateway headers
/// Used by the LangGraph SDK clients when the JoinAI gateway fronts the
/// graph server: the signature covers the host and an RFC 1123 date.

use crate::error::{AuthError, Result};
use crate::joinai_signature::header_value;
use crate::source::{Clock, SystemClock};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderName, AUTHORIZATION, DATE, HOST};
use serde::Serialize;
use sha2::Sha256;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Header list advertised in the authorization value. Only host and date
/// are part of the signed origin.
const SIGNED_HEADERS: &str = "host date request-line";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HmacHeaders {
    pub authorization: String,
    pub date: String,
    pub host: String,
    #[serde(rename = "appId")]
    pub app_id: String,
}

impl HmacHeaders {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("authorization", self.authorization.as_str()),
            ("date", self.date.as_str()),
            ("host", self.host.as_str()),
            ("appId", self.app_id.as_str()),
        ]
        .into_iter()
    }

    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(4);
        headers.insert(AUTHORIZATION, header_value("authorization", &self.authorization)?);
        headers.insert(DATE, header_value("date", &self.date)?);
        headers.insert(HOST, header_value("host", &self.host)?);
        headers.insert(HeaderName::from_static("appid"), header_value("appId", &self.app_id)?);
        Ok(headers)
    }
}

/// Format Unix seconds as an RFC 1123 date, e.g. `Tue, 14 Nov 2023 22:13:20 GMT`
pub fn http_date(unix_seconds: u64) -> Result<String> {
    let secs = i64::try_from(unix_seconds)
        .map_err(|_| AuthError::Environment(format!("timestamp {} out of range", unix_seconds)))?;
    let time: DateTime<Utc> = DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| AuthError::Environment(format!("timestamp {} out of range", unix_seconds)))?;
    Ok(time.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
}

/// Base64 HMAC-SHA256 over `"host: {host}\ndate: {date}\n"`
pub fn sign_origin(app_secret: &str, host: &str, date: &str) -> Result<String> {
    let origin = format!("host: {}\ndate: {}\n", host, date);
    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .map_err(|e| AuthError::InvalidKey(e.to_string()))?;
    mac.update(origin.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

pub fn create_hmac_headers(app_id: &str, app_secret: &str, host: &str) -> Result<HmacHeaders> {
    create_hmac_headers_with(&SystemClock, app_id, app_secret, host)
}

pub fn create_hmac_headers_with(
    clock: &dyn Clock,
    app_id: &str,
    app_secret: &str,
    host: &str,
) -> Result<HmacHeaders> {
    let date = http_date(clock.unix_seconds()?)?;
    let signature = sign_origin(app_secret, host, &date)?;

    let authorization = format!(
        "hmac api_key={}, algorithm=hmac-sha256, headers={}, signature={}",
        app_id, SIGNED_HEADERS, signature
    );

    debug!(app_id, host, date = %date, "built HMAC gateway headers");

    Ok(HmacHeaders {
        authorization,
        date,
        host: host.to_string(),
        app_id: app_id.to_string(),
    })
}
