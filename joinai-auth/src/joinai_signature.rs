/// JoinAI request signature generation
/// Builds the X-Server-Param / X-CurTime / X-CheckSum header set expected by
/// the JoinAI assistant gateway. The checksum is MD5 because the gateway
/// verifies with MD5; it is a wire format, not a security choice.

use crate::error::{AuthError, Result};
use crate::source::{Clock, IdSource, RandomUuid, SystemClock};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use tracing::{debug, warn};

pub const SERVER_PARAM_HEADER: &str = "X-Server-Param";
pub const CUR_TIME_HEADER: &str = "X-CurTime";
pub const CHECK_SUM_HEADER: &str = "X-CheckSum";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// App name used when no request path is given
pub const DEFAULT_APP_NAME: &str = "default";

/// Minimum width of the app name segment inside `csid`
pub const APP_NAME_WIDTH: usize = 24;

/// Headers that authenticate a single JoinAI request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinAiHeaders {
    /// Base64 of `{"appid":..,"csid":..}`
    #[serde(rename = "X-Server-Param")]
    pub server_param: String,
    /// Unix seconds at signing time
    #[serde(rename = "X-CurTime")]
    pub cur_time: String,
    /// Lowercase hex MD5 of appkey + cur_time + server_param
    #[serde(rename = "X-CheckSum")]
    pub check_sum: String,
    #[serde(rename = "Content-Type")]
    pub content_type: &'static str,
}

impl JoinAiHeaders {
    /// Header name/value pairs in wire order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (SERVER_PARAM_HEADER, self.server_param.as_str()),
            (CUR_TIME_HEADER, self.cur_time.as_str()),
            (CHECK_SUM_HEADER, self.check_sum.as_str()),
            (CONTENT_TYPE_HEADER, self.content_type),
        ]
        .into_iter()
    }

    /// Convert into a header map for the caller's HTTP client.
    /// Header names are normalized to lowercase by the `http` crate.
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(4);
        headers.insert(
            HeaderName::from_static("x-server-param"),
            header_value(SERVER_PARAM_HEADER, &self.server_param)?,
        );
        headers.insert(
            HeaderName::from_static("x-curtime"),
            header_value(CUR_TIME_HEADER, &self.cur_time)?,
        );
        headers.insert(
            HeaderName::from_static("x-checksum"),
            header_value(CHECK_SUM_HEADER, &self.check_sum)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        Ok(headers)
    }
}

pub(crate) fn header_value(name: &'static str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|source| AuthError::InvalidHeader { name, source })
}

/// JSON payload carried (base64-encoded) in X-Server-Param.
/// Field order is part of the wire format: the gateway hashes these bytes.
#[derive(Debug, Serialize)]
struct ServerParam<'a> {
    appid: &'a str,
    csid: &'a str,
}

/// Extract the app name from a request path
///
/// `None` yields `"default"`. Otherwise the path is split on `/` and the
/// element at index 1 is taken, so `/myapp/chat` gives `myapp`. A path with
/// no `/` has no such element and yields the empty string.
pub fn app_name_from_path(path: Option<&str>) -> &str {
    match path {
        None => DEFAULT_APP_NAME,
        Some(path) => path.split('/').nth(1).unwrap_or(""),
    }
}

/// Right-pad an app name with `0` to at least 24 characters. Longer names are kept whole.
pub fn pad_app_name(name: &str) -> String {
    format!("{:0<width$}", name, width = APP_NAME_WIDTH)
}

/// Generate JoinAI headers using the system clock and a random UUID v4
///
/// # Arguments
/// - `app_id`: application identifier
/// - `app_key`: shared secret; only its MD5 contribution leaves this function
/// - `path`: optional request path such as `/appName/endpoint`
pub fn create_joinai_headers(app_id: &str, app_key: &str, path: Option<&str>) -> Result<JoinAiHeaders> {
    create_joinai_headers_with(&SystemClock, &RandomUuid, app_id, app_key, path)
}

/// Generate JoinAI headers with an explicit clock and identifier source
pub fn create_joinai_headers_with(
    clock: &dyn Clock,
    ids: &dyn IdSource,
    app_id: &str,
    app_key: &str,
    path: Option<&str>,
) -> Result<JoinAiHeaders> {
    let app_name = app_name_from_path(path);
    if path.is_some() && app_name.is_empty() {
        warn!(path = ?path, "request path has no app segment, using empty app name");
    }
    let padded_name = pad_app_name(app_name);

    let csid = format!("{}{}{}", app_id, padded_name, ids.next_id());

    let server_param = ServerParam {
        appid: app_id,
        csid: &csid,
    };
    let server_param_json = serde_json::to_string(&server_param)
        .map_err(|e| AuthError::Environment(format!("failed to serialize server param: {}", e)))?;
    let x_server_param = BASE64.encode(server_param_json.as_bytes());

    let x_cur_time = clock.unix_seconds()?.to_string();

    let raw = format!("{}{}{}", app_key, x_cur_time, x_server_param);
    let x_check_sum = format!("{:x}", md5::compute(raw.as_bytes()));

    debug!(
        app_id,
        app_name,
        cur_time = %x_cur_time,
        "built JoinAI signature headers"
    );

    Ok(JoinAiHeaders {
        server_param: x_server_param,
        cur_time: x_cur_time,
        check_sum: x_check_sum,
        content_type: CONTENT_TYPE_JSON,
    })
}
