use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::debug;

use super::types::FetchError;

/// Header carrying the personal access token.
pub const PERSONAL_TOKEN_HEADER: &str = "x-pat-jwt";

/// Header carrying a service access token.
pub const SERVICE_TOKEN_HEADER: &str = "x-jwt";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Authentication header for a single request.
///
/// The platform uses two bearer schemes on different header names, so this
/// is just the header pair rather than a scheme.
#[derive(Clone, PartialEq, Eq)]
pub struct Auth {
    pub header: &'static str,
    pub value: String,
}

impl Auth {
    /// Account-scoped auth with the personal access token.
    pub fn personal(token: &str) -> Self {
        Self {
            header: PERSONAL_TOKEN_HEADER,
            value: format!("Bearer {}", token),
        }
    }

    /// Instance-scoped auth with a service access token.
    pub fn service(token: &str) -> Self {
        Self {
            header: SERVICE_TOKEN_HEADER,
            value: format!("Bearer {}", token),
        }
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("header", &self.header)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Whether the response declares a JSON body.
pub(super) fn is_json_response(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(JSON_CONTENT_TYPE))
}

/// Turn a non-2xx status into a [`FetchError`] built from the body.
pub(super) fn check_status(status: StatusCode, body: &[u8]) -> Result<(), FetchError> {
    debug!("Response status: {}", status.as_u16());

    if status.is_success() {
        return Ok(());
    }

    let body = String::from_utf8_lossy(body);
    Err(FetchError::from_http_response(status, &body))
}
