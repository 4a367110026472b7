//! API request and response types for OSC services.
//!
//! Field names follow the platform's camelCase JSON.

use chrono::{DateTime, TimeZone, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A provisioned instance of a service.
///
/// The schema belongs to the service, so the client treats it as an ordered
/// JSON object in both directions.
pub type Instance = Map<String, Value>;

/// Decode `null` as the field's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Catalog Types
// ============================================================================

/// A service the caller is subscribed to, as listed by the catalog.
///
/// The catalog may list services that are still being provisioned, so
/// missing or `null` fields decode as empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default, deserialize_with = "null_as_default")]
    pub service_id: String,
    /// Base URL for instance operations. Empty when the catalog has none yet.
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service_type: String,
    /// Title, description, pricing, options and anything else the catalog sends
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

/// Subscription update body for the catalog endpoint.
///
/// `team_id` is assigned by the server; clients only fill `services`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    pub services: Vec<String>,
}

impl Subscriptions {
    pub fn for_service(service_id: &str) -> Self {
        Self {
            team_id: None,
            services: vec![service_id.to_string()],
        }
    }
}

// ============================================================================
// Token Types
// ============================================================================

/// Service token request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ServiceTokenRequest<'a> {
    pub service_id: &'a str,
}

/// Short-lived, per-service credential issued in exchange for the
/// personal access token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccessToken {
    pub service_id: String,
    pub token: String,
    /// Unix timestamp, seconds
    #[serde(default)]
    pub expiry: i64,
}

impl ServiceAccessToken {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.expiry, 0).single()
    }

    /// Whether the token is past its expiry at `now`.
    ///
    /// Tokens with an unrepresentable expiry are treated as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().map_or(true, |at| at <= now)
    }
}

impl std::fmt::Debug for ServiceAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccessToken")
            .field("service_id", &self.service_id)
            .field("token", &"[REDACTED]")
            .field("expiry", &self.expiry)
            .finish()
    }
}

// ============================================================================
// Instance Types
// ============================================================================

/// Network endpoint exposed by a running instance.
///
/// Instances that are still starting report partial entries; absent or
/// `null` fields decode as empty/zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Port {
    #[serde(deserialize_with = "null_as_default")]
    pub external_ip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub external_port: u16,
    #[serde(deserialize_with = "null_as_default")]
    pub internal_port: u16,
}

/// Secret upload body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SecretRequest<'a> {
    pub secret_name: &'a str,
    pub secret_data: &'a str,
}

// ============================================================================
// API Error Type
// ============================================================================

/// A non-2xx response from an OSC endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub http_code: u16,
    pub message: String,
}

impl FetchError {
    pub fn new(http_code: u16, message: impl Into<String>) -> Self {
        Self {
            http_code,
            message: message.into(),
        }
    }

    /// Build from a response status and its body text.
    ///
    /// An empty body falls back to the status reason phrase.
    pub fn from_http_response(status: StatusCode, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            body.to_string()
        };

        Self::new(status.as_u16(), message)
    }

    pub fn is_not_found(&self) -> bool {
        self.http_code == StatusCode::NOT_FOUND.as_u16()
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP Code: {}, Message: {}", self.http_code, self.message)
    }
}

impl std::error::Error for FetchError {}
