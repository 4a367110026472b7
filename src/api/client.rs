use reqwest::header::{HeaderMap, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::http::{check_status, is_json_response, Auth};
use crate::error::{Error, Result};

/// Default request timeout in seconds
pub(super) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default client version (from Cargo.toml)
const DEFAULT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the User-Agent string
fn build_user_agent() -> String {
    std::env::var("OSC_USER_AGENT")
        .unwrap_or_else(|_| format!("osaas-client/{}", DEFAULT_VERSION))
}

/// HTTP transport for OSC endpoints.
///
/// Each call sends exactly one request and reads the whole body before
/// looking at the status. Nothing is retried.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    user_agent: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(user_agent: Option<String>) -> Result<Self> {
        let user_agent = user_agent.unwrap_or_else(build_user_agent);

        // connections are not kept between calls
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self { client, user_agent })
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Send a request and decode the JSON response.
    ///
    /// Returns `Ok(None)` when the response does not declare
    /// `application/json`, whatever the body looks like.
    pub async fn request<B, T>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        auth: &Auth,
    ) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (headers, body) = self.execute(method, url, body, auth).await?;

        if !is_json_response(&headers) {
            debug!("Response from {} is not JSON; skipping decode", url);
            return Ok(None);
        }

        match serde_json::from_slice(&body) {
            Ok(value) => Ok(Some(value)),
            Err(source) => {
                warn!("Response body: {}", String::from_utf8_lossy(&body));
                Err(Error::Decode {
                    url: url.to_string(),
                    source,
                })
            }
        }
    }

    /// Send a request whose response body is not needed.
    pub async fn request_no_content<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        auth: &Auth,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.execute(method, url, body, auth).await.map(|_| ())
    }

    pub async fn get<T: DeserializeOwned>(&self, url: &str, auth: &Auth) -> Result<Option<T>> {
        self.request::<(), T>(Method::GET, url, None, auth).await
    }

    pub async fn post<B, T>(&self, url: &str, body: &B, auth: &Auth) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, url, Some(body), auth).await
    }

    pub async fn delete(&self, url: &str, auth: &Auth) -> Result<()> {
        self.request_no_content::<()>(Method::DELETE, url, None, auth)
            .await
    }

    async fn execute<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        auth: &Auth,
    ) -> Result<(HeaderMap, Vec<u8>)>
    where
        B: Serialize + ?Sized,
    {
        let body = match body {
            Some(body) => serde_json::to_vec(body).map_err(Error::Encode)?,
            None => Vec::new(),
        };

        debug!("=== API Request ===");
        debug!("{} {}", method, url);

        let response = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, &self.user_agent)
            .header(auth.header, &auth.value)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        if let Err(err) = check_status(status, &body) {
            debug!("Request to {} failed: {}", url, err);
            return Err(err.into());
        }

        Ok((headers, body))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
