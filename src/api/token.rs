use tracing::debug;

use super::client::ApiClient;
use super::http::Auth;
use super::types::{ServiceAccessToken, ServiceTokenRequest};
use crate::error::{Error, Result};

impl ApiClient {
    /// Exchange the personal access token for a service access token.
    pub async fn issue_service_token(
        &self,
        token_url: &str,
        personal_access_token: &str,
        service_id: &str,
    ) -> Result<ServiceAccessToken> {
        let body = ServiceTokenRequest { service_id };

        debug!("=== Service Token Request ===");
        let token: Option<ServiceAccessToken> = self
            .post(token_url, &body, &Auth::personal(personal_access_token))
            .await?;

        match token {
            Some(token) if !token.token.is_empty() => {
                debug!("Successfully obtained service access token for {}", service_id);
                Ok(token)
            }
            _ => Err(Error::EmptyServiceToken(service_id.to_string())),
        }
    }
}
