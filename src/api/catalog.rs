//! Subscription endpoints of the service catalog.

use reqwest::Method;
use tracing::debug;

use super::client::ApiClient;
use super::http::Auth;
use super::types::{Service, Subscriptions};
use crate::error::Result;

impl ApiClient {
    /// List the services the caller's team is subscribed to.
    pub async fn list_subscriptions(
        &self,
        subscriptions_url: &str,
        personal_access_token: &str,
    ) -> Result<Vec<Service>> {
        let services: Option<Vec<Service>> = self
            .get(subscriptions_url, &Auth::personal(personal_access_token))
            .await?;

        let services = services.unwrap_or_default();
        debug!("Found {} subscribed service(s)", services.len());
        Ok(services)
    }

    /// Add a service to the caller's subscriptions.
    ///
    /// The platform accepts services that are already subscribed, so this
    /// can be called unconditionally.
    pub async fn add_subscription(
        &self,
        subscriptions_url: &str,
        personal_access_token: &str,
        service_id: &str,
    ) -> Result<()> {
        let body = Subscriptions::for_service(service_id);

        self.request_no_content(
            Method::POST,
            subscriptions_url,
            Some(&body),
            &Auth::personal(personal_access_token),
        )
        .await
    }
}
