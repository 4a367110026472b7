//! Authenticated context for OSC API calls.
//!
//! A [`Context`] holds the personal access token and the environment it
//! belongs to. It never caches anything: every token request goes back to the
//! catalog and the token service.

use std::sync::Arc;

use tracing::debug;

use crate::api::{ApiClient, Service, ServiceAccessToken};
use crate::config::{ContextConfig, Endpoints, Environment, ResolvedConfig};
use crate::error::Result;

/// Credentials and endpoints for one account in one environment.
///
/// Immutable after construction, so it can be cloned and shared freely.
#[derive(Clone)]
pub struct Context {
    client: Arc<ApiClient>,
    config: ResolvedConfig,
}

impl Context {
    /// Create a context, reading missing values from the process environment.
    ///
    /// Fails with [`crate::Error::MissingAccessToken`] when no token is given
    /// and `OSC_ACCESS_TOKEN` is unset.
    pub fn new(config: ContextConfig) -> Result<Self> {
        Self::with_env_lookup(config, |key| std::env::var(key).ok())
    }

    /// Create a context, reading missing values through `lookup`.
    pub fn with_env_lookup<F>(config: ContextConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = config.resolve(lookup)?;
        let client = ApiClient::new(None)?;
        debug!("Created context for environment {}", config.environment);

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    pub fn personal_access_token(&self) -> &str {
        &self.config.personal_access_token
    }

    pub fn environment(&self) -> Environment {
        self.config.environment
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.config.endpoints
    }

    /// Get the underlying ApiClient.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The caller's current subscriptions.
    pub async fn subscriptions(&self) -> Result<Vec<Service>> {
        self.client
            .list_subscriptions(self.endpoints().subscriptions(), self.personal_access_token())
            .await
    }

    /// Subscribe to `service_id`. Already-active services are accepted.
    pub async fn activate_service(&self, service_id: &str) -> Result<()> {
        debug!("Activating service {}", service_id);
        self.client
            .add_subscription(
                self.endpoints().subscriptions(),
                self.personal_access_token(),
                service_id,
            )
            .await
    }

    /// Obtain a service token for `service_id`, activating the service first
    /// when it is not among the caller's subscriptions.
    ///
    /// Runs the whole flow every time: list, activate if missing, exchange.
    pub async fn issue_service_token(&self, service_id: &str) -> Result<ServiceAccessToken> {
        let services = self.subscriptions().await?;

        if !services.iter().any(|s| s.service_id == service_id) {
            debug!("Service {} not in subscriptions, activating", service_id);
            self.activate_service(service_id).await?;
        }

        self.client
            .issue_service_token(
                self.endpoints().service_token(),
                self.personal_access_token(),
                service_id,
            )
            .await
    }

    /// Service token string for `service_id`. See [`Context::issue_service_token`].
    pub async fn service_access_token(&self, service_id: &str) -> Result<String> {
        let token = self.issue_service_token(service_id).await?;
        Ok(token.token)
    }

    /// Same as [`Context::service_access_token`]; there is no cache to bypass.
    pub async fn refresh_service_access_token(&self, service_id: &str) -> Result<String> {
        self.service_access_token(service_id).await
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("environment", &self.config.environment)
            .field("endpoints", &self.config.endpoints)
            .field("personal_access_token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_context_creation() {
        let ctx = Context::with_env_lookup(ContextConfig::new("pat-123"), |_| None).unwrap();

        assert_eq!(ctx.personal_access_token(), "pat-123");
        assert_eq!(ctx.environment(), Environment::Prod);
        assert_eq!(
            ctx.endpoints().subscriptions(),
            "https://catalog.svc.prod.osaas.io/mysubscriptions"
        );
    }

    #[test]
    fn test_context_requires_token() {
        let result = Context::with_env_lookup(ContextConfig::default(), |_| None);
        assert!(matches!(result, Err(Error::MissingAccessToken)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let ctx = Context::with_env_lookup(
            ContextConfig::new("secret-token-123").with_environment(Environment::Dev),
            |_| None,
        )
        .unwrap();

        let debug_str = format!("{:?}", ctx);
        assert!(!debug_str.contains("secret-token-123"));
        assert!(debug_str.contains("[REDACTED]"));
        assert!(debug_str.contains("Dev"));
    }
}
