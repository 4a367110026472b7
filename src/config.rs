//! Context configuration: deployment environment, endpoint URLs and the
//! resolution of credentials from the process environment.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Environment variable holding the personal access token.
pub const ACCESS_TOKEN_ENV: &str = "OSC_ACCESS_TOKEN";

/// Environment variable selecting the deployment environment.
pub const ENVIRONMENT_ENV: &str = "OSC_ENVIRONMENT";

/// Deployment realm of the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    #[default]
    Prod,
    Stage,
    Dev,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Prod => "prod",
            Environment::Stage => "stage",
            Environment::Dev => "dev",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "prod" => Ok(Environment::Prod),
            "stage" => Ok(Environment::Stage),
            "dev" => Ok(Environment::Dev),
            _ => Err(Error::InvalidEnvironment(s.to_string())),
        }
    }
}

/// Account-scoped endpoints used by a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    subscriptions: String,
    service_token: String,
    secrets: String,
}

impl Endpoints {
    /// Platform endpoints for `environment`.
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            subscriptions: format!("https://catalog.svc.{}.osaas.io/mysubscriptions", environment),
            service_token: format!("https://token.svc.{}.osaas.io/servicetoken", environment),
            secrets: format!("https://deploy.svc.{}.osaas.io/mysecrets", environment),
        }
    }

    /// All endpoints under a single base URL, e.g. a local proxy.
    pub fn with_base_url(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Self {
            subscriptions: format!("{}/mysubscriptions", base_url),
            service_token: format!("{}/servicetoken", base_url),
            secrets: format!("{}/mysecrets", base_url),
        }
    }

    pub fn subscriptions(&self) -> &str {
        &self.subscriptions
    }

    pub fn service_token(&self) -> &str {
        &self.service_token
    }

    pub fn secret(&self, service_id: &str) -> String {
        format!("{}/{}", self.secrets, service_id)
    }
}

/// Construction parameters for a [`crate::Context`].
///
/// Anything left unset is resolved at construction time; see
/// [`ContextConfig::resolve`].
#[derive(Debug, Clone, Default)]
pub struct ContextConfig {
    pub personal_access_token: Option<String>,
    pub environment: Option<Environment>,
    /// Overrides the endpoints derived from the environment
    pub endpoints: Option<Endpoints>,
}

/// Fully resolved configuration.
#[derive(Clone)]
pub(crate) struct ResolvedConfig {
    pub personal_access_token: String,
    pub environment: Environment,
    pub endpoints: Endpoints,
}

impl ContextConfig {
    pub fn new(personal_access_token: impl Into<String>) -> Self {
        Self {
            personal_access_token: Some(personal_access_token.into()),
            ..Default::default()
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Fill in missing values.
    ///
    /// Priority for each value:
    /// 1. The explicit config field
    /// 2. `lookup` of its environment variable
    /// 3. The default (`prod` environment); there is none for the token
    pub(crate) fn resolve<F>(self, lookup: F) -> Result<ResolvedConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let personal_access_token = non_empty(self.personal_access_token)
            .or_else(|| non_empty(lookup(ACCESS_TOKEN_ENV)))
            .ok_or(Error::MissingAccessToken)?;

        let environment = match self.environment {
            Some(environment) => environment,
            None => match non_empty(lookup(ENVIRONMENT_ENV)) {
                Some(name) => name.parse()?,
                None => Environment::default(),
            },
        };

        let endpoints = self
            .endpoints
            .unwrap_or_else(|| Endpoints::for_environment(environment));

        Ok(ResolvedConfig {
            personal_access_token,
            environment,
            endpoints,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Prod);
        assert_eq!("Stage".parse::<Environment>().unwrap(), Environment::Stage);
        assert_eq!(" dev ".parse::<Environment>().unwrap(), Environment::Dev);
        assert!(matches!(
            "qa".parse::<Environment>(),
            Err(Error::InvalidEnvironment(name)) if name == "qa"
        ));
        assert_eq!(Environment::default().to_string(), "prod");
    }

    #[test]
    fn test_endpoints_for_environment() {
        let endpoints = Endpoints::for_environment(Environment::Dev);
        assert_eq!(
            endpoints.subscriptions(),
            "https://catalog.svc.dev.osaas.io/mysubscriptions"
        );
        assert_eq!(
            endpoints.service_token(),
            "https://token.svc.dev.osaas.io/servicetoken"
        );
        assert_eq!(
            endpoints.secret("eyevinn-test-adserver"),
            "https://deploy.svc.dev.osaas.io/mysecrets/eyevinn-test-adserver"
        );
    }

    #[test]
    fn test_endpoints_with_base_url() {
        let endpoints = Endpoints::with_base_url("http://127.0.0.1:8080/");
        assert_eq!(
            endpoints.subscriptions(),
            "http://127.0.0.1:8080/mysubscriptions"
        );
        assert_eq!(endpoints.secret("svc"), "http://127.0.0.1:8080/mysecrets/svc");
    }

    #[test]
    fn test_missing_token_fails() {
        let result = ContextConfig::default().resolve(no_env);
        assert!(matches!(result, Err(Error::MissingAccessToken)));

        let result = ContextConfig::new("  ").resolve(no_env);
        assert!(matches!(result, Err(Error::MissingAccessToken)));
    }

    #[test]
    fn test_token_from_env_lookup() {
        let resolved = ContextConfig::default()
            .resolve(|key| (key == ACCESS_TOKEN_ENV).then(|| "env-token".to_string()))
            .unwrap();
        assert_eq!(resolved.personal_access_token, "env-token");
        assert_eq!(resolved.environment, Environment::Prod);
        assert_eq!(resolved.endpoints, Endpoints::for_environment(Environment::Prod));
    }

    #[test]
    fn test_explicit_values_win() {
        let resolved = ContextConfig::new("explicit")
            .with_environment(Environment::Stage)
            .resolve(|key| match key {
                ACCESS_TOKEN_ENV => Some("env-token".to_string()),
                ENVIRONMENT_ENV => Some("dev".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(resolved.personal_access_token, "explicit");
        assert_eq!(resolved.environment, Environment::Stage);
    }

    #[test]
    fn test_environment_from_env_lookup() {
        let resolved = ContextConfig::new("pat")
            .resolve(|key| (key == ENVIRONMENT_ENV).then(|| "dev".to_string()))
            .unwrap();
        assert_eq!(resolved.environment, Environment::Dev);

        let result = ContextConfig::new("pat")
            .resolve(|key| (key == ENVIRONMENT_ENV).then(|| "nowhere".to_string()));
        assert!(matches!(result, Err(Error::InvalidEnvironment(_))));
    }
}
