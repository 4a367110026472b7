//! Instance operations against a service's API.
//!
//! Each operation resolves the service's API URL through the catalog, then
//! makes one call authenticated with a service access token. Tokens are
//! passed in by the caller; get one with [`Context::service_access_token`].

use tracing::debug;
use url::Url;

use crate::api::{Auth, Instance, Port, SecretRequest};
use crate::catalog::get_service;
use crate::context::Context;
use crate::error::{Error, Result};

/// Parse a service's API URL. Services still being provisioned have none.
fn api_base(api_url: &str) -> Result<Url> {
    if api_url.trim().is_empty() {
        return Err(Error::InvalidApiUrl(api_url.to_string()));
    }

    let url = Url::parse(api_url).map_err(|source| Error::InvalidUrl {
        url: api_url.to_string(),
        source,
    })?;

    if url.host_str().is_none() {
        return Err(Error::InvalidApiUrl(api_url.to_string()));
    }

    Ok(url)
}

/// `{api_url}/{name}`, with `name` percent-encoded as one path segment.
fn instance_url(api_url: &str, name: &str) -> Result<String> {
    let mut url = api_base(api_url)?;

    url.path_segments_mut()
        .map_err(|_| Error::InvalidApiUrl(api_url.to_string()))?
        .pop_if_empty()
        .push(name);

    Ok(url.into())
}

/// An endpoint rooted at the host of `api_url`, e.g. `/ports/{name}`.
///
/// Any path, query or fragment on `api_url` is dropped. Scheme, host and
/// port are kept as given, so the platform's https API URLs yield
/// `https://{host}/ports/{name}` while a plain-http URL stays http.
pub(crate) fn host_url(api_url: &str, root: &str, name: &str) -> Result<String> {
    let mut url = api_base(api_url)?;

    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| Error::InvalidApiUrl(api_url.to_string()))?
        .clear()
        .push(root)
        .push(name);

    Ok(url.into())
}

/// Create an instance of `service_id` from `body`.
///
/// Activates the service on every call before resolving it.
pub async fn create_instance(
    ctx: &Context,
    service_id: &str,
    token: &str,
    body: &Instance,
) -> Result<Instance> {
    ctx.activate_service(service_id).await?;

    let service = get_service(ctx, service_id).await?;
    let url = api_base(&service.api_url)?;

    let instance = ctx
        .client()
        .post(url.as_str(), body, &Auth::service(token))
        .await?;

    Ok(instance.unwrap_or_default())
}

/// Fetch one instance. `Ok(None)` when it does not exist.
pub async fn get_instance(
    ctx: &Context,
    service_id: &str,
    name: &str,
    token: &str,
) -> Result<Option<Instance>> {
    let service = get_service(ctx, service_id).await?;
    let url = instance_url(&service.api_url, name)?;

    match ctx.client().get(&url, &Auth::service(token)).await {
        Ok(instance) => Ok(instance),
        Err(err) if err.is_not_found() => {
            debug!("Instance {} of {} not found", name, service_id);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

pub async fn list_instances(ctx: &Context, service_id: &str, token: &str) -> Result<Vec<Instance>> {
    let service = get_service(ctx, service_id).await?;
    let url = api_base(&service.api_url)?;

    let instances = ctx
        .client()
        .get(url.as_str(), &Auth::service(token))
        .await?;

    Ok(instances.unwrap_or_default())
}

pub async fn remove_instance(ctx: &Context, service_id: &str, name: &str, token: &str) -> Result<()> {
    let service = get_service(ctx, service_id).await?;
    let url = instance_url(&service.api_url, name)?;

    debug!("Deleting on instanceUrl: {}", url);
    ctx.client().delete(&url, &Auth::service(token)).await
}

/// Network endpoints exposed by an instance.
pub async fn get_ports(ctx: &Context, service_id: &str, name: &str, token: &str) -> Result<Vec<Port>> {
    let service = get_service(ctx, service_id).await?;
    let url = host_url(&service.api_url, "ports", name)?;

    let ports = ctx.client().get(&url, &Auth::service(token)).await?;
    Ok(ports.unwrap_or_default())
}

/// Log lines of an instance.
pub async fn get_logs(ctx: &Context, service_id: &str, name: &str, token: &str) -> Result<Vec<String>> {
    let service = get_service(ctx, service_id).await?;
    let url = host_url(&service.api_url, "logs", name)?;

    let logs = ctx.client().get(&url, &Auth::service(token)).await?;
    Ok(logs.unwrap_or_default())
}

/// Store a secret for `service_id` on the caller's account.
///
/// Account-level, so it uses the personal access token rather than a
/// service token.
pub async fn add_service_secret(
    ctx: &Context,
    service_id: &str,
    secret_name: &str,
    secret_data: &str,
) -> Result<()> {
    let url = ctx.endpoints().secret(service_id);
    let body = SecretRequest {
        secret_name,
        secret_data,
    };

    let _: Option<Instance> = ctx
        .client()
        .post(&url, &body, &Auth::personal(ctx.personal_access_token()))
        .await?;
    Ok(())
}
