//! Service lookup in the caller's subscriptions.

use tracing::debug;

use crate::api::Service;
use crate::context::Context;
use crate::error::{Error, Result};

/// Look up `service_id` among the caller's subscriptions.
///
/// A service that is not subscribed is an error. Unlike the token flow in
/// [`Context::issue_service_token`], this never activates anything; call
/// [`Context::activate_service`] first if that is wanted.
pub async fn get_service(ctx: &Context, service_id: &str) -> Result<Service> {
    let services = ctx.subscriptions().await?;

    let service = services
        .into_iter()
        .find(|service| service.service_id == service_id)
        .ok_or_else(|| Error::ServiceNotFound(service_id.to_string()))?;

    debug!("Resolved {} to {}", service_id, service.api_url);
    Ok(service)
}
