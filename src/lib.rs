//! Client library for Open Source Cloud (OSC) services.
//!
//! A [`Context`] exchanges a personal access token for short-lived service
//! tokens, activating services on demand. The functions in [`instance`]
//! manage instances of a service through the API URL listed in the caller's
//! subscriptions.
//!
//! ```no_run
//! use osaas_client::{instance, Context, ContextConfig};
//!
//! # async fn run() -> osaas_client::Result<()> {
//! let ctx = Context::new(ContextConfig::default())?;
//! let token = ctx.service_access_token("eyevinn-test-adserver").await?;
//! let instances = instance::list_instances(&ctx, "eyevinn-test-adserver", &token).await?;
//! println!("{} instance(s)", instances.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod instance;


pub use api::{Instance, Port, Service, ServiceAccessToken};
pub use catalog::get_service;
pub use config::{ContextConfig, Endpoints, Environment};
pub use context::Context;
pub use error::{Error, FetchError, Result};
