//! HTTP layer for OSC services.
//!
//! [`ApiClient`] is the single request primitive every operation goes
//! through. The catalog and token endpoints are thin typed wrappers on top.

mod catalog;
mod client;
mod http;
mod token;
mod types;

pub use client::ApiClient;
pub use http::{Auth, PERSONAL_TOKEN_HEADER, SERVICE_TOKEN_HEADER};
pub use types::{FetchError, Instance, Port, Service, ServiceAccessToken, Subscriptions};

pub(crate) use types::SecretRequest;
