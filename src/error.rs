//! Error types for the OSC client.
//!
//! Every fallible operation in the library returns [`Error`]. Errors are
//! handed back to the immediate caller unchanged; nothing here retries.

use thiserror::Error;

pub use crate::api::FetchError;

/// Result type used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// No personal access token was given and `OSC_ACCESS_TOKEN` is unset.
    #[error(
        "personal access token is required to create a context. \
         Please provide it in the config or set the OSC_ACCESS_TOKEN environment variable"
    )]
    MissingAccessToken,

    #[error("unknown environment '{0}' (expected one of: prod, stage, dev)")]
    InvalidEnvironment(String),

    /// Connection, DNS, TLS or timeout failure from the HTTP layer.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response declared JSON but the body did not parse.
    #[error("failed to parse response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A non-2xx response.
    #[error(transparent)]
    Fetch(FetchError),

    /// The platform rejected the credential (HTTP 401).
    #[error("unauthorized access: {0}")]
    Unauthorized(FetchError),

    #[error("service {0} not found in your subscriptions")]
    ServiceNotFound(String),

    #[error("token response for service {0} does not contain a valid 'token' field")]
    EmptyServiceToken(String),

    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL parsed but has no host to root a path on.
    #[error("API URL {0} has no host")]
    InvalidApiUrl(String),
}

impl Error {
    /// Returns the HTTP status code for errors that came from a response.
    pub fn http_code(&self) -> Option<u16> {
        match self {
            Error::Fetch(err) | Error::Unauthorized(err) => Some(err.http_code),
            Error::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Whether this is a 404 from the remote endpoint.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Fetch(err) if err.is_not_found())
    }
}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        if err.http_code == 401 {
            Error::Unauthorized(err)
        } else {
            Error::Fetch(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_promotion() {
        let err: Error = FetchError::new(401, "token expired").into();
        assert!(matches!(err, Error::Unauthorized(_)));
        assert_eq!(err.http_code(), Some(401));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_classification() {
        let err: Error = FetchError::new(404, "").into();
        assert!(err.is_not_found());

        let err: Error = FetchError::new(500, "boom").into();
        assert!(!err.is_not_found());
        assert_eq!(err.http_code(), Some(500));
    }

    #[test]
    fn test_missing_token_message() {
        let msg = Error::MissingAccessToken.to_string();
        assert!(msg.contains("OSC_ACCESS_TOKEN"));
    }
}
