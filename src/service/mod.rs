//! Account/device service collaborator

pub mod client;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

pub use client::AccountClient;

/// One device item as returned by the service, before normalization
pub type RawDevice = serde_json::Map<String, serde_json::Value>;

/// Remote account service the session core depends on.
///
/// Implementations own the wire format. The core only relies on the
/// success/failure contract of these three calls.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Log in with an identifier and secret
    async fn authenticate(
        &self,
        identifier: &str,
        secret: &SecretString,
    ) -> Result<AuthOutcome, ServiceError>;

    /// Fetch every device registered under the authenticated account
    async fn query_registered_devices(
        &self,
        token: &SessionToken,
    ) -> Result<Vec<RawDevice>, ServiceError>;

    /// Release the remote session
    async fn terminate(&self, token: &SessionToken) -> Result<(), ServiceError>;
}

/// Result of a login round trip that reached the service
#[derive(Debug)]
pub enum AuthOutcome {
    Accepted(SessionToken),
    Rejected,
}

/// Errors reported by an `AccountService`
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Opaque credential issued by the service for one login
pub struct SessionToken(SecretString);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}
