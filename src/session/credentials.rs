//! Login credentials

use secrecy::{ExposeSecret, SecretString};

/// Account identifier and secret supplied by the caller.
///
/// The secret is redacted from `Debug` output and is only exposed to the
/// account service during login.
#[derive(Debug)]
pub struct Credentials {
    identifier: String,
    secret: SecretString,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    /// Neither field is empty
    pub fn is_complete(&self) -> bool {
        !self.identifier.is_empty() && !self.secret.expose_secret().is_empty()
    }
}
