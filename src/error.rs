//! Failure kinds returned by the session and device listing operations

use thiserror::Error;

use crate::session::SessionState;

/// Why `SessionManager::begin` did not produce a session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    /// Identifier or secret was empty, or the service rejected them
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The account service could not be reached or answered unexpectedly
    #[error("account service unavailable: {0}")]
    ServiceUnavailable(String),

    /// `begin` was called on a manager that is not unauthenticated.
    /// This is a call-sequence bug, never an expected outcome.
    #[error("cannot begin a session while the manager is {state}")]
    Lifecycle { state: SessionState },
}

impl AuthFailure {
    /// Lifecycle violations indicate a bug in the caller
    pub fn is_fatal(&self) -> bool {
        matches!(self, AuthFailure::Lifecycle { .. })
    }
}

/// Why `DeviceLister::list` did not produce a collection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListFailure {
    /// The session was never begun or has already ended
    #[error("session is not active")]
    InvalidSession,

    /// The service returned something that could not be normalized
    #[error("malformed device response: {0}")]
    MalformedResponse(String),

    /// The device query could not reach the service
    #[error("account service unavailable: {0}")]
    ServiceUnavailable(String),
}
