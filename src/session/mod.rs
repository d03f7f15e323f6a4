//! Authenticated session lifecycle

pub mod credentials;
pub mod manager;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::service::SessionToken;

pub use credentials::Credentials;
pub use manager::SessionManager;

/// Lifecycle state of a `SessionManager`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Active,
    Released,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Unauthenticated => "unauthenticated",
            SessionState::Active => "active",
            SessionState::Released => "released",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to an authenticated connection.
///
/// Clones share one activity flag, so ending the session through its
/// manager invalidates every copy at once. `Session::default()` is a
/// detached handle that was never begun.
#[derive(Clone, Default)]
pub struct Session {
    inner: Option<Arc<SessionInner>>,
}

struct SessionInner {
    token: SessionToken,
    active: AtomicBool,
}

impl Session {
    pub(crate) fn open(token: SessionToken) -> Self {
        Self {
            inner: Some(Arc::new(SessionInner {
                token,
                active: AtomicBool::new(true),
            })),
        }
    }

    /// Handle that refers to no connection
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.inner
            .as_ref()
            .is_some_and(|inner| inner.active.load(Ordering::Acquire))
    }

    /// Token for remote calls, only while active
    pub(crate) fn active_token(&self) -> Option<&SessionToken> {
        self.inner
            .as_ref()
            .filter(|inner| inner.active.load(Ordering::Acquire))
            .map(|inner| &inner.token)
    }

    /// Mark the handle ended and hand back what is needed to release it remotely.
    /// Returns `None` if it was already ended or never begun.
    fn deactivate(&self) -> Option<Arc<SessionInner>> {
        let inner = self.inner.as_ref()?;
        inner
            .active
            .swap(false, Ordering::AcqRel)
            .then(|| Arc::clone(inner))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("attached", &self.inner.is_some())
            .field("active", &self.is_active())
            .finish()
    }
}
