//! Session manager

use std::future::Future;
use std::mem;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{Credentials, Session, SessionInner, SessionState};
use crate::error::AuthFailure;
use crate::service::{AccountService, AuthOutcome, ServiceError};

enum ManagerState {
    Unauthenticated,
    Active(Session),
    Released,
}

/// Owns one authenticated session from login to release.
///
/// A manager is single-use: `Unauthenticated -> Active -> Released`. A
/// failed `begin` leaves it unauthenticated so the caller can retry, but
/// once released a fresh manager is needed for a new login.
pub struct SessionManager {
    service: Arc<dyn AccountService>,
    state: ManagerState,
}

impl SessionManager {
    pub fn new(service: Arc<dyn AccountService>) -> Self {
        Self {
            service,
            state: ManagerState::Unauthenticated,
        }
    }

    pub fn state(&self) -> SessionState {
        match self.state {
            ManagerState::Unauthenticated => SessionState::Unauthenticated,
            ManagerState::Active(_) => SessionState::Active,
            ManagerState::Released => SessionState::Released,
        }
    }

    /// Log in and return the active session
    pub async fn begin(&mut self, credentials: &Credentials) -> Result<Session, AuthFailure> {
        let state = self.state();
        if state != SessionState::Unauthenticated {
            return Err(AuthFailure::Lifecycle { state });
        }

        if !credentials.is_complete() {
            debug!("Refusing login with blank credentials");
            return Err(AuthFailure::InvalidCredentials);
        }

        let outcome = self
            .service
            .authenticate(credentials.identifier(), credentials.secret())
            .await;

        match outcome {
            Ok(AuthOutcome::Accepted(token)) => {
                let session = Session::open(token);
                self.state = ManagerState::Active(session.clone());
                info!("Session started");
                Ok(session)
            }
            Ok(AuthOutcome::Rejected) => {
                info!("Login rejected by account service");
                Err(AuthFailure::InvalidCredentials)
            }
            Err(ServiceError::Unavailable(reason)) | Err(ServiceError::Malformed(reason)) => {
                warn!("Login failed: {}", reason);
                Err(AuthFailure::ServiceUnavailable(reason))
            }
        }
    }

    /// Release the session. Safe to call in any state and any number of times.
    pub async fn end(&mut self) {
        let previous = mem::replace(&mut self.state, ManagerState::Released);
        let ManagerState::Active(session) = previous else {
            debug!("end() with no active session");
            return;
        };

        let Some(inner) = session.deactivate() else {
            return;
        };

        release(self.service.as_ref(), &inner).await;
        info!("Session released");
    }

    /// Run `f` against a fresh session and end it afterwards, whatever `f` returns
    pub async fn with_session<T, F, Fut>(
        &mut self,
        credentials: &Credentials,
        f: F,
    ) -> Result<T, AuthFailure>
    where
        F: FnOnce(Session) -> Fut,
        Fut: Future<Output = T>,
    {
        let session = self.begin(credentials).await?;
        let output = f(session).await;
        self.end().await;
        Ok(output)
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        let ManagerState::Active(session) = mem::replace(&mut self.state, ManagerState::Released)
        else {
            return;
        };
        let Some(inner) = session.deactivate() else {
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                debug!("Active session dropped, releasing in background");
                let service = Arc::clone(&self.service);
                runtime.spawn(async move {
                    release(service.as_ref(), &inner).await;
                });
            }
            Err(_) => warn!("Active session dropped outside a runtime, remote release skipped"),
        }
    }
}

async fn release(service: &dyn AccountService, inner: &SessionInner) {
    if let Err(e) = service.terminate(&inner.token).await {
        warn!("Failed to release remote session: {}", e);
    }
}
