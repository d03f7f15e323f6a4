// Shared fake account service for integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use devicelist::service::{AccountService, AuthOutcome, RawDevice, ServiceError, SessionToken};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

pub const IDENTIFIER: &str = "user@example.com";
pub const SECRET: &str = "correct-secret";

pub struct FakeService {
    pub reachable: bool,
    pub fail_logout: bool,
    /// Device query answers with a payload that is not a device list
    pub malformed_query: bool,
    /// `None` makes the device query fail at transport level
    pub devices: Option<Vec<RawDevice>>,
    pub logins: AtomicUsize,
    pub queries: AtomicUsize,
    pub terminations: AtomicUsize,
}

impl FakeService {
    pub fn with_devices(devices: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            reachable: true,
            fail_logout: false,
            malformed_query: false,
            devices: Some(devices.into_iter().map(object).collect()),
            logins: AtomicUsize::new(0),
            queries: AtomicUsize::new(0),
            terminations: AtomicUsize::new(0),
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            reachable: false,
            ..Self::plain()
        })
    }

    pub fn failing_logout() -> Arc<Self> {
        Arc::new(Self {
            fail_logout: true,
            ..Self::plain()
        })
    }

    pub fn failing_query() -> Arc<Self> {
        Arc::new(Self {
            devices: None,
            ..Self::plain()
        })
    }

    pub fn malformed_query() -> Arc<Self> {
        Arc::new(Self {
            malformed_query: true,
            ..Self::plain()
        })
    }

    fn plain() -> Self {
        Self {
            reachable: true,
            fail_logout: false,
            malformed_query: false,
            devices: Some(Vec::new()),
            logins: AtomicUsize::new(0),
            queries: AtomicUsize::new(0),
            terminations: AtomicUsize::new(0),
        }
    }

    pub fn logins(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn terminations(&self) -> usize {
        self.terminations.load(Ordering::SeqCst)
    }
}

pub fn object(value: Value) -> RawDevice {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {}", other),
    }
}

#[async_trait]
impl AccountService for FakeService {
    async fn authenticate(
        &self,
        identifier: &str,
        secret: &SecretString,
    ) -> Result<AuthOutcome, ServiceError> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        if !self.reachable {
            return Err(ServiceError::Unavailable("connection refused".to_string()));
        }
        if identifier == IDENTIFIER && secret.expose_secret() == SECRET {
            Ok(AuthOutcome::Accepted(SessionToken::new("token-1")))
        } else {
            Ok(AuthOutcome::Rejected)
        }
    }

    async fn query_registered_devices(
        &self,
        token: &SessionToken,
    ) -> Result<Vec<RawDevice>, ServiceError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        assert_eq!(token.expose(), "token-1");
        if self.malformed_query {
            return Err(ServiceError::Malformed("expected a device list".to_string()));
        }
        self.devices
            .clone()
            .ok_or_else(|| ServiceError::Unavailable("timed out".to_string()))
    }

    async fn terminate(&self, _token: &SessionToken) -> Result<(), ServiceError> {
        self.terminations.fetch_add(1, Ordering::SeqCst);
        if self.fail_logout {
            return Err(ServiceError::Unavailable("logout refused".to_string()));
        }
        Ok(())
    }
}
