//! Device listing against an active session

use std::sync::Arc;

use tracing::{debug, info};

use super::record::{normalize, DeviceCollection};
use crate::error::ListFailure;
use crate::service::{AccountService, ServiceError};
use crate::session::Session;

/// Runs the registered-devices query for a session
pub struct DeviceLister {
    service: Arc<dyn AccountService>,
}

impl DeviceLister {
    pub fn new(service: Arc<dyn AccountService>) -> Self {
        Self { service }
    }

    /// Fetch and normalize every registered device in a single round trip.
    ///
    /// Either the whole collection normalizes or the call fails; items are
    /// never silently dropped.
    pub async fn list(&self, session: &Session) -> Result<DeviceCollection, ListFailure> {
        let token = session.active_token().ok_or(ListFailure::InvalidSession)?;

        let items = self
            .service
            .query_registered_devices(token)
            .await
            .map_err(|e| match e {
                ServiceError::Unavailable(reason) => ListFailure::ServiceUnavailable(reason),
                ServiceError::Malformed(reason) => ListFailure::MalformedResponse(reason),
            })?;

        debug!("Service returned {} device items", items.len());

        let devices = normalize(&items)?;
        info!("Listed {} registered devices", devices.len());
        Ok(devices)
    }
}
