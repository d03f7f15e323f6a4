//! HTTP client for the account/device service

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{AccountService, AuthOutcome, RawDevice, ServiceError, SessionToken};
use crate::config::ServiceConfig;

/// Account service API client
pub struct AccountClient {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    identifier: &'a str,
    secret: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

/// The device listing comes back either bare or wrapped
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DevicesResponse {
    List(Vec<serde_json::Value>),
    Wrapped { devices: Vec<serde_json::Value> },
}

impl AccountClient {
    /// Create a new client with the configured timeouts
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl AccountService for AccountClient {
    async fn authenticate(
        &self,
        identifier: &str,
        secret: &SecretString,
    ) -> Result<AuthOutcome, ServiceError> {
        let url = self.url("/auth/login");
        let request = LoginRequest {
            identifier,
            secret: secret.expose_secret(),
        };

        debug!("Logging in to account service at {}", self.base_url);

        let response = match self.client.post(&url).json(&request).send().await {
            Ok(r) => r,
            Err(e) => {
                error!("Account service HTTP error: {}", e);
                return Err(ServiceError::Unavailable(e.to_string()));
            }
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            debug!("Account service rejected login ({})", status);
            return Ok(AuthOutcome::Rejected);
        }
        if !status.is_success() {
            return Err(ServiceError::Unavailable(format!(
                "login returned {}",
                status
            )));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Malformed(e.to_string()))?;

        match body.token {
            Some(token) if !token.is_empty() => {
                info!("Logged in to account service");
                Ok(AuthOutcome::Accepted(SessionToken::new(token)))
            }
            _ => Err(ServiceError::Malformed(
                "login response carried no token".to_string(),
            )),
        }
    }

    async fn query_registered_devices(
        &self,
        token: &SessionToken,
    ) -> Result<Vec<RawDevice>, ServiceError> {
        let url = self.url("/devices");

        debug!("Querying registered devices");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(|e| ServiceError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ServiceError::Unavailable(format!(
                "device query returned {}",
                response.status()
            )));
        }

        let body: DevicesResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Malformed(e.to_string()))?;

        let items = match body {
            DevicesResponse::List(items) | DevicesResponse::Wrapped { devices: items } => items,
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                serde_json::Value::Object(map) => Ok(map),
                _ => Err(ServiceError::Malformed(format!(
                    "device item {} is not an object",
                    index
                ))),
            })
            .collect()
    }

    async fn terminate(&self, token: &SessionToken) -> Result<(), ServiceError> {
        let url = self.url("/auth/logout");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(|e| ServiceError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ServiceError::Unavailable(format!(
                "logout returned {}",
                response.status()
            )));
        }

        info!("Logged out of account service");
        Ok(())
    }
}
