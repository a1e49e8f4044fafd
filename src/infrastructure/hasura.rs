use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::{domain::query::GraphQlQuery, infrastructure::config::HasuraConfig};

pub const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";

/// Parsed GraphQL response body. `errors` is kept raw so it can be logged as sent.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct BackendResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Value>,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("backend request failed: {message}")]
    Network { message: String },
    #[error("backend request timed out after {0:?}")]
    Timeout(Duration),
    #[error("backend responded with HTTP {status}")]
    Status { status: u16, body: String },
    #[error("backend response could not be decoded: {message}")]
    Decode { message: String, body: String },
}

impl TransportError {
    /// Raw backend body, when one was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            TransportError::Status { body, .. } | TransportError::Decode { body, .. } => {
                Some(body.as_str())
            }
            TransportError::Network { .. } | TransportError::Timeout(_) => None,
        }
    }
}

#[async_trait]
pub trait GraphQlBackend: Send + Sync {
    async fn execute(&self, query: &GraphQlQuery) -> Result<BackendResponse, TransportError>;
}

#[derive(Debug)]
pub struct HasuraClient {
    client: reqwest::Client,
    endpoint: Url,
    admin_secret: SecretString,
    timeout: Duration,
}

impl HasuraClient {
    pub fn new(config: &HasuraConfig) -> anyhow::Result<Self> {
        let endpoint = Url::parse(&config.url)
            .with_context(|| format!("invalid Hasura URL: {}", config.url))?;
        let timeout = config.timeout();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build Hasura HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            admin_secret: SecretString::from(config.admin_secret.clone()),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Network {
                message: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl GraphQlBackend for HasuraClient {
    async fn execute(&self, query: &GraphQlQuery) -> Result<BackendResponse, TransportError> {
        debug!(operation = query.operation, endpoint = %self.endpoint, "sending GraphQL query");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ADMIN_SECRET_HEADER, self.admin_secret.expose_secret())
            .json(query)
            .send()
            .await
            .map_err(|err| self.request_error(err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.request_error(err))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|err| TransportError::Decode {
            message: err.to_string(),
            body,
        })
    }
}
