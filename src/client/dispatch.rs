//! Request dispatch: one JSON POST per activation.

use super::error::ClientError;
use super::input::City;
use crate::model::{RecommendRequest, RecommendationResult};
use async_trait::async_trait;
use std::time::Duration;

/// Sends a city to the recommendation service and decodes the answer.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn dispatch(&self, city: &City) -> Result<RecommendationResult, ClientError>;
}

/// Options for [`HttpDispatcher`].
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub endpoint: String,
    /// `None` leaves the transport defaults in place.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl HttpOptions {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
            user_agent: concat!("crop-advisor/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// `reqwest`-backed dispatcher. No retries and no cancellation.
pub struct HttpDispatcher {
    endpoint: reqwest::Url,
    http: reqwest::Client,
}

impl HttpDispatcher {
    pub fn new(options: &HttpOptions) -> Result<Self, ClientError> {
        let endpoint = reqwest::Url::parse(&options.endpoint).map_err(|e| {
            ClientError::Transport(format!("invalid endpoint {}: {e}", options.endpoint))
        })?;

        let mut builder = reqwest::Client::builder().user_agent(options.user_agent.clone());
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    async fn dispatch(&self, city: &City) -> Result<RecommendationResult, ClientError> {
        tracing::debug!(city = %city, endpoint = %self.endpoint, "dispatching recommendation request");

        // `.json()` sets `Content-Type: application/json`.
        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&RecommendRequest {
                city: city.as_str(),
            })
            .send()
            .await?;

        let status = resp.status();
        let body_text = resp.text().await?;

        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                body: body_text,
            });
        }

        serde_json::from_str(&body_text).map_err(|e| ClientError::Decode(e.to_string()))
    }
}
