use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::validation::ValidatedReview;

#[derive(Error, Debug)]
pub enum ForwardError {
    #[error("External workflow failed with status {0}")]
    Status(u16),

    #[error("External workflow request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("External workflow returned an invalid response: {0}")]
    InvalidResponse(#[source] reqwest::Error),
}

/// Hands a validated review to whatever scores it.
#[async_trait]
pub trait ReviewForwarder: Send + Sync {
    async fn forward(&self, review: &ValidatedReview) -> Result<Value, ForwardError>;
}

/// Posts reviews to the external workflow's webhook.
#[derive(Clone)]
pub struct WorkflowClient {
    client: Client,
    url: String,
}

impl WorkflowClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ReviewForwarder for WorkflowClient {
    async fn forward(&self, review: &ValidatedReview) -> Result<Value, ForwardError> {
        debug!("[WORKFLOW] POST {} for {}", self.url, review.user_email);

        let response = self
            .client
            .post(&self.url)
            .json(review)
            .send()
            .await
            .map_err(ForwardError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!("[WORKFLOW] Webhook answered {}", status);
            return Err(ForwardError::Status(status.as_u16()));
        }

        response.json::<Value>().await.map_err(ForwardError::InvalidResponse)
    }
}
