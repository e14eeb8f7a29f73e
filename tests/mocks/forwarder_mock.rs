use async_trait::async_trait;
use sentiment_dashboard::validation::ValidatedReview;
use sentiment_dashboard::webhook::{ForwardError, ReviewForwarder};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Stands in for the external workflow: records what it was sent and
/// answers with a canned JSON body or a failing status code.
pub struct RecordingForwarder {
    received: Mutex<Vec<ValidatedReview>>,
    response: Result<Value, u16>,
}

impl RecordingForwarder {
    pub fn answering(response: Value) -> Arc<Self> {
        Arc::new(Self {
            received: Mutex::new(Vec::new()),
            response: Ok(response),
        })
    }

    pub fn failing_with(status: u16) -> Arc<Self> {
        Arc::new(Self {
            received: Mutex::new(Vec::new()),
            response: Err(status),
        })
    }

    pub fn received(&self) -> Vec<ValidatedReview> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReviewForwarder for RecordingForwarder {
    async fn forward(&self, review: &ValidatedReview) -> Result<Value, ForwardError> {
        self.received.lock().unwrap().push(review.clone());
        match &self.response {
            Ok(body) => Ok(body.clone()),
            Err(status) => Err(ForwardError::Status(*status)),
        }
    }
}
