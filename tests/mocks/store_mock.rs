use async_trait::async_trait;
use sentiment_dashboard::db::{SentimentStore, StoreError, TableSnapshot};
use sentiment_dashboard::models::{OverallSentiment, Review, Table};

/// Fixed answers for the two dashboard reads; snapshots are always empty.
pub struct MockStore {
    pub overall: Result<OverallSentiment, String>,
    pub reviews: Result<Vec<Review>, String>,
}

impl MockStore {
    pub fn empty() -> Self {
        Self {
            overall: Ok(sample_overall()),
            reviews: Ok(Vec::new()),
        }
    }
}

fn query_error(message: &str) -> StoreError {
    StoreError::Query {
        status: 406,
        message: message.to_string(),
    }
}

#[async_trait]
impl SentimentStore for MockStore {
    async fn fetch_overall_sentiment(&self) -> Result<OverallSentiment, StoreError> {
        self.overall.clone().map_err(|message| query_error(&message))
    }

    async fn fetch_reviews(&self) -> Result<Vec<Review>, StoreError> {
        self.reviews.clone().map_err(|message| query_error(&message))
    }

    async fn snapshot(&self, _table: Table) -> Result<TableSnapshot, StoreError> {
        Ok(TableSnapshot::new())
    }
}

pub fn sample_overall() -> OverallSentiment {
    OverallSentiment {
        id: "1".into(),
        total_score: 7.4,
        description: "Customers are mostly happy".into(),
        total_reviews: 2,
        last_updated: "2025-11-04T17:30:00+00:00".into(),
    }
}

pub fn sample_review(id: &str, score: Option<f64>) -> Review {
    Review {
        id: id.into(),
        review_date: "2025-11-04T19:28:49.742+02:00".into(),
        user_email: format!("reviewer{}@example.com", id),
        review_text: format!("Review number {}", id),
        sentiment_score: score,
        created_at: "2025-11-04T17:28:50+00:00".into(),
    }
}
