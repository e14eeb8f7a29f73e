// src/models/review.rs
use serde::{Deserialize, Serialize};

use super::deserialize_id;
use super::sentiment::{format_score, SentimentTier};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub review_date: String,          // Timestamp with offset, as stored
    pub user_email: String,
    pub review_text: String,
    pub sentiment_score: Option<f64>, // Filled in by the workflow once scored
    pub created_at: String,
}

impl Review {
    pub fn is_scored(&self) -> bool {
        self.sentiment_score.is_some()
    }

    pub fn tier(&self) -> Option<SentimentTier> {
        self.sentiment_score.map(SentimentTier::from_score)
    }

    /// Score with one decimal, `None` while the workflow has not scored the review.
    pub fn display_score(&self) -> Option<String> {
        self.sentiment_score.map(format_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unscored_review_from_row() {
        let review: Review = serde_json::from_value(json!({
            "id": "5f0c6a52-8d0e-4b5e-9d8c-3c1f1d3e7a10",
            "review_date": "2025-11-04T19:28:49.742+02:00",
            "user_email": "ana@example.com",
            "review_text": "Fast delivery, friendly staff.",
            "sentiment_score": null,
            "created_at": "2025-11-04T17:28:50.101+00:00"
        }))
        .unwrap();

        assert!(!review.is_scored());
        assert_eq!(review.tier(), None);
        assert_eq!(review.display_score(), None);
    }

    #[test]
    fn test_numeric_id_and_score() {
        let review: Review = serde_json::from_value(json!({
            "id": 42,
            "review_date": "2024-01-15T10:30:00Z",
            "user_email": "bo@example.org",
            "review_text": "Would not order again.",
            "sentiment_score": 2.3,
            "created_at": "2024-01-15T10:30:02Z"
        }))
        .unwrap();

        assert_eq!(review.id, "42");
        assert_eq!(review.tier(), Some(SentimentTier::Bad));
        assert_eq!(review.display_score().as_deref(), Some("2.3"));
    }
}
