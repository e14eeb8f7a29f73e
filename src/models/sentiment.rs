use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::deserialize_id;

/// The single rolled-up record the workflow rewrites after every review.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OverallSentiment {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub total_score: f64, // 0-10
    pub description: String,
    pub total_reviews: i64,
    pub last_updated: String,
}

impl OverallSentiment {
    pub fn tier(&self) -> SentimentTier {
        SentimentTier::from_score(self.total_score)
    }

    pub fn display_score(&self) -> String {
        format_score(self.total_score)
    }
}

/// Four-band classification of a 0-10 score. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentimentTier {
    Good,
    Fair,
    Poor,
    Bad,
}

impl SentimentTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            SentimentTier::Good
        } else if score >= 6.0 {
            SentimentTier::Fair
        } else if score >= 4.0 {
            SentimentTier::Poor
        } else {
            SentimentTier::Bad
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SentimentTier::Good => "good",
            SentimentTier::Fair => "fair",
            SentimentTier::Poor => "poor",
            SentimentTier::Bad => "bad",
        }
    }

    /// Class for the score text itself.
    pub fn text_class(self) -> &'static str {
        match self {
            SentimentTier::Good => "sentiment-text-good",
            SentimentTier::Fair => "sentiment-text-fair",
            SentimentTier::Poor => "sentiment-text-poor",
            SentimentTier::Bad => "sentiment-text-bad",
        }
    }

    /// Class for the background and border of the aggregate panel.
    pub fn panel_class(self) -> &'static str {
        match self {
            SentimentTier::Good => "sentiment-panel-good",
            SentimentTier::Fair => "sentiment-panel-fair",
            SentimentTier::Poor => "sentiment-panel-poor",
            SentimentTier::Bad => "sentiment-panel-bad",
        }
    }
}

pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// Short date and time in the viewer's time zone, e.g. `Nov 4, 2025, 07:28 PM`.
/// Values that do not parse are shown as they came.
pub fn format_timestamp(value: &str) -> String {
    parse_timestamp(value)
        .map(|at| at.with_timezone(&Local).format("%b %-d, %Y, %I:%M %p").to_string())
        .unwrap_or_else(|| value.to_string())
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Some(at.with_timezone(&Utc));
    }
    // `timestamp` columns without a zone come back bare; treat them as UTC.
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
