use serde::{Deserialize, Serialize};

/// Event names shared by the server-side event stream and the browser.
pub const REVIEWS_CHANNEL: &str = "reviews";
pub const SENTIMENT_CHANNEL: &str = "overall_sentiment";
pub const REFRESH_CHANNEL: &str = "refresh";
/// First frame of every event-stream connection.
pub const CONNECTED_CHANNEL: &str = "connected";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Reviews,
    OverallSentiment,
}

impl Table {
    pub const ALL: [Table; 2] = [Table::Reviews, Table::OverallSentiment];

    pub fn name(self) -> &'static str {
        match self {
            Table::Reviews => REVIEWS_CHANNEL,
            Table::OverallSentiment => SENTIMENT_CHANNEL,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// One row-level change observed on a backing table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TableChange {
    pub table: Table,
    pub kind: ChangeKind,
    pub id: String,
}
