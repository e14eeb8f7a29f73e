pub mod change;
pub mod review;
pub mod sentiment;

use serde::{Deserialize, Deserializer};

pub use change::{ChangeKind, Table, TableChange};
pub use review::Review;
pub use sentiment::{OverallSentiment, SentimentTier};

/// Row identifiers come back either as uuid text or as bigint numbers
/// depending on how the table was created; both are carried as strings.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
