pub mod dashboard;
pub mod overall_sentiment_card;
pub mod reviews_list;
