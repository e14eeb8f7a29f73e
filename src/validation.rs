use chrono::{DateTime, Timelike};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

lazy_static! {
    /// local@domain.tld, no whitespace and a single `@`
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex pattern");

    /// YYYY-MM-DDTHH:MM:SS[.mmm](Z|+HH:MM|-HH:MM)
    static ref REVIEW_DATE_REGEX: Regex = Regex::new(
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]{1,3})?(Z|[+-][0-9]{2}:[0-9]{2})$"
    )
    .expect("Invalid regex pattern");
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields: review_date, user_email, review_text")]
    MissingFields,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid date format. Use ISO 8601 format (e.g., 2025-11-04T19:28:49.742+02:00)")]
    InvalidDateFormat,

    #[error("Invalid date value. Date could not be parsed.")]
    InvalidDateValue,

    #[error("Review text cannot be empty")]
    EmptyReviewText,
}

/// Raw submission body. Every field is optional so that absence is reported
/// as a validation failure rather than a parse failure.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct ReviewSubmission {
    #[serde(default)]
    pub review_date: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub review_text: Option<String>,
}

/// Normalized payload handed to the external workflow.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidatedReview {
    pub review_date: String,
    pub user_email: String,
    pub review_text: String,
}

impl ReviewSubmission {
    pub fn validate(self) -> Result<ValidatedReview, ValidationError> {
        let (review_date, user_email, review_text) =
            match (present(self.review_date), present(self.user_email), present(self.review_text)) {
                (Some(date), Some(email), Some(text)) => (date, email, text),
                _ => return Err(ValidationError::MissingFields),
            };

        if !EMAIL_REGEX.is_match(&user_email) {
            return Err(ValidationError::InvalidEmail);
        }

        if !REVIEW_DATE_REGEX.is_match(&review_date) {
            return Err(ValidationError::InvalidDateFormat);
        }

        // The pattern admits month 13 or hour 25; the calendar check does not.
        // chrono keeps leap seconds (`:60`) as nanoseconds past one billion.
        match DateTime::parse_from_rfc3339(&review_date) {
            Ok(parsed) if parsed.nanosecond() < 1_000_000_000 => {}
            _ => return Err(ValidationError::InvalidDateValue),
        }

        let review_text = review_text.trim();
        if review_text.is_empty() {
            return Err(ValidationError::EmptyReviewText);
        }

        Ok(ValidatedReview {
            review_date,
            user_email,
            review_text: review_text.to_string(),
        })
    }
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
