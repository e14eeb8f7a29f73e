use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::validation::ValidationError;
use crate::webhook::ForwardError;

pub const REVIEW_FAILURE: &str = "Failed to process review";

/// Everything a handler can fail with. Each variant renders its own JSON
/// envelope; none of them escape the handler boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("External workflow URL not configured")]
    Configuration { details: String },

    #[error("Failed to process review")]
    Upstream(#[source] ForwardError),

    #[error("{context}")]
    Internal { context: &'static str, details: String },
}

impl ApiError {
    pub fn internal(context: &'static str, err: impl std::fmt::Display) -> Self {
        ApiError::Internal {
            context,
            details: err.to_string(),
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            ApiError::Validation(_) => None,
            ApiError::Configuration { details } => Some(details.clone()),
            ApiError::Upstream(err) => Some(err.to_string()),
            ApiError::Internal { details, .. } => Some(details.clone()),
        }
    }
}

impl From<ForwardError> for ApiError {
    fn from(err: ForwardError) -> Self {
        match err {
            ForwardError::InvalidResponse(_) => ApiError::internal(REVIEW_FAILURE, err),
            other => ApiError::Upstream(other),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Configuration { .. } | ApiError::Upstream(_) | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
            details: self.details(),
        })
    }
}
