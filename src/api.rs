use std::convert::Infallible;
use std::time::Duration;

use actix_web::http::header;
use actix_web::web::{self, Bytes};
use actix_web::HttpResponse;
use log::{error, info, warn};
use serde::Serialize;
use serde_json::Value;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::{BroadcastStream, IntervalStream};
use tokio_stream::StreamExt;
use uuid::Uuid;

use crate::error::{ApiError, REVIEW_FAILURE};
use crate::events::DashboardEvent;
use crate::state::AppState;
use crate::validation::ReviewSubmission;

const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Mounts the JSON endpoints. Register before the server-function catch-all.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/reviews", web::post().to(submit_review))
        .route("/api/refresh", web::post().to(refresh))
        .route("/api/events", web::get().to(stream_events));
}

#[derive(Serialize, Debug)]
pub struct SuccessBody {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

pub async fn submit_review(
    state: web::Data<AppState>,
    body: Bytes,
) -> Result<HttpResponse, ApiError> {
    let request_id = Uuid::new_v4();

    let review = read_submission(&body)
        .map_err(|e| {
            error!("[API] {} Unreadable review body: {}", request_id, e);
            e
        })?
        .validate()
        .map_err(|e| {
            info!("[API] {} Rejected review: {}", request_id, e);
            e
        })?;

    let forwarder = state.forwarder.as_ref().ok_or_else(|| {
        error!("[API] {} No external workflow configured", request_id);
        ApiError::Configuration {
            details: "Set WORKFLOW_WEBHOOK_URL to the workflow's webhook address".into(),
        }
    })?;

    info!("[API] {} Forwarding review from {}", request_id, review.user_email);
    let data = forwarder.forward(&review).await.map_err(|e| {
        error!("[API] {} Error processing review: {}", request_id, e);
        ApiError::from(e)
    })?;

    Ok(HttpResponse::Ok().json(SuccessBody {
        success: true,
        message: "Review submitted successfully",
        data: Some(data),
    }))
}

/// Named fields only: a body that is valid JSON but not an object carries none
/// of them. `null` and unparsable bodies are internal failures.
fn read_submission(body: &[u8]) -> Result<ReviewSubmission, ApiError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::internal(REVIEW_FAILURE, e))?;
    match value {
        Value::Object(_) => {
            serde_json::from_value(value).map_err(|e| ApiError::internal(REVIEW_FAILURE, e))
        }
        Value::Null => Err(ApiError::internal(REVIEW_FAILURE, "request body is null")),
        _ => Ok(ReviewSubmission::default()),
    }
}

/// Called by the external workflow once it has written its results.
pub async fn refresh(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let listeners = state.events.publish(DashboardEvent::refresh_requested());
    info!("[API] Refresh signal received, {} dashboards notified", listeners);

    Ok(HttpResponse::Ok().json(SuccessBody {
        success: true,
        message: "Refresh signal received",
        data: None,
    }))
}

/// Server-Sent Events feed of table changes and refresh signals.
pub async fn stream_events(state: web::Data<AppState>) -> HttpResponse {
    let listener = Uuid::new_v4();
    info!("[EVENTS] Dashboard {} connected", listener);

    let updates = BroadcastStream::new(state.events.subscribe()).map(move |event| {
        let event = match event {
            Ok(event) => event,
            // Missed notifications collapse into one refresh.
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                warn!("[EVENTS] Dashboard {} lagged by {} events", listener, skipped);
                DashboardEvent::refresh_requested()
            }
        };
        Ok::<_, Infallible>(event.to_sse_frame())
    });

    let keep_alive = IntervalStream::new(tokio::time::interval(KEEP_ALIVE_INTERVAL))
        .map(|_| Ok::<_, Infallible>(Bytes::from_static(b": keep-alive\n\n")));

    // Browsers reconnect on their own; the opening frame lets them tell a
    // reconnect from the first connection.
    let greeting = tokio_stream::once(Ok::<_, Infallible>(DashboardEvent::connected().to_sse_frame()));

    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/event-stream"))
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .streaming(greeting.chain(updates.merge(keep_alive)))
}
