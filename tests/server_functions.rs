#![cfg(feature = "ssr")]

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use leptos::server_fn::ServerFn;
use leptos::*;
use sentiment_dashboard::api;
use sentiment_dashboard::dashboard::{load_dashboard, DashboardState, FetchOverallSentiment, FetchReviews};
use sentiment_dashboard::events::EventBus;
use sentiment_dashboard::state::AppState;
use serde_json::{json, Value};
use std::sync::Arc;

mod mocks;
use mocks::store_mock::{sample_overall, sample_review, MockStore};

const NO_SINGLE_ROW: &str = "JSON object requested, multiple (or no) rows returned";

fn state_with(store: MockStore) -> web::Data<AppState> {
    web::Data::new(AppState::new(None, Arc::new(store), EventBus::new(4)))
}

async fn call_server_fn(state: web::Data<AppState>, path: &str) -> (StatusCode, String) {
    let app = test::init_service(
        App::new()
            .app_data(state)
            .configure(api::configure)
            .route("/api/{tail:.*}", leptos_actix::handle_server_fns()),
    )
    .await;

    let request = test::TestRequest::post()
        .uri(path)
        .insert_header(("content-type", "application/x-www-form-urlencoded"))
        .insert_header(("accept", "application/json"))
        .to_request();
    let response = test::call_service(&app, request).await;
    let status = response.status();
    let body = test::read_body(response).await;
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[actix_web::test]
async fn test_overall_sentiment_through_server_fn() {
    let state = state_with(MockStore::empty());

    let (status, body) = call_server_fn(state, <FetchOverallSentiment as ServerFn>::PATH).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["id"], "1");
    assert_eq!(body["total_score"], 7.4);
    assert_eq!(body["total_reviews"], 2);
}

#[actix_web::test]
async fn test_reviews_through_server_fn() {
    let state = state_with(MockStore {
        overall: Ok(sample_overall()),
        reviews: Ok(vec![sample_review("9", Some(8.1)), sample_review("4", None)]),
    });

    let (status, body) = call_server_fn(state, <FetchReviews as ServerFn>::PATH).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|review| review["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["9", "4"]);
    assert_eq!(body[1]["sentiment_score"], json!(null));
}

#[actix_web::test]
async fn test_store_error_reaches_the_caller() {
    let state = state_with(MockStore {
        overall: Err(NO_SINGLE_ROW.into()),
        reviews: Ok(Vec::new()),
    });

    let (status, body) = call_server_fn(state, <FetchOverallSentiment as ServerFn>::PATH).await;

    assert!(status.is_server_error(), "{status}");
    assert!(body.contains(NO_SINGLE_ROW), "{body}");
}

/// Runs `load_dashboard` the way a server render would, with the request in context.
async fn load_with(store: MockStore) -> DashboardState {
    let runtime = create_runtime();
    let request = test::TestRequest::default()
        .app_data(state_with(store))
        .to_http_request();
    provide_context(request);

    let state = load_dashboard().await;
    runtime.dispose();
    state
}

#[actix_web::test]
async fn test_load_dashboard_ready() {
    let state = load_with(MockStore {
        overall: Ok(sample_overall()),
        reviews: Ok(vec![sample_review("3", Some(6.0))]),
    })
    .await;

    assert_eq!(
        state,
        DashboardState::Ready {
            overall: sample_overall(),
            reviews: vec![sample_review("3", Some(6.0))],
        }
    );
}

#[actix_web::test]
async fn test_load_dashboard_surfaces_database_message() {
    let state = load_with(MockStore {
        overall: Err(NO_SINGLE_ROW.into()),
        reviews: Ok(Vec::new()),
    })
    .await;
    assert_eq!(state, DashboardState::Error(NO_SINGLE_ROW.into()));

    let state = load_with(MockStore {
        overall: Ok(sample_overall()),
        reviews: Err("permission denied for table reviews".into()),
    })
    .await;
    assert_eq!(
        state,
        DashboardState::Error("permission denied for table reviews".into())
    );
}
