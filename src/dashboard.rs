//! Data side of the dashboard page: the three view states, the fetch that
//! moves between them, and the server functions that reach the database.
use leptos::*;

use crate::models::{OverallSentiment, Review};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DashboardState {
    #[default]
    Loading,
    Error(String),
    Ready {
        overall: OverallSentiment,
        reviews: Vec<Review>,
    },
}

impl DashboardState {
    /// A refresh cycle succeeds only when both reads do; the first failure wins.
    pub fn from_results(
        overall: Result<OverallSentiment, String>,
        reviews: Result<Vec<Review>, String>,
    ) -> Self {
        match (overall, reviews) {
            (Ok(overall), Ok(reviews)) => DashboardState::Ready { overall, reviews },
            (Err(message), _) | (_, Err(message)) => DashboardState::Error(message),
        }
    }
}

/// Issued to every fetch; only the most recent one may publish its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default, Clone)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

#[server(FetchOverallSentiment, "/api")]
pub async fn fetch_overall_sentiment() -> Result<OverallSentiment, ServerFnError> {
    let state = app_state().await?;
    state.store.fetch_overall_sentiment().await.map_err(|err| {
        log::warn!("[DASHBOARD] Overall sentiment unavailable: {}", err);
        ServerFnError::new(err)
    })
}

#[server(FetchReviews, "/api")]
pub async fn fetch_reviews() -> Result<Vec<Review>, ServerFnError> {
    let state = app_state().await?;
    state.store.fetch_reviews().await.map_err(|err| {
        log::warn!("[DASHBOARD] Reviews unavailable: {}", err);
        ServerFnError::new(err)
    })
}

#[cfg(feature = "ssr")]
async fn app_state() -> Result<actix_web::web::Data<crate::state::AppState>, ServerFnError> {
    leptos_actix::extract().await
}

/// One refresh cycle: the aggregate first, the reviews only if that worked.
pub async fn load_dashboard() -> DashboardState {
    let overall = match fetch_overall_sentiment().await {
        Ok(overall) => overall,
        Err(err) => return DashboardState::Error(failure_message(err)),
    };
    let reviews = fetch_reviews().await.map_err(failure_message);
    DashboardState::from_results(Ok(overall), reviews)
}

fn failure_message(err: ServerFnError) -> String {
    match err {
        ServerFnError::ServerError(message) => message,
        other => other.to_string(),
    }
}
