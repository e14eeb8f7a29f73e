//! The dashboard page: owns the view state, fetches on mount, on
//! every change notification and on demand, and renders whichever state is current.
use leptos::*;
use leptos::logging::{error, log};
use crate::components::overall_sentiment_card::OverallSentimentCard;
use crate::components::reviews_list::ReviewsList;
use crate::dashboard::{load_dashboard, DashboardState, RequestSequence};

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = create_rw_signal(DashboardState::Loading);
    let sequence = store_value(RequestSequence::default());

    let fetch_data = move || {
        let Some(ticket) = sequence.try_update_value(|sequence| sequence.issue()) else {
            return;
        };
        state.set(DashboardState::Loading);

        spawn_local(async move {
            let next = load_dashboard().await;
            if let DashboardState::Error(message) = &next {
                error!("[DASHBOARD] Error fetching data: {}", message);
            }
            // Overlapping fetches: only the newest one lands.
            if sequence.try_with_value(|sequence| sequence.is_latest(ticket)).unwrap_or(false) {
                state.try_set(next);
            } else {
                log!("[DASHBOARD] Discarding superseded fetch {:?}", ticket);
            }
        });
    };

    // Effects never run during server rendering; the first fetch happens after hydration.
    create_effect(move |_| untrack(fetch_data));

    #[cfg(any(feature = "hydrate", feature = "csr"))]
    crate::live_updates::subscribe_to_changes(move |channel| {
        log!("[DASHBOARD] Change on {}, refetching", channel);
        fetch_data();
    });

    view! {
        <DashboardView state=state on_refresh=Callback::new(move |_: ()| fetch_data()) />
    }
}

/// Pure rendering of a `DashboardState`.
#[component]
pub fn DashboardView(
    #[prop(into)] state: Signal<DashboardState>,
    on_refresh: Callback<()>,
) -> impl IntoView {
    move || match state.get() {
        DashboardState::Loading => view! {
            <div class="dashboard-shell dashboard-centered">
                <div class="loading">
                    <div class="spinner"></div>
                    <p class="loading-text">{ "Loading dashboard..." }</p>
                </div>
            </div>
        }
        .into_view(),
        DashboardState::Error(message) => view! {
            <div class="dashboard-shell dashboard-centered">
                <div class="error-banner" role="alert">
                    <h2>{ "Error" }</h2>
                    <p class="error-message">{ message }</p>
                    <button class="retry-button" on:click=move |_| on_refresh.call(())>
                        { "Retry" }
                    </button>
                </div>
            </div>
        }
        .into_view(),
        DashboardState::Ready { overall, reviews } => view! {
            <div class="dashboard-shell">
                <div class="dashboard">
                    <header class="dashboard-header">
                        <h1>{ "User Sentiment Dashboard" }</h1>
                        <p>{ "Real-time customer feedback analysis" }</p>
                    </header>
                    <OverallSentimentCard sentiment=overall />
                    <ReviewsList reviews=reviews />
                    <div class="refresh-row">
                        <button class="refresh-button" on:click=move |_| on_refresh.call(())>
                            { "Refresh Data" }
                        </button>
                    </div>
                </div>
            </div>
        }
        .into_view(),
    }
}
