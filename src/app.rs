/// Root component for the sentiment dashboard.
/// Sets up page metadata and routes the index page to the dashboard.
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use crate::components::dashboard::Dashboard;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/sentiment_dashboard.css" />
        <Title text="User Sentiment Dashboard" />
        <Link rel="icon" type_="image/svg+xml" href="/favicon.svg" />
        <Router>
            <main>
                <Routes>
                    // The dashboard is the only page.
                    <Route path="" view=Dashboard />
                </Routes>
            </main>
        </Router>
    }
}
