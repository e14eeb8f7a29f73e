use leptos::*;
use crate::models::sentiment::{format_timestamp, OverallSentiment};

#[component]
pub fn OverallSentimentCard(sentiment: OverallSentiment) -> impl IntoView {
    let tier = sentiment.tier();
    let score = sentiment.display_score();
    let last_updated = format_timestamp(&sentiment.last_updated);
    let OverallSentiment {
        description,
        total_reviews,
        ..
    } = sentiment;

    view! {
        <section class=format!("sentiment-panel {}", tier.panel_class()) data-tier=tier.as_str()>
            <h2>{ "Overall Sentiment Score" }</h2>
            <div class=format!("overall-score {}", tier.text_class())>
                { score }
                <span class="score-scale">{ "/10" }</span>
            </div>
            <p class="overall-description">{ description }</p>
            <div class="overall-meta">
                <div>
                    <span class="meta-label">{ "Total Reviews:" }</span>
                    { format!(" {}", total_reviews) }
                </div>
                <div>
                    <span class="meta-label">{ "Last Updated:" }</span>
                    { format!(" {}", last_updated) }
                </div>
            </div>
        </section>
    }
}
