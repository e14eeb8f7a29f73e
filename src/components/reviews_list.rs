use leptos::*;
use crate::models::review::Review;
use crate::models::sentiment::format_timestamp;

/// Newest-first list of reviews, or a placeholder when there are none.
#[component]
pub fn ReviewsList(reviews: Vec<Review>) -> impl IntoView {
    let body = if reviews.is_empty() {
        view! {
            <div class="reviews-empty">
                <p class="reviews-empty-title">{ "No reviews yet" }</p>
                <p>{ "Reviews will appear here as they are submitted" }</p>
            </div>
        }
        .into_view()
    } else {
        view! {
            <ul class="reviews-list">
                {
                    reviews.into_iter().map(|review| {
                        view! { <ReviewCard review=review /> }
                    }).collect::<Vec<_>>()
                }
            </ul>
        }
        .into_view()
    };

    view! {
        <section class="reviews-panel">
            <h2>{ "Recent Reviews" }</h2>
            { body }
        </section>
    }
}

#[component]
pub fn ReviewCard(review: Review) -> impl IntoView {
    // Unscored reviews show no badge at all.
    let score = review.tier().zip(review.display_score()).map(|(tier, score)| {
        view! { <div class=format!("review-score {}", tier.text_class())>{ score }</div> }
    });
    let review_date = format_timestamp(&review.review_date);

    view! {
        <li class="review-card" data-review-id=review.id>
            <div class="review-header">
                <div>
                    <p class="review-email">{ review.user_email }</p>
                    <p class="review-date">{ review_date }</p>
                </div>
                { score }
            </div>
            <p class="review-text">{ review.review_text }</p>
        </li>
    }
}
