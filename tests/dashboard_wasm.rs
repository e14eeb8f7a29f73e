#![cfg(target_arch = "wasm32")]

use leptos::*;
use sentiment_dashboard::components::reviews_list::ReviewsList;
use sentiment_dashboard::models::Review;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mount_container(id: &str) -> web_sys::HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let container = document.create_element("div").unwrap();
    container.set_id(id);
    document.body().unwrap().append_child(&container).unwrap();
    container.unchecked_into()
}

fn review(id: &str, score: Option<f64>) -> Review {
    Review {
        id: id.into(),
        review_date: "2025-11-04T19:28:49.742+02:00".into(),
        user_email: format!("{}@example.com", id),
        review_text: "Arrived on time".into(),
        sentiment_score: score,
        created_at: "2025-11-04T17:28:50+00:00".into(),
    }
}

#[wasm_bindgen_test]
fn test_empty_list_placeholder() {
    let container = mount_container("empty-reviews");
    mount_to(container.clone(), || view! { <ReviewsList reviews=Vec::new() /> });

    let text = container.text_content().unwrap_or_default();
    assert!(text.contains("No reviews yet"));
    assert!(container.query_selector(".review-card").unwrap().is_none());
}

#[wasm_bindgen_test]
fn test_unscored_review_has_no_badge() {
    let container = mount_container("scored-reviews");
    let reviews = vec![review("scored", Some(3.2)), review("pending", None)];
    mount_to(container.clone(), move || view! { <ReviewsList reviews=reviews.clone() /> });

    let cards = container.query_selector_all(".review-card").unwrap();
    assert_eq!(cards.length(), 2);

    let badges = container.query_selector_all(".review-score").unwrap();
    assert_eq!(badges.length(), 1);
    let badge = container.query_selector(".review-score").unwrap().unwrap();
    assert_eq!(badge.text_content().unwrap_or_default(), "3.2");
    assert!(badge.class_list().contains("sentiment-text-bad"));
}
