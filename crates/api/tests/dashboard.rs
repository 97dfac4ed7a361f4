//! Integration tests for the password gate and the dashboard page.

mod common;

use std::sync::Arc;

use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::StatusCode;
use common::{
    body_text, build_test_app, get, get_authed, post_form, seeded_store, TEST_PASSWORD,
};
use surveydesk_db::store::MemoryResponseStore;

/// Count the page links in the pagination bar.
fn page_links(html: &str) -> usize {
    html.split("<nav class=\"pages\"")
        .nth(1)
        .map(|nav| nav.split("</nav>").next().unwrap_or("").matches("<a ").count())
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Test: the gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unauthenticated_visit_shows_password_form() {
    let app = build_test_app(seeded_store(3));
    let html = body_text(get(app, "/responses").await).await;

    assert!(html.contains("Enter Password"));
    assert!(!html.contains("User 1"));
}

#[tokio::test]
async fn correct_password_sets_flag_and_redirects() {
    let app = build_test_app(seeded_store(1));
    let response = post_form(app, "/responses/login", format!("password={TEST_PASSWORD}")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/responses");
    let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("dashboard_authenticated=true"));
}

#[tokio::test]
async fn wrong_password_is_rejected_inline() {
    let app = build_test_app(seeded_store(1));
    let response = post_form(app, "/responses/login", "password=nope").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert!(body_text(response).await.contains("Incorrect password."));
}

// ---------------------------------------------------------------------------
// Test: listing, search and pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dashboard_lists_newest_first_with_three_pages() {
    let app = build_test_app(seeded_store(45));
    let html = body_text(get_authed(app, "/responses").await).await;

    assert!(html.contains("Survey Report"));
    let first = html.find("User 1 ").unwrap();
    let second = html.find("User 2 ").unwrap();
    assert!(first < second);
    assert!(!html.contains("User 21 "));
    assert_eq!(page_links(&html), 3);
}

#[tokio::test]
async fn last_page_holds_the_remainder() {
    let app = build_test_app(seeded_store(45));
    let html = body_text(get_authed(app, "/responses?page=3").await).await;

    assert!(html.contains("User 41 "));
    assert!(html.contains("User 45 "));
    assert!(!html.contains("User 40 "));
    assert!(html.contains("aria-current=\"page\">3</a>"));
}

#[tokio::test]
async fn search_is_case_insensitive_over_name_and_email() {
    let app = build_test_app(seeded_store(45));
    let html = body_text(get_authed(app, "/responses?q=USER4%40").await).await;

    assert!(html.contains("User 4 "));
    assert!(!html.contains("User 5 "));
    assert_eq!(page_links(&html), 1);
}

#[tokio::test]
async fn huge_page_number_renders_an_empty_page() {
    let app = build_test_app(seeded_store(45));
    let response = get_authed(app, "/responses?page=18446744073709551615").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("No responses found."));
    assert!(!html.contains("User 1 "));
    assert_eq!(page_links(&html), 3);
}

#[tokio::test]
async fn search_term_is_matched_and_echoed_verbatim() {
    let app = build_test_app(seeded_store(45));
    let html = body_text(get_authed(app, "/responses?q=r%201%20").await).await;

    assert!(html.contains("name=\"q\" value=\"r 1 \""));
    assert!(html.contains("No responses found."));

    let app = build_test_app(seeded_store(45));
    let html = body_text(get_authed(app, "/responses?q=%20").await).await;
    assert!(html.contains("name=\"q\" value=\" \""));
}

#[tokio::test]
async fn empty_search_result_shows_notice() {
    let app = build_test_app(seeded_store(5));
    let html = body_text(get_authed(app, "/responses?q=nobody").await).await;

    assert!(html.contains("No responses found."));
    assert_eq!(page_links(&html), 0);
}

#[tokio::test]
async fn table_view_renders_humanized_headers() {
    let app = build_test_app(seeded_store(2));
    let html = body_text(get_authed(app, "/responses?view=table").await).await;

    assert!(html.contains("<th>brand Alignment</th>"));
    assert!(html.contains("<th>Submitted At</th>"));
    assert!(html.contains("2 Jan 2025, 08:33 am IST"));
}

// ---------------------------------------------------------------------------
// Test: detail overlay
// ---------------------------------------------------------------------------

#[tokio::test]
async fn selected_record_opens_detail_overlay() {
    let app = build_test_app(seeded_store(3));
    let html = body_text(get_authed(app, "/responses?selected=2").await).await;

    assert!(html.contains("<h2>Survey Detail</h2>"));
    assert!(html.contains("<p><strong>Email:</strong> user2@acme.io</p>"));
    assert!(html.contains("Suggestion 2"));
}

#[tokio::test]
async fn selection_outside_filter_is_ignored() {
    let app = build_test_app(seeded_store(3));
    let html = body_text(get_authed(app, "/responses?q=user1%40&selected=2").await).await;

    assert!(!html.contains("Survey Detail"));
}

// ---------------------------------------------------------------------------
// Test: load failure is visible
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_failure_shows_error_banner() {
    let store = Arc::new(MemoryResponseStore::new());
    store.set_fail_reads(true);
    let app = build_test_app(store);

    let response = get_authed(app, "/responses").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Could not load responses. Please try again."));
    assert!(html.contains("No responses found."));
}
