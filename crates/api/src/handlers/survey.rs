//! Handlers for the public survey pages.
//!
//! Both entry points render the same form and share one submit path; they
//! differ only in the preset slider value.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use surveydesk_core::form::{FieldUpdate, FormEffect, FormEvent, FormState, SurveyForm};

use crate::state::AppState;
use crate::views;

/// Slider preset on `/`.
const ROOT_DEFAULT_RATING: &str = "0";
/// Slider preset on `/client-survey`.
const CLIENT_DEFAULT_RATING: &str = "3";

/// GET /
pub async fn show_form() -> Html<String> {
    render_fresh("/", ROOT_DEFAULT_RATING)
}

/// GET /client-survey
pub async fn show_client_form() -> Html<String> {
    render_fresh("/client-survey", CLIENT_DEFAULT_RATING)
}

/// POST /
pub async fn submit_form(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    submit(&state, "/", fields).await
}

/// POST /client-survey
pub async fn submit_client_form(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    submit(&state, "/client-survey", fields).await
}

/// GET /thank-you
pub async fn thank_you() -> Html<String> {
    Html(views::survey::thank_you_page())
}

fn render_fresh(action: &str, default_rating: &str) -> Html<String> {
    let state = FormState::new(SurveyForm::with_default_rating(default_rating));
    Html(views::survey::form_page(action, &state))
}

/// Replay the posted fields into a blank form and run one submit cycle.
///
/// Ratings start empty so a missing slider is reported rather than silently
/// defaulted. Unknown field names are ignored.
pub fn replay_fields(fields: Vec<(String, String)>) -> FormState {
    fields
        .into_iter()
        .filter_map(|(name, value)| FieldUpdate::from_field(&name, value))
        .fold(
            FormState::new(SurveyForm::with_default_rating("")),
            |state, update| state.apply(FormEvent::Update(update)).0,
        )
}

async fn submit(state: &AppState, action: &str, fields: Vec<(String, String)>) -> Response {
    let (submitting, effect) = replay_fields(fields).apply(FormEvent::Submit);

    let Some(FormEffect::Insert(record)) = effect else {
        tracing::warn!(
            errors = submitting.errors.len(),
            "Survey submission failed validation"
        );
        let page = views::survey::form_page(action, &submitting);
        return (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response();
    };

    match state.store.insert(record).await {
        Ok(created) => {
            tracing::info!(id = created.id, "Survey response submitted");
            Redirect::to("/thank-you").into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to store survey response");
            let (failed, _) = submitting.apply(FormEvent::InsertFailed);
            let page = views::survey::form_page(action, &failed);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(page)).into_response()
        }
    }
}
