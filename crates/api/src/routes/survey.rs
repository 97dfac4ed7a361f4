//! Route definitions for the public survey pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::survey;
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// GET  /               -> show_form
/// POST /               -> submit_form
/// GET  /client-survey  -> show_client_form
/// POST /client-survey  -> submit_client_form
/// GET  /thank-you      -> thank_you
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(survey::show_form).post(survey::submit_form))
        .route(
            "/client-survey",
            get(survey::show_client_form).post(survey::submit_client_form),
        )
        .route("/thank-you", get(survey::thank_you))
}
