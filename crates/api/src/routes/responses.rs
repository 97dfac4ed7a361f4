//! Route definitions for the `/responses` JSON resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::responses;
use crate::state::AppState;

/// Routes mounted at `/api/v1/responses`.
///
/// ```text
/// GET  /  -> list    (?q, page; requires the dashboard flag)
/// POST /  -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(responses::list).post(responses::create))
}
