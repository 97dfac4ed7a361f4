pub mod dashboard;
pub mod health;
pub mod responses;
pub mod survey;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /responses    survey response submit and listing
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/responses", responses::router())
}

/// Server-rendered pages mounted at the root.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .merge(survey::router())
        .merge(dashboard::router())
}
