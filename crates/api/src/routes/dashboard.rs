//! Route definitions for the response dashboard.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{dashboard, export};
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// GET  /responses             -> show_dashboard  (?q, page, view, selected)
/// POST /responses/login       -> login
/// GET  /responses/export.csv  -> export_csv      (?q)
/// GET  /responses/export.pdf  -> export_pdf      (?q)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/responses", get(dashboard::show_dashboard))
        .route("/responses/login", post(dashboard::login))
        .route("/responses/export.csv", get(export::export_csv))
        .route("/responses/export.pdf", get(export::export_pdf))
}
