//! CSV and PDF downloads of the filtered response set.

use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Deserialize;
use surveydesk_core::dashboard::{DashboardEvent, DashboardState};
use surveydesk_core::export::{self, ExportFormat};

use crate::error::AppResult;
use crate::middleware::dashboard_auth::RequireDashboard;
use crate::state::AppState;

/// Query parameters for the export endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    /// Search term; the export covers every record it matches.
    #[serde(default)]
    pub q: String,
}

/// GET /responses/export.csv
pub async fn export_csv(
    State(state): State<AppState>,
    _gate: RequireDashboard,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    download(&state, &query, ExportFormat::Csv).await
}

/// GET /responses/export.pdf
pub async fn export_pdf(
    State(state): State<AppState>,
    _gate: RequireDashboard,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    download(&state, &query, ExportFormat::Pdf).await
}

async fn download(state: &AppState, query: &ExportQuery, format: ExportFormat) -> AppResult<Response> {
    let records = state.store.list_all().await?;
    let dashboard = DashboardState::new(state.config.page_size).apply_all([
        DashboardEvent::Authenticated,
        DashboardEvent::Loaded(records),
        DashboardEvent::SearchChanged(query.q.clone()),
    ]);
    let filtered = dashboard.filtered();

    let offset = state.config.export_offset;
    let body = match format {
        ExportFormat::Csv => export::csv::encode(&filtered).into_bytes(),
        ExportFormat::Pdf => export::pdf::encode(&filtered, offset),
    };
    let filename = export::export_filename(format, Utc::now(), offset);

    tracing::info!(
        format = format.extension(),
        rows = filtered.len(),
        %filename,
        "Exported survey responses"
    );

    Ok((
        [
            (CONTENT_TYPE, format.content_type().to_string()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
        ],
        body,
    )
        .into_response())
}
