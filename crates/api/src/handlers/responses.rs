//! Handlers for the `/api/v1/responses` resource.

use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use surveydesk_core::dashboard::{DashboardEvent, DashboardState};
use surveydesk_core::form::{FieldUpdate, FormEffect, FormEvent, FormState, SurveyForm, TextField};
use surveydesk_core::rating::RatingKey;
use surveydesk_core::survey::SurveyResponse;

use crate::error::{AppError, AppResult};
use crate::handlers::dashboard::DashboardQuery;
use crate::middleware::dashboard_auth::RequireDashboard;
use crate::response::DataResponse;
use crate::state::AppState;

/// JSON body for a new survey response.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateSurveyResponse {
    pub name: String,
    pub email: String,
    /// Rating key (wire name) to value.
    pub responses: BTreeMap<String, String>,
    pub suggestions: String,
}

impl CreateSurveyResponse {
    /// Feed the body through the form controller as field updates.
    fn into_form_state(self) -> AppResult<FormState> {
        let mut updates = vec![
            FieldUpdate::Text(TextField::Name, self.name),
            FieldUpdate::Text(TextField::Email, self.email),
            FieldUpdate::Text(TextField::Suggestions, self.suggestions),
        ];
        for (key, value) in self.responses {
            let key = RatingKey::parse(&key)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown rating key: {key}")))?;
            updates.push(FieldUpdate::Rating(key, value));
        }

        Ok(updates.into_iter().fold(
            FormState::new(SurveyForm::with_default_rating("")),
            |state, update| state.apply(FormEvent::Update(update)).0,
        ))
    }
}

/// One page of the filtered listing.
#[derive(Debug, Serialize)]
pub struct ResponsePage {
    pub items: Vec<SurveyResponse>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

/// POST /api/v1/responses
///
/// Validates and stores one response. Returns 400 with a `fields` map when
/// validation fails.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSurveyResponse>,
) -> AppResult<(StatusCode, Json<DataResponse<SurveyResponse>>)> {
    let (submitting, effect) = input.into_form_state()?.apply(FormEvent::Submit);

    let Some(FormEffect::Insert(record)) = effect else {
        tracing::warn!(
            errors = submitting.errors.len(),
            "Survey submission failed validation"
        );
        return Err(AppError::InvalidForm(submitting.errors));
    };

    let created = state.store.insert(record).await?;
    tracing::info!(id = created.id, "Survey response submitted");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/responses
///
/// Newest first, filtered by `q` and windowed by `page`.
pub async fn list(
    State(state): State<AppState>,
    _gate: RequireDashboard,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<DataResponse<ResponsePage>>> {
    let records = state.store.list_all().await?;
    tracing::debug!(count = records.len(), "Loaded survey responses");
    let dashboard = DashboardState::new(state.config.page_size)
        .apply_all([DashboardEvent::Authenticated, DashboardEvent::Loaded(records)])
        .apply_all(query.events());
    let view = dashboard.page_view();

    Ok(Json(DataResponse {
        data: ResponsePage {
            items: view.items.into_iter().cloned().collect(),
            page: view.page,
            total_pages: view.total_pages,
            total: view.total,
        },
    }))
}
