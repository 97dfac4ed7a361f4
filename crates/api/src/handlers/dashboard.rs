//! Handlers for the password gate and the response dashboard.

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use surveydesk_core::dashboard::{
    DashboardEffect, DashboardEvent, DashboardState, ViewMode, LOAD_FAILED,
};
use surveydesk_core::gate::AuthState;
use surveydesk_core::types::DbId;

use crate::middleware::dashboard_auth::{auth_cookie, DashboardAuth};
use crate::state::AppState;
use crate::views;

/// Query parameters for the dashboard page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DashboardQuery {
    /// Search term, matched against name and email.
    pub q: Option<String>,
    /// 1-based page number.
    pub page: Option<usize>,
    /// `card` or `table`.
    pub view: Option<String>,
    /// Record open in the detail overlay.
    pub selected: Option<DbId>,
}

impl DashboardQuery {
    /// The UI events this query stands for, in the order a user would
    /// produce them.
    pub fn events(&self) -> Vec<DashboardEvent> {
        let mut events = Vec::new();
        if let Some(term) = &self.q {
            events.push(DashboardEvent::SearchChanged(term.clone()));
        }
        if let Some(page) = self.page {
            events.push(DashboardEvent::PageSelected(page));
        }
        if let Some(mode) = self.view.as_deref().and_then(ViewMode::parse) {
            events.push(DashboardEvent::ViewModeChanged(mode));
        }
        if let Some(id) = self.selected {
            events.push(DashboardEvent::Selected(id));
        }
        events
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

/// Authenticate a fresh dashboard session and run its one load.
pub async fn load_dashboard(state: &AppState) -> DashboardState {
    let (dashboard, effect) =
        DashboardState::new(state.config.page_size).apply(DashboardEvent::Authenticated);

    let Some(DashboardEffect::LoadAll) = effect else {
        return dashboard;
    };

    let event = match state.store.list_all().await {
        Ok(records) => {
            tracing::debug!(count = records.len(), "Loaded survey responses");
            DashboardEvent::Loaded(records)
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to load survey responses");
            DashboardEvent::LoadFailed(LOAD_FAILED.to_string())
        }
    };
    dashboard.apply(event).0
}

/// GET /responses
///
/// The password form until the dashboard flag is set, then the dashboard.
pub async fn show_dashboard(
    State(state): State<AppState>,
    DashboardAuth(auth): DashboardAuth,
    Query(query): Query<DashboardQuery>,
) -> Html<String> {
    if auth == AuthState::Unauthenticated {
        return Html(views::dashboard::login_page(None));
    }

    let dashboard = load_dashboard(&state).await.apply_all(query.events());
    Html(views::dashboard::dashboard_page(
        &dashboard,
        state.config.export_offset,
    ))
}

/// POST /responses/login
///
/// Sets the dashboard flag and redirects on a match. Re-renders the form
/// with an inline error otherwise.
pub async fn login(
    State(state): State<AppState>,
    DashboardAuth(current): DashboardAuth,
    Form(input): Form<LoginForm>,
) -> Response {
    match state.gate().attempt(current, &input.password) {
        (AuthState::Authenticated, _) => {
            tracing::info!("Dashboard unlocked");
            ([(SET_COOKIE, auth_cookie())], Redirect::to("/responses")).into_response()
        }
        (AuthState::Unauthenticated, message) => {
            tracing::warn!("Incorrect dashboard password");
            let page = views::dashboard::login_page(message);
            (StatusCode::UNAUTHORIZED, Html(page)).into_response()
        }
    }
}
