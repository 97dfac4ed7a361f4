//! Cookie-backed dashboard flag extractors.
//!
//! The flag is a UI convenience that mirrors the client-side "authenticated"
//! marker. It carries no identity and never expires.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use surveydesk_core::error::CoreError;
use surveydesk_core::gate::AuthState;

use crate::error::AppError;

/// Name of the persisted dashboard flag.
pub const AUTH_COOKIE: &str = "dashboard_authenticated";

/// Ten years. The flag has no expiry and no logout.
const AUTH_COOKIE_MAX_AGE: u64 = 10 * 365 * 24 * 60 * 60;

/// `Set-Cookie` value written after a successful password attempt.
pub fn auth_cookie() -> String {
    format!("{AUTH_COOKIE}=true; Path=/; Max-Age={AUTH_COOKIE_MAX_AGE}; SameSite=Lax")
}

/// Read the flag from every `Cookie` header on the request.
pub fn auth_state(headers: &HeaderMap) -> AuthState {
    let found = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == AUTH_COOKIE && value == "true");
    if found {
        AuthState::Authenticated
    } else {
        AuthState::Unauthenticated
    }
}

/// The caller's gate state. Never rejects.
///
/// ```ignore
/// async fn page(DashboardAuth(auth): DashboardAuth) -> Html<String> { .. }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DashboardAuth(pub AuthState);

impl<S: Send + Sync> FromRequestParts<S> for DashboardAuth {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(DashboardAuth(auth_state(&parts.headers)))
    }
}

/// Requires the dashboard flag. Rejects with 401 JSON otherwise.
#[derive(Debug, Clone, Copy)]
pub struct RequireDashboard;

impl<S: Send + Sync> FromRequestParts<S> for RequireDashboard {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match auth_state(&parts.headers) {
            AuthState::Authenticated => Ok(RequireDashboard),
            AuthState::Unauthenticated => Err(AppError::Core(CoreError::Unauthorized(
                "Dashboard password required".into(),
            ))),
        }
    }
}
