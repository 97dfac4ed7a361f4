//! HTTP surface for surveydesk: the public survey form, the password-gated
//! response dashboard with CSV/PDF downloads, and a small JSON API.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod views;
