pub mod dashboard_auth;
