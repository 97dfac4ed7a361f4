use chrono::FixedOffset;
use surveydesk_core::export::{export_offset, DEFAULT_UTC_OFFSET_MINUTES};
use surveydesk_core::listing::DEFAULT_PAGE_SIZE;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Password for the response dashboard gate.
    pub dashboard_password: String,
    /// Rows per dashboard page (default: `20`).
    pub page_size: usize,
    /// Fixed timezone for export filenames and displayed dates.
    pub export_offset: FixedOffset,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                 |
    /// |-----------------------------|-------------------------|
    /// | `HOST`                      | `0.0.0.0`               |
    /// | `PORT`                      | `3000`                  |
    /// | `CORS_ORIGINS`              | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                    |
    /// | `DASHBOARD_PASSWORD`        | `madme123`              |
    /// | `DASHBOARD_PAGE_SIZE`       | `20`                    |
    /// | `EXPORT_UTC_OFFSET_MINUTES` | `330` (IST)             |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let dashboard_password =
            std::env::var("DASHBOARD_PASSWORD").unwrap_or_else(|_| "madme123".into());

        let page_size: usize = std::env::var("DASHBOARD_PAGE_SIZE")
            .unwrap_or_else(|_| DEFAULT_PAGE_SIZE.to_string())
            .parse()
            .expect("DASHBOARD_PAGE_SIZE must be a valid usize");
        assert!(page_size > 0, "DASHBOARD_PAGE_SIZE must be at least 1");

        let offset_minutes: i32 = std::env::var("EXPORT_UTC_OFFSET_MINUTES")
            .unwrap_or_else(|_| DEFAULT_UTC_OFFSET_MINUTES.to_string())
            .parse()
            .expect("EXPORT_UTC_OFFSET_MINUTES must be a valid i32");
        let export_offset = export_offset(offset_minutes)
            .unwrap_or_else(|e| panic!("EXPORT_UTC_OFFSET_MINUTES: {e}"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            dashboard_password,
            page_size,
            export_offset,
        }
    }
}
