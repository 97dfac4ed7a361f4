//! Export encodings for the filtered response set.
//!
//! Both encoders are pure: they take the records to export plus the fixed
//! timezone used for human-readable dates, and return the file payload.
//! Callers pass the *current* filtered set; nothing here reads or mutates
//! dashboard state.

pub mod csv;
pub mod pdf;

use chrono::FixedOffset;
use serde::Serialize;

use crate::error::CoreError;
use crate::rating::RatingKey;
use crate::survey::SurveyResponse;
use crate::types::Timestamp;

/// Stem shared by every export filename.
pub const FILE_STEM: &str = "survey_responses";

/// Default export timezone: India Standard Time, UTC+05:30.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

/// Supported download formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// Build the fixed export offset from a minute count east of UTC.
pub fn export_offset(minutes: i32) -> Result<FixedOffset, CoreError> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| CoreError::Validation(format!("UTC offset out of range: {minutes} minutes")))
}

/// `YYYY-MM-DD_HH-MM` for `now` in `offset`.
pub fn filename_timestamp(now: Timestamp, offset: FixedOffset) -> String {
    now.with_timezone(&offset)
        .format("%Y-%m-%d_%H-%M")
        .to_string()
}

/// `survey_responses_<timestamp>.<ext>`.
pub fn export_filename(format: ExportFormat, now: Timestamp, offset: FixedOffset) -> String {
    format!(
        "{FILE_STEM}_{}.{}",
        filename_timestamp(now, offset),
        format.extension()
    )
}

/// Localized date-time used by the document export and the dashboard,
/// e.g. `2 Jan 2025, 08:34 am`.
pub fn human_datetime(ts: Timestamp, offset: FixedOffset) -> String {
    ts.with_timezone(&offset)
        .format("%-d %b %Y, %I:%M %P")
        .to_string()
}

/// Cells of one exported row: name, email, domain, timestamp, one value per
/// rating key, suggestions.
pub(crate) fn row_cells(record: &SurveyResponse, created_at: String) -> Vec<String> {
    let mut cells = Vec::with_capacity(RatingKey::ALL.len() + 5);
    cells.push(record.name.clone());
    cells.push(record.email.clone());
    cells.push(record.domain().to_string());
    cells.push(created_at);
    cells.extend(RatingKey::ALL.iter().map(|k| record.rating(*k).to_string()));
    cells.push(record.suggestions_text().to_string());
    cells
}
