//! Survey response row model.

use std::collections::BTreeMap;

use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use surveydesk_core::survey::SurveyResponse;
use surveydesk_core::types::{DbId, Timestamp};

/// A row from the `survey_responses` table.
///
/// `responses` is read as raw JSON: rows written by older clients may hold
/// numbers or other non-string ratings.
#[derive(Debug, Clone, FromRow)]
pub struct SurveyResponseRow {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub responses: Json<Value>,
    pub suggestions: Option<String>,
    pub created_at: Timestamp,
}

impl From<SurveyResponseRow> for SurveyResponse {
    fn from(row: SurveyResponseRow) -> Self {
        SurveyResponse {
            id: row.id,
            name: row.name,
            email: row.email,
            responses: ratings_as_text(row.responses.0),
            suggestions: row.suggestions,
            created_at: row.created_at,
        }
    }
}

/// Flatten a stored ratings object into text values.
///
/// Strings pass through, `null` entries are dropped and any other value is
/// kept as its JSON text. A column that is not an object reads as empty.
pub fn ratings_as_text(value: Value) -> BTreeMap<String, String> {
    let Value::Object(map) = value else {
        return BTreeMap::new();
    };
    map.into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some((key, text)),
            Value::Null => None,
            other => Some((key, other.to_string())),
        })
        .collect()
}
