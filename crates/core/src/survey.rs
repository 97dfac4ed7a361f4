//! Survey response records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rating::RatingKey;
use crate::types::{DbId, Timestamp};

/// A persisted survey response.
///
/// `responses` holds ratings exactly as stored, keyed by wire name. The
/// submission-time invariants are not re-checked on read, so lookups go
/// through [`SurveyResponse::rating`] which tolerates missing keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub responses: BTreeMap<String, String>,
    pub suggestions: Option<String>,
    pub created_at: Timestamp,
}

impl SurveyResponse {
    /// The email's domain segment, empty when there is no `@`.
    pub fn domain(&self) -> &str {
        email_domain(&self.email)
    }

    /// Stored value for `key`, or `""` if the record lacks it.
    pub fn rating(&self, key: RatingKey) -> &str {
        self.responses
            .get(key.as_str())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Suggestions text, empty when absent.
    pub fn suggestions_text(&self) -> &str {
        self.suggestions.as_deref().unwrap_or("")
    }

    /// Case-insensitive substring match on name or email.
    ///
    /// `folded_term` must already be lowercased.
    pub fn matches_folded(&self, folded_term: &str) -> bool {
        self.name.to_lowercase().contains(folded_term)
            || self.email.to_lowercase().contains(folded_term)
    }
}

/// The normalized payload sent to the store on submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSurveyResponse {
    pub name: String,
    pub email: String,
    pub responses: BTreeMap<RatingKey, String>,
    pub suggestions: String,
}

impl NewSurveyResponse {
    /// Ratings keyed by wire name, the shape the store persists.
    pub fn responses_by_name(&self) -> BTreeMap<String, String> {
        self.responses
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.clone()))
            .collect()
    }
}

/// Text between the first `@` and the next one (or the end of `email`).
pub fn email_domain(email: &str) -> &str {
    email.split('@').nth(1).unwrap_or("")
}
