//! Survey form controller.
//!
//! The form is a value: every edit produces a new [`SurveyForm`] and leaves
//! the previous one untouched. Submission is driven through [`FormState`],
//! whose transitions hand back the store call to perform as a
//! [`FormEffect`] instead of performing it.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::rating::{parse_rating, RatingKey};
use crate::survey::NewSurveyResponse;

// ---------------------------------------------------------------------------
// Validation constants
// ---------------------------------------------------------------------------

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email";
pub const RATING_REQUIRED: &str = "Required";
pub const RATING_OUT_OF_RANGE: &str = "Must be a rating from 0 to 5";

/// Alert text shown when the store rejects an insert.
pub const SUBMISSION_FAILED: &str = "Submission failed.";

/// Rating every slider starts at on the main survey page.
pub const DEFAULT_RATING: &str = "0";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid regex"));

// ---------------------------------------------------------------------------
// Field updates
// ---------------------------------------------------------------------------

/// Top-level free-text fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Email,
    Suggestions,
}

impl TextField {
    pub fn as_str(self) -> &'static str {
        match self {
            TextField::Name => "name",
            TextField::Email => "email",
            TextField::Suggestions => "suggestions",
        }
    }

    pub fn parse(name: &str) -> Option<TextField> {
        match name {
            "name" => Some(TextField::Name),
            "email" => Some(TextField::Email),
            "suggestions" => Some(TextField::Suggestions),
            _ => None,
        }
    }
}

/// A single edit to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Text(TextField, String),
    Rating(RatingKey, String),
}

impl FieldUpdate {
    /// Resolve a submitted `name=value` pair. Unknown field names yield `None`.
    pub fn from_field(name: &str, value: impl Into<String>) -> Option<FieldUpdate> {
        if let Some(key) = RatingKey::parse(name) {
            return Some(FieldUpdate::Rating(key, value.into()));
        }
        TextField::parse(name).map(|field| FieldUpdate::Text(field, value.into()))
    }
}

// ---------------------------------------------------------------------------
// Form values
// ---------------------------------------------------------------------------

/// Current contents of the survey form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyForm {
    pub name: String,
    pub email: String,
    pub responses: BTreeMap<RatingKey, String>,
    pub suggestions: String,
}

impl Default for SurveyForm {
    fn default() -> Self {
        Self::with_default_rating(DEFAULT_RATING)
    }
}

impl SurveyForm {
    /// Empty form with every slider preset to `rating`.
    pub fn with_default_rating(rating: &str) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            responses: RatingKey::ALL
                .into_iter()
                .map(|k| (k, rating.to_string()))
                .collect(),
            suggestions: String::new(),
        }
    }

    /// Return a copy of the form with one field changed.
    pub fn with_update(&self, update: FieldUpdate) -> SurveyForm {
        let mut next = self.clone();
        match update {
            FieldUpdate::Text(TextField::Name, v) => next.name = v,
            FieldUpdate::Text(TextField::Email, v) => next.email = v,
            FieldUpdate::Text(TextField::Suggestions, v) => next.suggestions = v,
            FieldUpdate::Rating(key, v) => {
                next.responses.insert(key, v);
            }
        }
        next
    }

    /// Current raw value for a rating, empty if it was never set.
    pub fn rating(&self, key: RatingKey) -> &str {
        self.responses.get(&key).map(String::as_str).unwrap_or("")
    }

    /// Check every field. An empty result means the form may be submitted.
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();

        if self.name.trim().is_empty() {
            errors.insert(TextField::Name.as_str(), NAME_REQUIRED);
        }

        if self.email.trim().is_empty() {
            errors.insert(TextField::Email.as_str(), EMAIL_REQUIRED);
        } else if !EMAIL_RE.is_match(&self.email) {
            errors.insert(TextField::Email.as_str(), EMAIL_INVALID);
        }

        for key in RatingKey::ALL {
            let value = self.rating(key);
            if value.is_empty() {
                errors.insert(key.as_str(), RATING_REQUIRED);
            } else if parse_rating(value).is_none() {
                errors.insert(key.as_str(), RATING_OUT_OF_RANGE);
            }
        }

        errors
    }

    /// The record handed to the store.
    pub fn to_submission(&self) -> NewSurveyResponse {
        NewSurveyResponse {
            name: self.name.clone(),
            email: self.email.clone(),
            responses: self.responses.clone(),
            suggestions: self.suggestions.clone(),
        }
    }
}

/// Field name to error message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<&'static str, &'static str>);

impl FormErrors {
    fn insert(&mut self, field: &'static str, message: &'static str) {
        self.0.insert(field, message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

// ---------------------------------------------------------------------------
// Submission state machine
// ---------------------------------------------------------------------------

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum SubmitStatus {
    Editing,
    Submitting,
    Failed(String),
    /// Terminal: the caller navigates to the confirmation view.
    Submitted,
}

/// Inputs to the form controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Update(FieldUpdate),
    Submit,
    InsertSucceeded,
    InsertFailed,
}

/// Side effects the caller must carry out after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEffect {
    Insert(NewSurveyResponse),
}

/// Form values plus validation errors and submit status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormState {
    pub form: SurveyForm,
    pub errors: FormErrors,
    pub status: SubmitStatus,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(SurveyForm::default())
    }
}

impl FormState {
    pub fn new(form: SurveyForm) -> Self {
        Self {
            form,
            errors: FormErrors::default(),
            status: SubmitStatus::Editing,
        }
    }

    /// `true` while an insert is outstanding. The submit control is disabled.
    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Compute the next state for `event`.
    pub fn apply(&self, event: FormEvent) -> (FormState, Option<FormEffect>) {
        match event {
            FormEvent::Update(update) => {
                let status = match &self.status {
                    SubmitStatus::Failed(_) => SubmitStatus::Editing,
                    other => other.clone(),
                };
                let next = FormState {
                    form: self.form.with_update(update),
                    errors: self.errors.clone(),
                    status,
                };
                (next, None)
            }
            FormEvent::Submit => {
                if self.is_submitting() {
                    return (self.clone(), None);
                }
                let errors = self.form.validate();
                if !errors.is_empty() {
                    let next = FormState {
                        form: self.form.clone(),
                        errors,
                        status: SubmitStatus::Editing,
                    };
                    return (next, None);
                }
                let next = FormState {
                    form: self.form.clone(),
                    errors,
                    status: SubmitStatus::Submitting,
                };
                let effect = FormEffect::Insert(self.form.to_submission());
                (next, Some(effect))
            }
            FormEvent::InsertSucceeded if self.is_submitting() => {
                let mut next = self.clone();
                next.status = SubmitStatus::Submitted;
                (next, None)
            }
            FormEvent::InsertFailed if self.is_submitting() => {
                let mut next = self.clone();
                next.status = SubmitStatus::Failed(SUBMISSION_FAILED.to_string());
                (next, None)
            }
            FormEvent::InsertSucceeded | FormEvent::InsertFailed => (self.clone(), None),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn filled_form() -> SurveyForm {
        let mut form = SurveyForm::default()
            .with_update(FieldUpdate::Text(TextField::Name, "Alice".into()))
            .with_update(FieldUpdate::Text(TextField::Email, "alice@example.com".into()));
        for key in RatingKey::ALL {
            form = form.with_update(FieldUpdate::Rating(key, "4".into()));
        }
        form
    }

    #[test]
    fn rating_update_touches_only_that_key() {
        let before = filled_form();
        for key in RatingKey::ALL {
            for v in 0..=5 {
                let after = before.with_update(FieldUpdate::Rating(key, v.to_string()));
                assert_eq!(after.rating(key), v.to_string());
                assert_eq!(after.name, before.name);
                assert_eq!(after.email, before.email);
                assert_eq!(after.suggestions, before.suggestions);
                for other in RatingKey::ALL.into_iter().filter(|k| *k != key) {
                    assert_eq!(after.rating(other), before.rating(other));
                }
            }
        }
        // The original value is untouched.
        assert_eq!(before, filled_form());
    }

    #[test]
    fn text_update_leaves_ratings_alone() {
        let before = filled_form();
        let after = before.with_update(FieldUpdate::Text(TextField::Suggestions, "More".into()));
        assert_eq!(after.suggestions, "More");
        assert_eq!(after.responses, before.responses);
        assert_eq!(before.suggestions, "");
    }

    #[test]
    fn from_field_dispatches_by_name() {
        assert_eq!(
            FieldUpdate::from_field("brandAlignment", "3"),
            Some(FieldUpdate::Rating(RatingKey::BrandAlignment, "3".into()))
        );
        assert_eq!(
            FieldUpdate::from_field("email", "x@y.z"),
            Some(FieldUpdate::Text(TextField::Email, "x@y.z".into()))
        );
        assert_eq!(FieldUpdate::from_field("unknown", "1"), None);
    }

    #[test]
    fn defaults_preset_every_rating() {
        let form = SurveyForm::default();
        assert!(RatingKey::ALL.iter().all(|k| form.rating(*k) == "0"));
        let alt = SurveyForm::with_default_rating("3");
        assert!(RatingKey::ALL.iter().all(|k| alt.rating(*k) == "3"));
    }

    #[test]
    fn complete_form_is_valid() {
        assert!(filled_form().validate().is_empty());
    }

    #[test]
    fn empty_name_is_rejected() {
        let form = filled_form().with_update(FieldUpdate::Text(TextField::Name, "   ".into()));
        assert_eq!(form.validate().get("name"), Some(NAME_REQUIRED));
    }

    #[test]
    fn empty_email_is_rejected() {
        let form = filled_form().with_update(FieldUpdate::Text(TextField::Email, String::new()));
        assert_eq!(form.validate().get("email"), Some(EMAIL_REQUIRED));
    }

    #[test]
    fn malformed_email_is_rejected() {
        for bad in ["foo", "foo@bar", "@.", "a b@c"] {
            let form = filled_form().with_update(FieldUpdate::Text(TextField::Email, bad.into()));
            assert_eq!(form.validate().get("email"), Some(EMAIL_INVALID), "{bad}");
        }
    }

    #[test]
    fn missing_rating_is_rejected() {
        let form = filled_form().with_update(FieldUpdate::Rating(RatingKey::Trust, String::new()));
        let errors = form.validate();
        assert_eq!(errors.get("trust"), Some(RATING_REQUIRED));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let form = filled_form().with_update(FieldUpdate::Rating(RatingKey::Quality, "9".into()));
        assert_eq!(form.validate().get("quality"), Some(RATING_OUT_OF_RANGE));
    }

    #[test]
    fn invalid_submit_has_no_effect() {
        let state = FormState::default();
        let (next, effect) = state.apply(FormEvent::Submit);
        assert!(effect.is_none());
        assert_eq!(next.status, SubmitStatus::Editing);
        assert_eq!(next.errors.get("name"), Some(NAME_REQUIRED));
    }

    #[test]
    fn valid_submit_emits_insert_and_guards_reentry() {
        let state = FormState::new(filled_form());
        let (submitting, effect) = state.apply(FormEvent::Submit);
        assert!(submitting.is_submitting());
        assert_matches!(effect, Some(FormEffect::Insert(ref rec)) if rec.name == "Alice");

        let (again, second) = submitting.apply(FormEvent::Submit);
        assert!(second.is_none());
        assert_eq!(again, submitting);
    }

    #[test]
    fn insert_outcomes_settle_status() {
        let (submitting, _) = FormState::new(filled_form()).apply(FormEvent::Submit);

        let (done, _) = submitting.apply(FormEvent::InsertSucceeded);
        assert_eq!(done.status, SubmitStatus::Submitted);

        let (failed, _) = submitting.apply(FormEvent::InsertFailed);
        assert_eq!(failed.status, SubmitStatus::Failed(SUBMISSION_FAILED.to_string()));
        assert_eq!(failed.form, submitting.form);

        let (editing, _) = failed.apply(FormEvent::Update(FieldUpdate::Text(
            TextField::Name,
            "Alicia".into(),
        )));
        assert_eq!(editing.status, SubmitStatus::Editing);
    }

    #[test]
    fn stray_insert_result_is_ignored() {
        let state = FormState::default();
        let (next, _) = state.apply(FormEvent::InsertSucceeded);
        assert_eq!(next, state);
    }

    #[test]
    fn submission_carries_normalized_fields() {
        let form = filled_form().with_update(FieldUpdate::Rating(RatingKey::Timeline, "0".into()));
        let rec = form.to_submission();
        assert_eq!(rec.email, "alice@example.com");
        assert_eq!(rec.responses.get(&RatingKey::Timeline).map(String::as_str), Some("0"));
        assert_eq!(rec.responses.len(), RatingKey::ALL.len());
        assert_eq!(rec.suggestions, "");
    }
}
