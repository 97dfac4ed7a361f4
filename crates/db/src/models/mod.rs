//! Row structs matching the database tables.
//!
//! Each submodule contains a `FromRow` struct for the table row and the
//! conversion into the domain type from `surveydesk_core`.

pub mod survey_response;
