//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod survey_response_repo;

pub use survey_response_repo::SurveyResponseRepo;
