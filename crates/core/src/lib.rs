//! Domain logic for the surveydesk client survey and response dashboard.
//!
//! Everything in this crate is pure: state transitions, filtering,
//! pagination and export encoding take values in and hand values back.
//! Persistence lives in `surveydesk-db`, HTTP and HTML in `surveydesk-api`.

pub mod dashboard;
pub mod error;
pub mod export;
pub mod form;
pub mod gate;
pub mod listing;
pub mod rating;
pub mod survey;
pub mod types;
