pub mod dashboard;
pub mod export;
pub mod responses;
pub mod survey;
