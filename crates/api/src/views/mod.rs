//! Server-rendered HTML.
//!
//! Pages are built by string formatting. Every piece of user-supplied text
//! goes through [`page::escape_html`] before it reaches the markup.

pub mod dashboard;
pub mod page;
pub mod survey;
