//! Filtering and pagination over the loaded response set.

use serde::Serialize;

use crate::survey::SurveyResponse;

/// Rows per dashboard page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Records whose name or email contains `term`, ignoring case, in their
/// original order. An empty term matches everything.
pub fn filter<'a>(records: &'a [SurveyResponse], term: &str) -> Vec<&'a SurveyResponse> {
    let folded = term.to_lowercase();
    records.iter().filter(|r| r.matches_folded(&folded)).collect()
}

/// A bounded slice of a larger sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page number that was requested (after clamping to >= 1).
    pub page: usize,
    pub total_pages: usize,
    /// Length of the whole sequence.
    pub total: usize,
}

/// Number of pages needed for `count` items.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Slice `[(page - 1) * size, page * size)` of `items`, clamped to bounds.
///
/// Page numbers below 1 are treated as 1. Pages past the end, however
/// large, give an empty slice.
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> Page<'_, T> {
    let size = page_size.max(1);
    let page = page.max(1);
    let start = (page - 1).saturating_mul(size).min(items.len());
    let end = page.saturating_mul(size).min(items.len());
    Page {
        items: &items[start..end],
        page,
        total_pages: total_pages(items.len(), size),
        total: items.len(),
    }
}
