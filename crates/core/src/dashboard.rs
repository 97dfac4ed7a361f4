//! Response dashboard state machine.
//!
//! One [`DashboardState`] per dashboard session. Every transition is a pure
//! `(state, event) -> state'` step; the single store read the dashboard
//! needs is handed back as a [`DashboardEffect`] for the caller to run.

use serde::Serialize;

use crate::gate::AuthState;
use crate::listing::{filter, paginate, DEFAULT_PAGE_SIZE};
use crate::survey::SurveyResponse;
use crate::types::DbId;

/// Banner text when the response list could not be read.
pub const LOAD_FAILED: &str = "Could not load responses. Please try again.";

/// Card-per-record or dense table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Card,
    Table,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Card => "card",
            ViewMode::Table => "table",
        }
    }

    pub fn parse(value: &str) -> Option<ViewMode> {
        match value {
            "card" => Some(ViewMode::Card),
            "table" => Some(ViewMode::Table),
            _ => None,
        }
    }
}

/// Lifecycle of the one listing fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Pending,
    Loaded(Vec<SurveyResponse>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// The password gate was passed (or the persisted flag was found).
    Authenticated,
    Loaded(Vec<SurveyResponse>),
    LoadFailed(String),
    SearchChanged(String),
    PageSelected(usize),
    ViewModeChanged(ViewMode),
    Selected(DbId),
    DetailClosed,
    EscapePressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEffect {
    /// Read every response, newest first.
    LoadAll,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub auth: AuthState,
    pub load: LoadState,
    pub search_term: String,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
    pub view_mode: ViewMode,
    selected: Option<DbId>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// The current page of the filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView<'a> {
    pub items: Vec<&'a SurveyResponse>,
    pub page: usize,
    pub total_pages: usize,
    /// Size of the filtered set.
    pub total: usize,
}

impl DashboardState {
    pub fn new(page_size: usize) -> Self {
        Self {
            auth: AuthState::Unauthenticated,
            load: LoadState::Pending,
            search_term: String::new(),
            page: 1,
            page_size: page_size.max(1),
            view_mode: ViewMode::Card,
            selected: None,
        }
    }

    /// Compute the next state for `event`.
    ///
    /// While unauthenticated only [`DashboardEvent::Authenticated`] has any
    /// effect. Authentication yields exactly one [`DashboardEffect::LoadAll`].
    pub fn apply(mut self, event: DashboardEvent) -> (DashboardState, Option<DashboardEffect>) {
        if self.auth == AuthState::Unauthenticated {
            if event == DashboardEvent::Authenticated {
                self.auth = AuthState::Authenticated;
                self.load = LoadState::Pending;
                return (self, Some(DashboardEffect::LoadAll));
            }
            return (self, None);
        }

        match event {
            DashboardEvent::Authenticated => {}
            DashboardEvent::Loaded(records) => self.load = LoadState::Loaded(records),
            DashboardEvent::LoadFailed(message) => self.load = LoadState::Failed(message),
            DashboardEvent::SearchChanged(term) => {
                if term != self.search_term {
                    self.search_term = term;
                    self.page = 1;
                }
            }
            DashboardEvent::PageSelected(page) => self.page = page.max(1),
            DashboardEvent::ViewModeChanged(mode) => self.view_mode = mode,
            DashboardEvent::Selected(id) => {
                let visible = self.filtered().iter().any(|r| r.id == id);
                self.selected = visible.then_some(id);
            }
            DashboardEvent::DetailClosed | DashboardEvent::EscapePressed => self.selected = None,
        }
        (self, None)
    }

    /// Apply a sequence of events, ignoring effects.
    pub fn apply_all(self, events: impl IntoIterator<Item = DashboardEvent>) -> DashboardState {
        events
            .into_iter()
            .fold(self, |state, event| state.apply(event).0)
    }

    /// Everything currently loaded, newest first. Empty unless loaded.
    pub fn records(&self) -> &[SurveyResponse] {
        match &self.load {
            LoadState::Loaded(records) => records,
            LoadState::Pending | LoadState::Failed(_) => &[],
        }
    }

    pub fn load_error(&self) -> Option<&str> {
        match &self.load {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// The loaded records matching the current search term.
    pub fn filtered(&self) -> Vec<&SurveyResponse> {
        filter(self.records(), &self.search_term)
    }

    /// The page window the view renders.
    pub fn page_view(&self) -> PageView<'_> {
        let filtered = self.filtered();
        let window = paginate(&filtered, self.page_size, self.page);
        PageView {
            items: window.items.to_vec(),
            page: window.page,
            total_pages: window.total_pages,
            total: window.total,
        }
    }

    /// The record open in the detail overlay, if it is still in the
    /// filtered set.
    pub fn selected(&self) -> Option<&SurveyResponse> {
        let id = self.selected?;
        let folded = self.search_term.to_lowercase();
        self.records()
            .iter()
            .find(|r| r.id == id && r.matches_folded(&folded))
    }
}

/// Focus-trap rule for the detail overlay.
///
/// Given the index of the focused element among `count` focusable elements,
/// returns the index focus must jump to, or `None` when the browser's own
/// tab order should apply.
pub fn wrap_focus(current: usize, count: usize, backwards: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let last = count - 1;
    match (backwards, current) {
        (true, 0) => Some(last),
        (false, c) if c == last => Some(0),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn record(id: DbId, name: &str) -> SurveyResponse {
        SurveyResponse {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            responses: BTreeMap::new(),
            suggestions: None,
            created_at: Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn loaded(count: i64) -> DashboardState {
        let records = (1..=count).map(|i| record(i, &format!("User {i}"))).collect();
        DashboardState::default().apply_all([
            DashboardEvent::Authenticated,
            DashboardEvent::Loaded(records),
        ])
    }

    #[test]
    fn authentication_requests_one_load() {
        let (state, effect) = DashboardState::default().apply(DashboardEvent::Authenticated);
        assert_eq!(effect, Some(DashboardEffect::LoadAll));
        assert_eq!(state.auth, AuthState::Authenticated);

        let (_, again) = state.apply(DashboardEvent::Authenticated);
        assert_eq!(again, None);
    }

    #[test]
    fn locked_dashboard_ignores_events() {
        let state = DashboardState::default()
            .apply_all([DashboardEvent::Loaded(vec![record(1, "A")])]);
        assert_eq!(state.load, LoadState::Pending);
        assert!(state.records().is_empty());
    }

    #[test]
    fn load_replaces_collection() {
        let state = loaded(3).apply_all([DashboardEvent::Loaded(vec![record(9, "Zed")])]);
        assert_eq!(state.records().len(), 1);
        assert_eq!(state.records()[0].id, 9);
    }

    #[test]
    fn load_failure_is_visible() {
        let state = DashboardState::default().apply_all([
            DashboardEvent::Authenticated,
            DashboardEvent::LoadFailed(LOAD_FAILED.to_string()),
        ]);
        assert_eq!(state.load_error(), Some(LOAD_FAILED));
        assert!(state.filtered().is_empty());
    }

    #[test]
    fn search_change_resets_page() {
        let state = loaded(45).apply_all([DashboardEvent::PageSelected(3)]);
        assert_eq!(state.page, 3);
        let state = state.apply_all([DashboardEvent::SearchChanged("user 1".into())]);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn same_search_term_keeps_page() {
        let state = loaded(45).apply_all([
            DashboardEvent::SearchChanged("user".into()),
            DashboardEvent::PageSelected(2),
            DashboardEvent::SearchChanged("user".into()),
        ]);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn page_view_windows_filtered_set() {
        let state = loaded(45).apply_all([DashboardEvent::PageSelected(3)]);
        let view = state.page_view();
        assert_eq!(view.items.len(), 5);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.total, 45);
    }

    #[test]
    fn selection_survives_paging_and_clears_on_close() {
        let state = loaded(45).apply_all([
            DashboardEvent::Selected(7),
            DashboardEvent::PageSelected(3),
        ]);
        assert_matches!(state.selected(), Some(r) if r.id == 7);

        let closed = state.clone().apply_all([DashboardEvent::DetailClosed]);
        assert!(closed.selected().is_none());
        let escaped = state.apply_all([DashboardEvent::EscapePressed]);
        assert!(escaped.selected().is_none());
    }

    #[test]
    fn selection_must_come_from_filtered_set() {
        let state = loaded(5).apply_all([
            DashboardEvent::SearchChanged("user 2".into()),
            DashboardEvent::Selected(4),
        ]);
        assert!(state.selected().is_none());
    }

    #[test]
    fn selected_record_is_borrowed_from_loaded_set() {
        let state = loaded(3).apply_all([DashboardEvent::Selected(2)]);
        let selected = state.selected().unwrap();
        assert!(std::ptr::eq(selected, &state.records()[1]));
    }

    #[test]
    fn view_mode_parses_and_toggles() {
        assert_eq!(ViewMode::parse("table"), Some(ViewMode::Table));
        assert_eq!(ViewMode::parse("grid"), None);
        let state = loaded(1).apply_all([DashboardEvent::ViewModeChanged(ViewMode::Table)]);
        assert_eq!(state.view_mode, ViewMode::Table);
    }

    #[test]
    fn focus_wraps_at_both_ends() {
        assert_eq!(wrap_focus(2, 3, false), Some(0));
        assert_eq!(wrap_focus(0, 3, true), Some(2));
        assert_eq!(wrap_focus(1, 3, false), None);
        assert_eq!(wrap_focus(1, 3, true), None);
        assert_eq!(wrap_focus(0, 1, false), Some(0));
        assert_eq!(wrap_focus(0, 0, false), None);
    }
}
