//! Search state, its transition function, and view model computation.
//!
//! [`SearchState`] is the single source of truth for the search controller.
//! It is changed only through [`SearchState::reduce`], which maps the current
//! state and a [`Transition`] to the next state. [`AppState`] wraps it with
//! the controller bookkeeping (query generation, debounce tickets, selection)
//! and the rendering configuration.
//!
//! # Invariants
//!
//! - `loading` and `fetching_more` are never both true.
//! - `results` is cleared and `page` reset to 1 whenever `search_text` changes.
//! - `page` advances only after a successful append.
//! - `error` is cleared whenever a request starts.
//! - `scrollable` is `!fetching_more`.
//!
//! # Example
//!
//! ```rust
//! use reposcout::app::state::{SearchState, Transition};
//! use reposcout::RepositoryItem;
//!
//! let state = SearchState::default()
//!     .reduce(Transition::UpdateSearchText("react".into()))
//!     .reduce(Transition::StartFetching)
//!     .reduce(Transition::UpdateSearchResult(vec![RepositoryItem::new(1, "facebook/react")]));
//! assert_eq!(state.results.len(), 1);
//! assert!(!state.loading);
//! ```

use super::request::{Debouncer, RequestKind, RequestTag};
use crate::domain::RepositoryItem;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, ErrorBanner, FooterInfo, HeaderInfo, ListFooter, SearchBarInfo,
    UIViewModel, ViewStatus,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::time::Duration;

/// Message shown when no query has been typed yet.
pub const PROMPT_TEXT: &str = "type keyword to search for repos...";

/// Message shown while the first page of a query is in flight.
pub const LOADING_TEXT: &str = "loading...";

/// Title of the error banner.
pub const ERROR_TITLE: &str = "Something Wrong!";

/// A failed request, reduced to what the error banner displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchError {
    pub message: String,
}

/// State of the incremental search and infinite-scroll pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    /// Current query. Empty means no search is active.
    pub search_text: String,

    /// Accumulated matches for `search_text`, in API order.
    pub results: Vec<RepositoryItem>,

    /// Last fully loaded page (1-indexed).
    pub page: u32,

    /// The first page of a new query is in flight.
    pub loading: bool,

    /// An additional page is in flight.
    pub fetching_more: bool,

    /// False while `fetching_more`, so scrolling cannot re-trigger a fetch.
    pub scrollable: bool,

    pub error: Option<SearchError>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            results: Vec::new(),
            page: 1,
            loading: false,
            fetching_more: false,
            scrollable: true,
            error: None,
        }
    }
}

/// State transitions of the search controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Echo new search text. A different text drops the current results and
    /// any in-flight flags, since responses for the old text are now stale.
    UpdateSearchText(String),

    /// A first-page request was issued.
    StartFetching,

    /// The first page arrived; replaces the results.
    UpdateSearchResult(Vec<RepositoryItem>),

    /// The first page failed.
    FirstPageFailed(String),

    /// A next-page request was issued.
    FetchingMore,

    /// A next page arrived; appended after the existing results.
    AppendSearchResult(Vec<RepositoryItem>),

    /// A next page failed; loaded pages are kept.
    NextPageFailed(String),
}

impl SearchState {
    /// Computes the next state from the current one and a transition.
    #[must_use]
    pub fn reduce(mut self, transition: Transition) -> Self {
        match transition {
            Transition::UpdateSearchText(text) => {
                if text != self.search_text {
                    self.search_text = text;
                    self.results.clear();
                    self.page = 1;
                    self.loading = false;
                    self.fetching_more = false;
                    self.scrollable = true;
                }
            }
            Transition::StartFetching => {
                self.loading = true;
                self.fetching_more = false;
                self.scrollable = true;
                self.error = None;
            }
            Transition::UpdateSearchResult(items) => {
                self.results = items;
                self.page = 1;
                self.loading = false;
            }
            Transition::FirstPageFailed(message) => {
                self.results.clear();
                self.loading = false;
                self.error = Some(SearchError { message });
            }
            Transition::FetchingMore => {
                self.fetching_more = true;
                self.scrollable = false;
                self.error = None;
            }
            Transition::AppendSearchResult(items) => {
                self.results.extend(items);
                self.page += 1;
                self.fetching_more = false;
                self.scrollable = true;
            }
            Transition::NextPageFailed(message) => {
                self.fetching_more = false;
                self.scrollable = true;
                self.error = Some(SearchError { message });
            }
        }
        self
    }

    /// Whether a scroll-end intent may start a next-page request.
    #[must_use]
    pub fn can_fetch_more(&self) -> bool {
        !self.results.is_empty() && !self.loading && !self.fetching_more
    }

    /// Projects the state onto what the view should show.
    ///
    /// Precedence: error, then loading, then prompt, then the result list.
    #[must_use]
    pub fn view_status(&self) -> ViewStatus {
        if let Some(error) = &self.error {
            ViewStatus::Error {
                message: error.message.clone(),
            }
        } else if self.loading {
            ViewStatus::Loading
        } else if self.results.is_empty() {
            ViewStatus::Prompt
        } else {
            ViewStatus::Results {
                fetching_more: self.fetching_more,
            }
        }
    }
}

/// Search tuning derived from the plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Base URL of the search API, without trailing slash.
    pub api_base_url: String,

    /// Results requested per page.
    pub per_page: u32,

    /// Quiet period before a typed query is searched.
    pub debounce: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            per_page: 10,
            debounce: Duration::from_millis(500),
        }
    }
}

/// Controller state: the search state plus request bookkeeping and UI state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub search: SearchState,

    /// Zero-based index of the highlighted row within `search.results`.
    pub selected_index: usize,

    pub settings: SearchSettings,

    pub theme: Theme,

    /// Bumped on every search text change; stamped into request tags.
    generation: u64,

    debouncer: Debouncer,
}

impl AppState {
    /// Creates an idle controller with no query.
    #[must_use]
    pub fn new(settings: SearchSettings, theme: Theme) -> Self {
        Self {
            search: SearchState::default(),
            selected_index: 0,
            settings,
            theme,
            generation: 0,
            debouncer: Debouncer::default(),
        }
    }

    /// Applies a transition to the search state.
    pub fn apply(&mut self, transition: Transition) {
        let _span = tracing::debug_span!("apply_transition", transition = transition_name(&transition)).entered();

        let current = std::mem::take(&mut self.search);
        self.search = current.reduce(transition);

        if self.selected_index >= self.search.results.len() {
            self.selected_index = self.search.results.len().saturating_sub(1);
        }

        tracing::debug!(
            results = self.search.results.len(),
            page = self.search.page,
            loading = self.search.loading,
            fetching_more = self.search.fetching_more,
            has_error = self.search.error.is_some(),
            "search state updated"
        );
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a new query generation, invalidating all in-flight requests.
    pub(crate) fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub(crate) fn debouncer_mut(&mut self) -> &mut Debouncer {
        &mut self.debouncer
    }

    #[must_use]
    pub const fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    /// Whether a response carrying `tag` still belongs to the current state.
    ///
    /// The tag must come from the current generation and query, and the
    /// controller must still be waiting for exactly that page.
    #[must_use]
    pub fn is_current(&self, tag: &RequestTag) -> bool {
        if tag.generation != self.generation || tag.query != self.search.search_text {
            return false;
        }
        match tag.kind {
            RequestKind::FirstPage => self.search.loading && tag.page == 1,
            RequestKind::NextPage => self.search.fetching_more && tag.page == self.search.page + 1,
        }
    }

    /// Moves the selection down one row.
    ///
    /// Returns `true` when the selection is already on the last row, which the
    /// caller treats as reaching the end of the scrollable list.
    pub fn move_selection_down(&mut self) -> bool {
        if self.search.results.is_empty() {
            return false;
        }
        if self.selected_index + 1 >= self.search.results.len() {
            return true;
        }
        self.selected_index += 1;
        false
    }

    /// Moves the selection up one row, stopping at the first row.
    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Moves the selection to the last loaded row.
    pub fn move_selection_to_end(&mut self) {
        self.selected_index = self.search.results.len().saturating_sub(1);
    }

    /// Computes a renderable view model for a `rows` x `cols` pane.
    ///
    /// The result list is windowed around the selected row. The error banner
    /// is shown in addition to, not instead of, the list or prompt beneath.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let status = self.search.view_status();

        let prompt = || EmptyState {
            message: PROMPT_TEXT.to_string(),
        };
        let scroll_footer = |fetching_more: bool| {
            if fetching_more {
                ListFooter::FetchingMore
            } else {
                ListFooter::ScrollForMore
            }
        };

        let (error_banner, empty_state, list_footer) = match &status {
            ViewStatus::Error { message } => (
                Some(ErrorBanner {
                    title: ERROR_TITLE.to_string(),
                    message: message.clone(),
                }),
                self.search.results.is_empty().then(prompt),
                (!self.search.results.is_empty()).then(|| scroll_footer(false)),
            ),
            ViewStatus::Loading => (
                None,
                Some(EmptyState {
                    message: LOADING_TEXT.to_string(),
                }),
                None,
            ),
            ViewStatus::Prompt => (None, Some(prompt()), None),
            ViewStatus::Results { fetching_more } => (None, None, Some(scroll_footer(*fetching_more))),
        };

        let (display_items, selected_index) = if empty_state.is_some() {
            (vec![], 0)
        } else {
            let available_rows = self.calculate_available_rows(rows, error_banner.is_some()).max(1);
            let total = self.search.results.len();

            let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
            let visible_end = (visible_start + available_rows).min(total);
            if visible_end - visible_start < available_rows && total >= available_rows {
                visible_start = visible_end.saturating_sub(available_rows);
            }

            let matcher = if self.search.search_text.is_empty() {
                None
            } else {
                Some(SkimMatcherV2::default())
            };

            let items = self.search.results[visible_start..visible_end]
                .iter()
                .enumerate()
                .map(|(offset, item)| {
                    self.compute_display_item(item, visible_start + offset, cols, matcher.as_ref())
                })
                .collect();

            (items, self.selected_index.saturating_sub(visible_start))
        };

        UIViewModel {
            status,
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.search.search_text.clone(),
            },
            error_banner,
            empty_state,
            display_items,
            selected_index,
            list_footer,
            footer: Self::compute_footer(),
        }
    }

    fn compute_display_item(
        &self,
        item: &RepositoryItem,
        absolute_idx: usize,
        cols: usize,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        const META_COLUMNS_WIDTH: usize = 30;

        let max_name = cols.saturating_sub(META_COLUMNS_WIDTH).max(10);
        let name_len = item.full_name.chars().count();
        let name = if name_len > max_name {
            let kept: String = item.full_name.chars().take(max_name - 3).collect();
            format!("{kept}...")
        } else {
            item.full_name.clone()
        };

        let visible_chars = name.chars().count().saturating_sub(if name_len > max_name { 3 } else { 0 });
        let highlight_ranges = matcher
            .map(|m| self.compute_highlight_ranges(&item.full_name, m))
            .unwrap_or_default()
            .into_iter()
            .filter(|&(start, _)| start < visible_chars)
            .map(|(start, end)| (start, end.min(visible_chars)))
            .collect();

        DisplayItem {
            name,
            stars: item.stars_label(),
            language: item.language.clone().unwrap_or_default(),
            updated: item.updated_ago().unwrap_or_default(),
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges,
        }
    }

    /// Coalesces fuzzy match positions into `(start, end)` character ranges.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, &self.search.search_text) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = if self.search.results.is_empty() {
            " RepoScout ".to_string()
        } else {
            format!(" RepoScout ({} results) ", self.search.results.len())
        };
        HeaderInfo { title }
    }

    fn compute_footer() -> FooterInfo {
        FooterInfo {
            keybindings: "Type to search  Esc: clear  ↑/↓ or Ctrl+p/n: navigate  End: load more  Ctrl+c: hide"
                .to_string(),
        }
    }

    /// Rows left for the result list after the fixed chrome.
    ///
    /// Chrome: blank, header, border, search bar (3), column titles, list
    /// footer, border, footer, trailing blank, plus two rows for the error
    /// banner when shown.
    const fn calculate_available_rows(&self, total_rows: usize, with_banner: bool) -> usize {
        let chrome = if with_banner { 13 } else { 11 };
        total_rows.saturating_sub(chrome)
    }
}

const fn transition_name(transition: &Transition) -> &'static str {
    match transition {
        Transition::UpdateSearchText(_) => "update_search_text",
        Transition::StartFetching => "start_fetching",
        Transition::UpdateSearchResult(_) => "update_search_result",
        Transition::FirstPageFailed(_) => "first_page_failed",
        Transition::FetchingMore => "fetching_more",
        Transition::AppendSearchResult(_) => "append_search_result",
        Transition::NextPageFailed(_) => "next_page_failed",
    }
}
